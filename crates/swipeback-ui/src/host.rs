//! Glue between a host screen and its swipe layout.

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::rc::{Rc, Weak};

use swipeback_core::{Clock, Color, Result, SwipeError, SystemClock, ViewId};

use crate::config::SwipeConfig;
use crate::drag::DragState;
use crate::edge::Edge;
use crate::layout::SwipeBackLayout;
use crate::listener::SwipeListener;

/// The screen a swipe layout is attached to.
pub trait Screen {
    /// Theme background to paint behind the content once it is reparented.
    fn window_background(&self) -> Option<Color>;

    /// Drop the window's own background so the screen beneath can show.
    fn clear_window_background(&mut self);

    /// Detach the window's first child for reparenting.
    fn detach_first_child(&mut self) -> Option<ViewId>;

    /// Make the swipe layout the window's root.
    fn install_root(&mut self);

    fn is_finishing(&self) -> bool;

    /// Close the screen with no exit transition.
    fn finish_without_transition(&mut self);
}

/// Optional platform call that toggles window translucency. Hosts without it
/// simply don't provide one.
pub trait Translucency {
    fn convert_to_translucent(&self) -> std::result::Result<(), Box<dyn Error>>;
    fn convert_from_translucent(&self) -> std::result::Result<(), Box<dyn Error>>;
}

/// Owns the swipe layout for one screen.
///
/// Create it in the screen's creation hook and call
/// [`on_post_create`](Self::on_post_create) once creation has completed.
pub struct SwipeBackHelper<S: Screen> {
    screen: Rc<RefCell<S>>,
    layout: SwipeBackLayout,
    attached: bool,
}

impl<S: Screen + 'static> SwipeBackHelper<S> {
    pub fn new(screen: Rc<RefCell<S>>, config: SwipeConfig) -> Result<Self> {
        Self::with_clock(screen, config, Rc::new(SystemClock))
    }

    pub fn with_clock(
        screen: Rc<RefCell<S>>,
        config: SwipeConfig,
        clock: Rc<dyn Clock>,
    ) -> Result<Self> {
        let layout = SwipeBackLayout::with_clock(config, clock)?;
        // A hook survives clear_swipe_listeners.
        layout.controller().add_hook(Rc::new(FinishScreen {
            screen: Rc::downgrade(&screen),
        }));
        Ok(Self {
            screen,
            layout,
            attached: false,
        })
    }

    /// Installs the translucency toggle. Without one the window stays opaque.
    pub fn with_translucency(self, translucency: Rc<dyn Translucency>) -> Self {
        self.layout
            .controller()
            .add_hook(Rc::new(TranslucencyToggle::new(translucency)));
        self
    }

    /// Moves the screen's content into the swipe layout. Only once per screen.
    pub fn on_post_create(&mut self) -> Result<()> {
        if self.attached {
            return Err(SwipeError::AlreadyAttached);
        }

        let mut screen = self.screen.borrow_mut();
        // Nothing is touched unless there is content to adopt.
        let content = screen
            .detach_first_child()
            .ok_or(SwipeError::MissingContent)?;
        screen.clear_window_background();
        let background = screen.window_background();

        self.layout.set_content_background(background);
        self.layout.add_view(content);
        screen.install_root();
        self.attached = true;

        log::debug!("swipe layout attached with content {content}");
        Ok(())
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn layout(&self) -> &SwipeBackLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut SwipeBackLayout {
        &mut self.layout
    }
}

struct FinishScreen<S> {
    screen: Weak<RefCell<S>>,
}

impl<S: Screen> SwipeListener for FinishScreen<S> {
    fn on_finish(&self) {
        let Some(screen) = self.screen.upgrade() else {
            return;
        };
        match screen.try_borrow_mut() {
            Ok(mut screen) => {
                if !screen.is_finishing() {
                    screen.finish_without_transition();
                }
            }
            Err(_) => log::error!("screen is busy, cannot request dismissal"),
        }
    }
}

struct TranslucencyToggle {
    translucency: Rc<dyn Translucency>,
    translucent: Cell<bool>,
    finished: Cell<bool>,
}

impl TranslucencyToggle {
    fn new(translucency: Rc<dyn Translucency>) -> Self {
        Self {
            translucency,
            translucent: Cell::new(false),
            finished: Cell::new(false),
        }
    }
}

impl SwipeListener for TranslucencyToggle {
    fn on_state_change(&self, _edge: Option<Edge>, state: DragState) {
        match state {
            DragState::Dragging | DragState::Settling if !self.translucent.get() => {
                match self.translucency.convert_to_translucent() {
                    Ok(()) => self.translucent.set(true),
                    Err(err) => log::debug!("convert to translucent failed: {err}"),
                }
            }
            DragState::Idle if self.translucent.get() && !self.finished.get() => {
                match self.translucency.convert_from_translucent() {
                    Ok(()) => self.translucent.set(false),
                    Err(err) => log::debug!("convert from translucent failed: {err}"),
                }
            }
            _ => {}
        }
    }

    fn on_finish(&self) {
        self.finished.set(true);
    }
}
