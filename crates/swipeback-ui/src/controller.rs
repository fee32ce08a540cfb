use std::cell::{Cell, RefCell};
use std::rc::Rc;

use swipeback_core::{Color, SwipeError};

use crate::config::{SwipeConfig, validate_threshold};
use crate::edge::EdgeFlags;
use crate::listener::{ListenerRegistry, SwipeListener};

/// Cloneable handle to the runtime swipe settings and listener registry.
///
/// The layout reads these values each time it evaluates a gesture, so a
/// listener holding a clone may change them from inside a notification; the
/// change applies from the next evaluation on.
#[derive(Clone)]
pub struct SwipeController {
    inner: Rc<Inner>,
}

struct Inner {
    edges: Cell<EdgeFlags>,
    threshold: Cell<f32>,
    enabled: Cell<bool>,
    scrim_color: Cell<Color>,
    redraw: Cell<bool>,
    listeners: RefCell<ListenerRegistry>,
    /// Host hooks (screen dismissal, translucency). Notified after the
    /// listeners and out of reach of the public registry operations.
    hooks: RefCell<ListenerRegistry>,
}

impl SwipeController {
    pub(crate) fn new(config: &SwipeConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                edges: Cell::new(config.edges),
                threshold: Cell::new(config.threshold),
                enabled: Cell::new(config.enabled),
                scrim_color: Cell::new(config.scrim_color),
                redraw: Cell::new(false),
                listeners: RefCell::new(ListenerRegistry::default()),
                hooks: RefCell::new(ListenerRegistry::default()),
            }),
        }
    }

    /// Set the edges a swipe may start from.
    pub fn set_edges(&self, edges: EdgeFlags) {
        self.inner.edges.set(edges);
    }

    pub fn edges(&self) -> EdgeFlags {
        self.inner.edges.get()
    }

    /// When disabled, the layout reports every pointer event as not handled.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.set(enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.get()
    }

    /// Scrim drawn over the revealed area. Any colour is accepted.
    pub fn set_scrim_color(&self, color: Color) {
        self.inner.scrim_color.set(color);
        self.request_redraw();
    }

    pub fn scrim_color(&self) -> Color {
        self.inner.scrim_color.get()
    }

    /// Fails with [`SwipeError::InvalidThreshold`] unless `0 < threshold < 1`;
    /// the previous value is kept on failure.
    pub fn set_threshold(&self, threshold: f32) -> Result<(), SwipeError> {
        validate_threshold(threshold)?;
        self.inner.threshold.set(threshold);
        Ok(())
    }

    pub fn threshold(&self) -> f32 {
        self.inner.threshold.get()
    }

    pub fn add_listener(&self, listener: Rc<dyn SwipeListener>) {
        self.inner.listeners.borrow_mut().add(listener);
    }

    pub fn remove_listener(&self, listener: &Rc<dyn SwipeListener>) {
        self.inner.listeners.borrow_mut().remove(listener);
    }

    pub fn clear_listeners(&self) {
        self.inner.listeners.borrow_mut().clear();
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub(crate) fn add_hook(&self, hook: Rc<dyn SwipeListener>) {
        self.inner.hooks.borrow_mut().add(hook);
    }

    pub(crate) fn request_redraw(&self) {
        self.inner.redraw.set(true);
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&self) -> bool {
        self.inner.redraw.replace(false)
    }

    /// Calls `f` on every registered listener, in registration order, then on
    /// the host hooks.
    ///
    /// Iterates a snapshot so listeners can add, remove or clear
    /// registrations while being notified.
    pub(crate) fn notify(&self, f: impl Fn(&dyn SwipeListener)) {
        let listeners = {
            let registry = self.inner.listeners.borrow();
            let hooks = self.inner.hooks.borrow();
            if registry.is_empty() && hooks.is_empty() {
                return;
            }
            let mut all = registry.snapshot();
            all.extend(hooks.snapshot());
            all
        };
        for listener in &listeners {
            f(listener.as_ref());
        }
    }
}
