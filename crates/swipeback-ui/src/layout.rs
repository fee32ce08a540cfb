use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use swipeback_core::error::panic_message;
use swipeback_core::{
    Clock, Color, PointerEvent, Rect, Result, Scene, SceneNode, ShadowSide, Size, SystemClock,
    ViewId,
};

use crate::classifier::AxisClassifier;
use crate::config::SwipeConfig;
use crate::controller::SwipeController;
use crate::drag::{DragCallback, DragHelper, DragState};
use crate::edge::{Edge, EdgeFlags};
use crate::listener::SwipeListener;
use crate::state::SwipeCore;

/// Container that lets its content be swiped off screen from an edge.
///
/// The host forwards pointer events through [`on_intercept_touch_event`] and
/// [`on_touch_event`], calls [`advance_frame`] on every display refresh, and
/// paints the [`Scene`] returned by [`draw`].
///
/// [`on_intercept_touch_event`]: SwipeBackLayout::on_intercept_touch_event
/// [`on_touch_event`]: SwipeBackLayout::on_touch_event
/// [`advance_frame`]: SwipeBackLayout::advance_frame
/// [`draw`]: SwipeBackLayout::draw
pub struct SwipeBackLayout {
    drag: DragHelper,
    core: SwipeCore,
    classifier: AxisClassifier,
    size: Size,
    background: Option<Color>,
}

impl SwipeBackLayout {
    pub fn new(config: SwipeConfig) -> Result<Self> {
        Self::with_clock(config, Rc::new(SystemClock))
    }

    pub fn with_clock(config: SwipeConfig, clock: Rc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let controller = SwipeController::new(&config);
        Ok(Self {
            drag: DragHelper::new(&config, clock),
            core: SwipeCore::new(&config, controller),
            classifier: AxisClassifier::new(),
            size: Size::default(),
            background: None,
        })
    }

    /// Handle for settings and listeners that can be shared with listeners.
    pub fn controller(&self) -> SwipeController {
        self.core.controller.clone()
    }

    // --- configuration ---

    pub fn set_swipe_edges(&mut self, edges: EdgeFlags) {
        self.core.controller.set_edges(edges);
        self.drag.set_edge_tracking_enabled(edges);
    }

    pub fn swipe_edges(&self) -> EdgeFlags {
        self.core.controller.edges()
    }

    pub fn set_swipe_enabled(&mut self, enabled: bool) {
        self.core.controller.set_enabled(enabled);
    }

    pub fn is_swipe_enabled(&self) -> bool {
        self.core.controller.is_enabled()
    }

    pub fn set_scrim_color(&mut self, color: Color) {
        self.core.controller.set_scrim_color(color);
    }

    pub fn scrim_color(&self) -> Color {
        self.core.controller.scrim_color()
    }

    /// Must be strictly between 0 and 1.
    pub fn set_threshold(&mut self, threshold: f32) -> Result<()> {
        self.core.controller.set_threshold(threshold)
    }

    pub fn threshold(&self) -> f32 {
        self.core.controller.threshold()
    }

    pub fn add_swipe_listener(&mut self, listener: Rc<dyn SwipeListener>) {
        self.core.controller.add_listener(listener);
    }

    pub fn remove_swipe_listener(&mut self, listener: &Rc<dyn SwipeListener>) {
        self.core.controller.remove_listener(listener);
    }

    pub fn clear_swipe_listeners(&mut self) {
        self.core.controller.clear_listeners();
    }

    // --- observation ---

    pub fn percent(&self) -> f32 {
        self.core.percent()
    }

    pub fn scrim_opacity(&self) -> f32 {
        self.core.scrim_opacity()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    pub fn tracked_edge(&self) -> Option<Edge> {
        self.core.tracking.locked()
    }

    pub fn is_finished(&self) -> bool {
        self.core.is_finished()
    }

    /// Current content frame, `None` without content.
    pub fn content_frame(&self) -> Option<Rect> {
        self.core.content()
    }

    pub fn content_id(&self) -> Option<ViewId> {
        self.core.content_id()
    }

    // --- children ---

    /// The first child added becomes the content.
    pub fn add_view(&mut self, id: ViewId) {
        self.core.add_child(id);
        self.core.set_content_size(self.size);
    }

    /// Removing the content stops any drag in place and hands the content
    /// role to the next child.
    pub fn remove_view(&mut self, id: ViewId) {
        if !self.core.remove_child(id) {
            return;
        }
        log::debug!("content {id} removed, next content {:?}", self.core.content_id());
        self.drag.abort(&mut self.core);
        self.core.reset_offset();
        self.core.controller.request_redraw();
    }

    pub fn children(&self) -> &[ViewId] {
        self.core.children()
    }

    pub fn set_content_background(&mut self, background: Option<Color>) {
        self.background = background;
        self.core.controller.request_redraw();
    }

    // --- measure / layout ---

    /// The content is measured to exactly the container size.
    pub fn measure(&mut self, size: Size) {
        self.size = size;
        self.core.set_content_size(size);
        self.drag.set_bounds(Rect::from_size(size));
    }

    // --- gestures ---

    /// Whether the layout takes the gesture away from its descendants.
    pub fn on_intercept_touch_event(&mut self, event: &PointerEvent) -> bool {
        if !self.core.controller.is_enabled() {
            return false;
        }

        let was_vertical = self.classifier.is_locked_vertical();
        if self.classifier.observe(event, self.drag.touch_slop()) {
            if !was_vertical {
                log::trace!("gesture locked vertical");
                self.drag.cancel();
            }
            return false;
        }

        self.sync_edges();
        let Self { drag, core, .. } = self;
        match absorb("intercept", || drag.should_intercept(event, core)) {
            Some(intercept) => intercept,
            None => {
                self.abandon_gesture();
                false
            }
        }
    }

    /// Whether the layout consumed `event`.
    pub fn on_touch_event(&mut self, event: &PointerEvent) -> bool {
        if !self.core.controller.is_enabled() {
            return false;
        }

        self.sync_edges();
        let Self { drag, core, .. } = self;
        if absorb("touch", || drag.process_touch_event(event, core)).is_some() {
            true
        } else {
            self.abandon_gesture();
            false
        }
    }

    /// Per-frame step. Returns true while the content is still settling; the
    /// host must call again on the next display refresh.
    pub fn advance_frame(&mut self) -> bool {
        self.core.refresh_scrim();
        let running = self.drag.continue_settling(&mut self.core);
        if running {
            self.core.controller.request_redraw();
        }
        running
    }

    /// Returns and clears the pending redraw request.
    pub fn take_redraw_request(&self) -> bool {
        self.core.controller.take_redraw_request()
    }

    /// Slide the content off through `edge` and finish.
    ///
    /// `edge` must name exactly one of [`EdgeFlags::LEFT`] or
    /// [`EdgeFlags::RIGHT`]; anything else is logged and ignored.
    pub fn swipe_to_finish(&mut self, edge: EdgeFlags) {
        let Some(edge) = Edge::from_flags(edge) else {
            log::error!("invalid edge for swipe_to_finish: {edge:?}");
            return;
        };
        if self.core.content().is_none() {
            log::warn!("swipe_to_finish called without content");
            return;
        }

        let target = self.core.dismiss_target(edge);
        self.drag.smooth_slide_to(target, &mut self.core);
        self.core.controller.request_redraw();
    }

    fn sync_edges(&mut self) {
        let edges = self.core.controller.edges();
        if self.drag.tracking_edges() != edges {
            self.drag.set_edge_tracking_enabled(edges);
        }
    }

    fn abandon_gesture(&mut self) {
        let Self { drag, core, .. } = self;
        let _ = absorb("abandon", || {
            drag.abandon(core);
            Ok(())
        });
    }

    // --- drawing ---

    pub fn draw(&self) -> Scene {
        let mut scene = Scene::default();
        let (Some(id), Some(content)) = (self.core.content_id(), self.core.content()) else {
            return scene;
        };

        scene.push(SceneNode::Child {
            id,
            rect: content,
            background: self.background,
        });

        if self.core.scrim_opacity() > 0.0 && self.drag.state() != DragState::Idle {
            self.draw_scrim(&mut scene, content);
            self.draw_shadow(&mut scene, content);
        }
        scene
    }

    fn draw_scrim(&self, scene: &mut Scene, content: Rect) {
        let bounds = Rect::from_size(self.size);
        let color = self
            .core
            .controller
            .scrim_color()
            .scale_alpha(self.core.scrim_opacity());

        let clip = match self.core.tracking.locked() {
            Some(Edge::Left) => Some(bounds.with_horizontal_span(0.0, content.x)),
            Some(Edge::Right) => Some(bounds.with_horizontal_span(content.right(), bounds.w)),
            None => None,
        };
        match clip {
            Some(clip) => {
                scene.push(SceneNode::PushClip { rect: clip });
                scene.push(SceneNode::Rect {
                    rect: bounds,
                    color,
                });
                scene.push(SceneNode::PopClip);
            }
            None => scene.push(SceneNode::Rect {
                rect: bounds,
                color,
            }),
        }
    }

    fn draw_shadow(&self, scene: &mut Scene, content: Rect) {
        let edges = self.core.controller.edges();
        let alpha = (self.core.scrim_opacity().clamp(0.0, 1.0) * 255.0) as u8;

        if edges.contains(EdgeFlags::LEFT) {
            let w = self.core.shadow(Edge::Left).width;
            scene.push(SceneNode::Shadow {
                side: ShadowSide::Left,
                rect: Rect::new(content.x - w, content.y, w, content.h),
                alpha,
            });
        }
        if edges.contains(EdgeFlags::RIGHT) {
            let w = self.core.shadow(Edge::Right).width;
            scene.push(SceneNode::Shadow {
                side: ShadowSide::Right,
                rect: Rect::new(content.right(), content.y, w, content.h),
                alpha,
            });
        }
    }
}

/// Runs a drag-engine step, turning errors and panics into `None`.
///
/// Gesture faults must never take the host screen down with them.
fn absorb<T>(what: &str, f: impl FnOnce() -> Result<T>) -> Option<T> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(err)) => {
            log::warn!("{what} failed, gesture dropped: {err}");
            None
        }
        Err(payload) => {
            log::error!(
                "{what} panicked, gesture dropped: {}",
                panic_message(payload.as_ref())
            );
            None
        }
    }
}

