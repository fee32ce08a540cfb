use smallvec::SmallVec;
use swipeback_core::{PointerId, Rect, Size, ViewId};

use crate::config::{OVERSCROLL_DISTANCE, Shadow, SwipeConfig};
use crate::controller::SwipeController;
use crate::drag::{DragCallback, DragHelper, DragState};
use crate::edge::{Edge, EdgeFlags, EdgeTracking};

/// Progress of a drag: `|offset| / (content_width + shadow_width)`.
///
/// Zero when the denominator is not positive.
pub fn swipe_percent(offset: f32, content_width: f32, shadow_width: f32) -> f32 {
    let range = content_width + shadow_width;
    if range > 0.0 {
        (offset / range).abs()
    } else {
        0.0
    }
}

/// Swipe state machine. Owns the content frame and derives progress from it.
pub(crate) struct SwipeCore {
    pub(crate) controller: SwipeController,
    shadow_left: Shadow,
    shadow_right: Shadow,
    children: SmallVec<[ViewId; 1]>,
    content_size: Size,
    content_left: f32,
    content_top: f32,
    pub(crate) tracking: EdgeTracking,
    percent: f32,
    scrim_opacity: f32,
    over_threshold_armed: bool,
    finished: bool,
}

impl SwipeCore {
    pub(crate) fn new(config: &SwipeConfig, controller: SwipeController) -> Self {
        Self {
            controller,
            shadow_left: config.shadow_left,
            shadow_right: config.shadow_right,
            children: SmallVec::new(),
            content_size: Size::default(),
            content_left: 0.0,
            content_top: 0.0,
            tracking: EdgeTracking::Probing,
            percent: 0.0,
            scrim_opacity: 0.0,
            over_threshold_armed: true,
            finished: false,
        }
    }

    pub(crate) fn shadow(&self, edge: Edge) -> Shadow {
        match edge {
            Edge::Left => self.shadow_left,
            Edge::Right => self.shadow_right,
        }
    }

    pub(crate) fn content_id(&self) -> Option<ViewId> {
        self.children.first().copied()
    }

    pub(crate) fn children(&self) -> &[ViewId] {
        &self.children
    }

    pub(crate) fn add_child(&mut self, id: ViewId) {
        self.children.push(id);
    }

    /// Returns whether `id` was the content.
    pub(crate) fn remove_child(&mut self, id: ViewId) -> bool {
        let Some(index) = self.children.iter().position(|c| *c == id) else {
            return false;
        };
        self.children.remove(index);
        index == 0
    }

    pub(crate) fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    /// Back to rest: no offset, no progress, no tracked edge.
    pub(crate) fn reset_offset(&mut self) {
        self.content_left = 0.0;
        self.content_top = 0.0;
        self.percent = 0.0;
        self.scrim_opacity = 0.0;
        self.tracking = EdgeTracking::Probing;
    }

    pub(crate) fn percent(&self) -> f32 {
        self.percent
    }

    pub(crate) fn scrim_opacity(&self) -> f32 {
        self.scrim_opacity
    }

    pub(crate) fn refresh_scrim(&mut self) {
        self.scrim_opacity = 1.0 - self.percent;
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Edge whose strip the current touch is in, for clamping before capture.
    fn probe_edge(&self, helper: &DragHelper) -> Option<Edge> {
        let edges = self.controller.edges();
        if edges.contains(EdgeFlags::LEFT) && helper.is_edge_touched(EdgeFlags::LEFT) {
            Some(Edge::Left)
        } else if edges.contains(EdgeFlags::RIGHT) && helper.is_edge_touched(EdgeFlags::RIGHT) {
            Some(Edge::Right)
        } else {
            None
        }
    }

    fn dismissed_offset(&self, edge: Edge) -> f32 {
        edge.sign() * (self.content_size.width + self.shadow(edge).width + OVERSCROLL_DISTANCE)
    }

    pub(crate) fn dismiss_target(&mut self, edge: Edge) -> f32 {
        self.tracking = EdgeTracking::Locked(edge);
        self.dismissed_offset(edge)
    }
}

impl DragCallback for SwipeCore {
    fn content(&self) -> Option<Rect> {
        self.content_id().map(|_| {
            Rect::new(
                self.content_left,
                self.content_top,
                self.content_size.width,
                self.content_size.height,
            )
        })
    }

    fn try_capture(&mut self, helper: &DragHelper, pointer: PointerId) -> bool {
        let edges = self.controller.edges();
        if !helper.is_edge_touched_by(edges, pointer) {
            return false;
        }
        let edge = if edges.contains(EdgeFlags::LEFT)
            && helper.is_edge_touched_by(EdgeFlags::LEFT, pointer)
        {
            Edge::Left
        } else {
            Edge::Right
        };
        log::debug!("captured swipe from {edge:?} edge");
        self.tracking = EdgeTracking::Locked(edge);
        // Every session starts armed for the threshold notification.
        self.over_threshold_armed = true;
        true
    }

    fn horizontal_drag_range(&self) -> f32 {
        if self.controller.edges().is_empty() {
            0.0
        } else {
            self.content_size.width
        }
    }

    fn clamp_horizontal(&self, helper: &DragHelper, left: f32, _dx: f32) -> f32 {
        let width = self.content_size.width;
        match self.tracking.locked().or_else(|| self.probe_edge(helper)) {
            Some(Edge::Left) => left.max(0.0).min(width),
            Some(Edge::Right) => left.max(-width).min(0.0),
            None => 0.0,
        }
    }

    fn on_position_changed(&mut self, helper: &DragHelper, left: f32, top: f32, _dx: f32) {
        // Read once: a listener changing it below only affects later updates.
        let threshold = self.controller.threshold();

        if let Some(edge) = self.tracking.locked() {
            self.percent = swipe_percent(left, self.content_size.width, self.shadow(edge).width);
        }
        self.content_left = left;
        self.content_top = top;
        self.refresh_scrim();
        self.controller.request_redraw();

        let percent = self.percent;
        if percent < threshold {
            self.over_threshold_armed = true;
        }

        self.controller.notify(|l| l.on_swipe(percent));

        if helper.state() == DragState::Dragging && percent >= threshold && self.over_threshold_armed
        {
            self.over_threshold_armed = false;
            self.controller.notify(|l| l.on_swipe_over_threshold());
        }

        if percent >= 1.0 && !self.finished {
            self.finished = true;
            log::debug!("swipe finished");
            self.controller.notify(|l| l.on_finish());
        }
    }

    fn on_released(&mut self, _helper: &DragHelper, xvel: f32, _yvel: f32) -> f32 {
        let threshold = self.controller.threshold();
        let past_threshold = xvel == 0.0 && self.percent > threshold;

        match self.tracking.locked() {
            Some(edge @ Edge::Left) if xvel > 0.0 || past_threshold => self.dismissed_offset(edge),
            Some(edge @ Edge::Right) if xvel < 0.0 || past_threshold => {
                self.dismissed_offset(edge)
            }
            _ => 0.0,
        }
    }

    fn on_drag_state_changed(&mut self, state: DragState) {
        let edge = self.tracking.locked();
        self.controller.notify(|l| l.on_state_change(edge, state));

        if state == DragState::Idle {
            self.tracking = EdgeTracking::Probing;
        }
        self.controller.request_redraw();
    }
}
