//! # Drag engine
//!
//! `DragHelper` turns a pointer stream into a single captured horizontal drag
//! of the content and a settle animation afterwards. It owns no geometry of
//! its own: the content frame, capture policy, clamping and release decision
//! all come from a [`DragCallback`], which the swipe layout implements.
//!
//! Two entry points see pointer events:
//!
//! - [`DragHelper::should_intercept`] runs while descendants may still claim
//!   the gesture. It only captures once the pointer is past touch slop and a
//!   clamped move would actually shift the content.
//! - [`DragHelper::process_touch_event`] runs once the layout owns the
//!   gesture. A touch that lands on the content may capture immediately.
//!
//! After release the content settles with a [`Scroller`]; the host advances it
//! by calling [`DragHelper::continue_settling`] once per frame.

use std::rc::Rc;

use swipeback_core::{
    Clock, PointerEvent, PointerEventKind, PointerId, Rect, Result, Scroller, SwipeError, Vec2,
    VelocityTracker, clamp_magnitude,
};
use web_time::Duration;

use crate::config::SwipeConfig;
use crate::edge::EdgeFlags;

const BASE_SETTLE_DURATION_MS: f32 = 256.0;
const MAX_SETTLE_DURATION_MS: f32 = 600.0;

/// Coarse state of the drag engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragState {
    Idle,
    Dragging,
    Settling,
}

/// Policy hooks the drag engine calls back into.
pub trait DragCallback {
    /// Current frame of the draggable content, `None` when nothing is attached.
    fn content(&self) -> Option<Rect>;

    /// Whether `pointer` may start dragging the content.
    fn try_capture(&mut self, helper: &DragHelper, pointer: PointerId) -> bool;

    /// Horizontal distance the content can travel; zero disables dragging.
    fn horizontal_drag_range(&self) -> f32;

    /// Clamp a proposed content left edge.
    fn clamp_horizontal(&self, helper: &DragHelper, left: f32, dx: f32) -> f32;

    fn on_position_changed(&mut self, helper: &DragHelper, left: f32, top: f32, dx: f32);

    /// The captured pointer was released. Returns the left edge to settle at.
    fn on_released(&mut self, helper: &DragHelper, xvel: f32, yvel: f32) -> f32;

    fn on_drag_state_changed(&mut self, state: DragState);
}

#[derive(Clone, Copy, Debug)]
struct PointerTrack {
    id: PointerId,
    initial: Vec2,
    last: Vec2,
    edges_touched: EdgeFlags,
}

pub struct DragHelper {
    state: DragState,
    touch_slop: f32,
    edge_size: f32,
    min_velocity: f32,
    max_velocity: f32,
    tracking_edges: EdgeFlags,
    bounds: Rect,
    pointer: Option<PointerTrack>,
    active_pointer: Option<PointerId>,
    captured: bool,
    velocity: VelocityTracker,
    scroller: Scroller,
    clock: Rc<dyn Clock>,
}

impl DragHelper {
    pub fn new(config: &SwipeConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            state: DragState::Idle,
            touch_slop: config.touch_slop,
            edge_size: config.edge_size,
            min_velocity: config.min_fling_velocity,
            max_velocity: config.max_fling_velocity,
            tracking_edges: config.edges,
            bounds: Rect::default(),
            pointer: None,
            active_pointer: None,
            captured: false,
            velocity: VelocityTracker::new(),
            scroller: Scroller::default(),
            clock,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn touch_slop(&self) -> f32 {
        self.touch_slop
    }

    /// Container bounds; edge strips are measured from these.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn set_edge_tracking_enabled(&mut self, edges: EdgeFlags) {
        self.tracking_edges = edges;
    }

    pub fn tracking_edges(&self) -> EdgeFlags {
        self.tracking_edges
    }

    /// Whether the current gesture went down inside any of `edges`' strips.
    pub fn is_edge_touched(&self, edges: EdgeFlags) -> bool {
        self.pointer
            .is_some_and(|p| p.edges_touched.intersects(edges))
    }

    pub fn is_edge_touched_by(&self, edges: EdgeFlags, pointer: PointerId) -> bool {
        self.pointer
            .is_some_and(|p| p.id == pointer && p.edges_touched.intersects(edges))
    }

    /// Forget the current pointer stream. Does not touch the drag state.
    pub fn cancel(&mut self) {
        self.pointer = None;
        self.active_pointer = None;
        self.velocity.clear();
    }

    /// Stop everything in place and go idle, without a position update.
    pub fn abort(&mut self, cb: &mut dyn DragCallback) {
        self.cancel();
        self.scroller.stop();
        self.set_drag_state(DragState::Idle, cb);
    }

    /// Drop the pointer stream; a drag in progress settles back to rest.
    pub fn abandon(&mut self, cb: &mut dyn DragCallback) {
        let was_dragging = self.state == DragState::Dragging;
        self.cancel();
        if was_dragging {
            self.settle_captured_at(0.0, 0.0, 0.0, cb);
        }
    }

    /// Interception test. Returns whether the drag engine now owns the gesture.
    pub fn should_intercept(
        &mut self,
        event: &PointerEvent,
        cb: &mut dyn DragCallback,
    ) -> Result<bool> {
        check_finite(event)?;
        let pos = event.position;

        match event.event {
            PointerEventKind::Down => {
                if self.is_secondary_down(event) {
                    return Ok(self.state == DragState::Dragging);
                }
                self.begin_gesture(event);

                // Catch content that is still settling from a previous gesture.
                if self.state == DragState::Settling
                    && cb.content().is_some_and(|r| r.contains(pos))
                {
                    self.try_capture_for_dragging(event.id, cb);
                }
            }
            PointerEventKind::Move => {
                let Some(track) = self.track(event)? else {
                    return Ok(self.state == DragState::Dragging);
                };
                self.velocity.add(pos, event.time);
                self.check_intercept_capture(track, pos, event.id, cb);
                self.save_last_motion(pos);
            }
            PointerEventKind::Up | PointerEventKind::Cancel => self.cancel(),
        }

        Ok(self.state == DragState::Dragging)
    }

    fn check_intercept_capture(
        &mut self,
        track: PointerTrack,
        pos: Vec2,
        pointer: PointerId,
        cb: &mut dyn DragCallback,
    ) {
        let dx = pos.x - track.initial.x;
        let Some(content) = cb.content() else {
            return;
        };
        let past_slop = content.contains(track.initial) && self.check_touch_slop(cb, dx);

        if past_slop {
            // Only claim the gesture if the content can actually move that way.
            let old_left = content.x;
            let new_left = cb.clamp_horizontal(self, old_left + dx, dx);
            if cb.horizontal_drag_range() == 0.0 || new_left == old_left {
                return;
            }
        }
        if self.state == DragState::Dragging {
            return;
        }
        if past_slop {
            self.try_capture_for_dragging(pointer, cb);
        }
    }

    /// Event handling once the layout owns the gesture.
    pub fn process_touch_event(
        &mut self,
        event: &PointerEvent,
        cb: &mut dyn DragCallback,
    ) -> Result<()> {
        check_finite(event)?;
        let pos = event.position;

        match event.event {
            PointerEventKind::Down => {
                if self.is_secondary_down(event) {
                    return Ok(());
                }
                self.begin_gesture(event);
                if cb.content().is_some_and(|r| r.contains(pos)) {
                    self.try_capture_for_dragging(event.id, cb);
                }
            }
            PointerEventKind::Move => {
                let Some(track) = self.track(event)? else {
                    return Ok(());
                };
                self.velocity.add(pos, event.time);

                if self.state == DragState::Dragging {
                    if self.active_pointer == Some(event.id)
                        && let Some(content) = cb.content()
                    {
                        let dx = pos.x - track.last.x;
                        self.drag_to(content.x + dx, dx, cb);
                    }
                } else {
                    let dx = pos.x - track.initial.x;
                    let under = cb.content().is_some_and(|r| r.contains(pos));
                    if under && self.check_touch_slop(cb, dx) {
                        self.try_capture_for_dragging(event.id, cb);
                    }
                }
                self.save_last_motion(pos);
            }
            PointerEventKind::Up => {
                if self.track(event)?.is_none() {
                    return Ok(());
                }
                self.velocity.add(pos, event.time);
                if self.state == DragState::Dragging {
                    self.release_for_pointer_up(cb);
                }
                self.cancel();
            }
            PointerEventKind::Cancel => {
                if self.track(event)?.is_none() {
                    return Ok(());
                }
                self.abandon(cb);
            }
        }
        Ok(())
    }

    /// Slide the content to `final_left` without a pointer. Returns whether a
    /// settle is now running; if so call [`continue_settling`](Self::continue_settling)
    /// every frame.
    pub fn smooth_slide_to(&mut self, final_left: f32, cb: &mut dyn DragCallback) -> bool {
        if cb.content().is_none() {
            return false;
        }
        self.captured = true;
        self.active_pointer = None;

        let running = self.settle_captured_at(final_left, 0.0, 0.0, cb);
        if !running && self.state == DragState::Idle {
            self.captured = false;
        }
        running
    }

    /// Per-frame settle step. Returns true while more frames are needed.
    pub fn continue_settling(&mut self, cb: &mut dyn DragCallback) -> bool {
        if self.state != DragState::Settling {
            return false;
        }
        let Some(content) = cb.content() else {
            self.scroller.stop();
            self.set_drag_state(DragState::Idle, cb);
            return false;
        };

        let mut keep_going = self.scroller.compute(self.clock.now());
        let x = self.scroller.current().x;
        let dx = x - content.x;
        if dx != 0.0 {
            cb.on_position_changed(self, x, content.y, dx);
        }

        if keep_going && x == self.scroller.final_position().x {
            self.scroller.abort();
            keep_going = false;
        }
        if !keep_going {
            self.set_drag_state(DragState::Idle, cb);
        }
        self.state == DragState::Settling
    }

    fn begin_gesture(&mut self, event: &PointerEvent) {
        self.cancel();
        let pos = event.position;
        self.pointer = Some(PointerTrack {
            id: event.id,
            initial: pos,
            last: pos,
            edges_touched: self.edges_touched(pos),
        });
        self.velocity.add(pos, event.time);
        log::trace!(
            "gesture down at ({}, {}), edges {:?}",
            pos.x,
            pos.y,
            self.pointer.map(|p| p.edges_touched)
        );
    }

    fn is_secondary_down(&self, event: &PointerEvent) -> bool {
        self.state == DragState::Dragging && self.active_pointer.is_some_and(|id| id != event.id)
    }

    /// `Ok(None)` for a pointer other than the tracked one.
    fn track(&self, event: &PointerEvent) -> Result<Option<PointerTrack>> {
        match self.pointer {
            None => Err(SwipeError::UntrackedPointer(event.id)),
            Some(p) if p.id != event.id => Ok(None),
            Some(p) => Ok(Some(p)),
        }
    }

    fn save_last_motion(&mut self, pos: Vec2) {
        if let Some(p) = self.pointer.as_mut() {
            p.last = pos;
        }
    }

    fn edges_touched(&self, pos: Vec2) -> EdgeFlags {
        let mut edges = EdgeFlags::empty();
        if pos.x < self.bounds.x + self.edge_size {
            edges |= EdgeFlags::LEFT;
        }
        if pos.x > self.bounds.right() - self.edge_size {
            edges |= EdgeFlags::RIGHT;
        }
        edges
    }

    // The content never moves vertically, so only horizontal slop counts.
    fn check_touch_slop(&self, cb: &dyn DragCallback, dx: f32) -> bool {
        cb.horizontal_drag_range() > 0.0 && dx.abs() > self.touch_slop
    }

    fn try_capture_for_dragging(&mut self, pointer: PointerId, cb: &mut dyn DragCallback) -> bool {
        if self.captured && self.active_pointer == Some(pointer) {
            return true;
        }
        if cb.try_capture(self, pointer) {
            self.active_pointer = Some(pointer);
            self.captured = true;
            self.set_drag_state(DragState::Dragging, cb);
            return true;
        }
        false
    }

    fn drag_to(&mut self, left: f32, dx: f32, cb: &mut dyn DragCallback) {
        let Some(content) = cb.content() else {
            return;
        };
        if dx == 0.0 {
            return;
        }
        let old_left = content.x;
        let clamped = cb.clamp_horizontal(self, left, dx);
        if clamped != old_left {
            cb.on_position_changed(self, clamped, content.y, clamped - old_left);
        }
    }

    fn release_for_pointer_up(&mut self, cb: &mut dyn DragCallback) {
        let v = self.velocity.velocity();
        let xvel = clamp_magnitude(v.x, self.min_velocity, self.max_velocity);
        let yvel = clamp_magnitude(v.y, self.min_velocity, self.max_velocity);
        log::debug!("released with velocity ({xvel}, {yvel})");

        let target = cb.on_released(self, xvel, yvel);
        self.settle_captured_at(target, xvel, yvel, cb);
        if self.state == DragState::Dragging {
            self.set_drag_state(DragState::Idle, cb);
        }
    }

    fn settle_captured_at(
        &mut self,
        final_left: f32,
        xvel: f32,
        yvel: f32,
        cb: &mut dyn DragCallback,
    ) -> bool {
        let Some(content) = cb.content() else {
            self.set_drag_state(DragState::Idle, cb);
            return false;
        };
        let dx = final_left - content.x;
        if dx == 0.0 {
            self.scroller.stop();
            self.set_drag_state(DragState::Idle, cb);
            return false;
        }

        let duration = self.settle_duration(dx, xvel, yvel, cb.horizontal_drag_range());
        log::debug!(
            "settling from {} to {final_left} over {duration:?}",
            content.x
        );
        self.scroller.start(
            Vec2::new(content.x, content.y),
            Vec2::new(dx, 0.0),
            duration,
            self.clock.now(),
        );
        self.set_drag_state(DragState::Settling, cb);
        true
    }

    fn settle_duration(&self, dx: f32, xvel: f32, yvel: f32, range: f32) -> Duration {
        let xvel = clamp_magnitude(xvel, self.min_velocity, self.max_velocity);
        let yvel = clamp_magnitude(yvel, self.min_velocity, self.max_velocity);

        // Vertical motion is always zero; it only dilutes the horizontal
        // weight when the release had a vertical velocity component.
        let x_weight = if xvel != 0.0 {
            xvel.abs() / (xvel.abs() + yvel.abs())
        } else {
            1.0
        };
        let ms = self.axis_duration(dx, xvel, range) * x_weight;
        Duration::from_millis(ms.round() as u64)
    }

    fn axis_duration(&self, delta: f32, velocity: f32, motion_range: f32) -> f32 {
        if delta == 0.0 {
            return 0.0;
        }

        let width = self.bounds.w;
        let half = width / 2.0;
        let ratio = (delta.abs() / width).min(1.0);
        let distance = half + half * distance_influence(ratio);

        let velocity = velocity.abs();
        let ms = if velocity > 0.0 {
            4.0 * (1000.0 * (distance / velocity).abs()).round()
        } else if motion_range > 0.0 {
            (delta.abs() / motion_range + 1.0) * BASE_SETTLE_DURATION_MS
        } else {
            MAX_SETTLE_DURATION_MS
        };
        ms.min(MAX_SETTLE_DURATION_MS)
    }

    fn set_drag_state(&mut self, state: DragState, cb: &mut dyn DragCallback) {
        if self.state == state {
            return;
        }
        log::debug!("drag state {:?} -> {:?}", self.state, state);
        self.state = state;
        cb.on_drag_state_changed(state);
        if state == DragState::Idle {
            self.captured = false;
        }
    }
}

/// Longer throws settle a little slower: centres the ratio on 0.5 and
/// eases it through a quarter sine.
fn distance_influence(ratio: f32) -> f32 {
    ((ratio - 0.5) * 0.3 * std::f32::consts::FRAC_PI_2).sin()
}

fn check_finite(event: &PointerEvent) -> Result<()> {
    if event.position.is_finite() {
        Ok(())
    } else {
        Err(SwipeError::NonFiniteCoordinates {
            x: event.position.x,
            y: event.position.y,
        })
    }
}
