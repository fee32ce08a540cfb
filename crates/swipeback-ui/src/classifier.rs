use swipeback_core::{PointerEvent, PointerEventKind, Vec2};

/// Vertical movement must beat horizontal by this factor to lock the axis.
/// Biased towards vertical so nested lists keep their scroll.
pub const VERTICAL_BIAS: f32 = 1.5;

/// Decides, once per gesture, whether the pointer is scrolling vertically.
///
/// Undecided until a sample moves further than touch slop vertically and more
/// than [`VERTICAL_BIAS`] times its horizontal distance from the down point.
/// The lock is never revisited until the next down.
#[derive(Debug, Default)]
pub struct AxisClassifier {
    origin: Vec2,
    locked_vertical: bool,
}

impl AxisClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, origin: Vec2) {
        self.origin = origin;
        self.locked_vertical = false;
    }

    /// Feeds one event; returns whether the gesture is locked vertical.
    pub fn observe(&mut self, event: &PointerEvent, touch_slop: f32) -> bool {
        match event.event {
            PointerEventKind::Down => self.begin(event.position),
            _ if !self.locked_vertical => {
                let dx = (event.position.x - self.origin.x).abs();
                let dy = (event.position.y - self.origin.y).abs();
                self.locked_vertical = dy > touch_slop && dy > VERTICAL_BIAS * dx;
            }
            _ => {}
        }
        self.locked_vertical
    }

    pub fn is_locked_vertical(&self) -> bool {
        self.locked_vertical
    }
}
