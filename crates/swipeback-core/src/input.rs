use crate::Vec2;
use web_time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample delivered by the host surface.
///
/// `position` is in the coordinate space of the swipe container. `time` is the
/// event timestamp measured from any fixed origin; only differences matter.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub event: PointerEventKind,
    pub position: Vec2,
    pub time: Duration,
}

impl PointerEvent {
    pub fn new(id: PointerId, event: PointerEventKind, position: Vec2, time: Duration) -> Self {
        Self {
            id,
            event,
            position,
            time,
        }
    }

    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::primary(PointerEventKind::Down, x, y, time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        Self::primary(PointerEventKind::Move, x, y, time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self::primary(PointerEventKind::Up, x, y, time_ms)
    }

    pub fn cancel(x: f32, y: f32, time_ms: u64) -> Self {
        Self::primary(PointerEventKind::Cancel, x, y, time_ms)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    fn primary(event: PointerEventKind, x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(
            PointerId(0),
            event,
            Vec2 { x, y },
            Duration::from_millis(time_ms),
        )
    }
}
