use std::cell::Cell;
use web_time::{Duration, Instant};

use crate::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Easing {
    Linear,
    /// Quintic ease-out, `(t - 1)^5 + 1`.
    QuinticOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::QuinticOut => {
                let t = t - 1.0;
                t * t * t * t * t + 1.0
            }
        }
    }
}

// Animation clock
pub trait Clock: 'static {
    fn now(&self) -> Instant;
}

pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A test clock you can drive deterministically.
pub struct ManualClock {
    t: Cell<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl ManualClock {
    pub fn new(t: Instant) -> Self {
        Self { t: Cell::new(t) }
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}

/// Time-based slide from a start point by a fixed delta.
///
/// The scroller does not drive itself: callers invoke [`Scroller::compute`]
/// once per frame and read [`Scroller::current`] afterwards.
#[derive(Debug)]
pub struct Scroller {
    start: Vec2,
    delta: Vec2,
    current: Vec2,
    duration: Duration,
    easing: Easing,
    start_time: Option<Instant>,
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new(Easing::QuinticOut)
    }
}

impl Scroller {
    pub fn new(easing: Easing) -> Self {
        Self {
            start: Vec2::ZERO,
            delta: Vec2::ZERO,
            current: Vec2::ZERO,
            duration: Duration::ZERO,
            easing,
            start_time: None,
        }
    }

    pub fn start(&mut self, from: Vec2, delta: Vec2, duration: Duration, now: Instant) {
        self.start = from;
        self.delta = delta;
        self.current = from;
        self.duration = duration;
        self.start_time = Some(now);
    }

    /// Advances to `now`. Returns false once the slide had already finished
    /// before this call; the call that reaches the end still returns true.
    pub fn compute(&mut self, now: Instant) -> bool {
        let Some(start) = self.start_time else {
            return false;
        };

        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.duration {
            let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
            let eased = self.easing.interpolate(t);
            self.current = Vec2 {
                x: self.start.x + self.delta.x * eased,
                y: self.start.y + self.delta.y * eased,
            };
        } else {
            self.current = self.final_position();
            self.start_time = None;
        }
        true
    }

    /// Jumps to the final position and stops.
    pub fn abort(&mut self) {
        self.current = self.final_position();
        self.start_time = None;
    }

    /// Stops where it is, without jumping.
    pub fn stop(&mut self) {
        self.start_time = None;
    }

    pub fn current(&self) -> Vec2 {
        self.current
    }

    pub fn final_position(&self) -> Vec2 {
        Vec2 {
            x: self.start.x + self.delta.x,
            y: self.start.y + self.delta.y,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.start_time.is_none()
    }
}
