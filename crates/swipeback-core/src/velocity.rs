//! Pointer velocity estimation for fling detection.

use smallvec::SmallVec;
use web_time::Duration;

use crate::Vec2;

/// Samples older than this, relative to the newest, are ignored.
const HORIZON: Duration = Duration::from_millis(100);
/// A gap this long between samples means the pointer stopped moving.
const ASSUME_STOPPED: Duration = Duration::from_millis(40);
const MAX_SAMPLES: usize = 20;

#[derive(Clone, Copy, Debug)]
struct Sample {
    position: Vec2,
    time: Duration,
}

#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[Sample; MAX_SAMPLES]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn add(&mut self, position: Vec2, time: Duration) {
        if let Some(last) = self.samples.last()
            && time.saturating_sub(last.time) > ASSUME_STOPPED
        {
            self.samples.clear();
        }
        if self.samples.len() == MAX_SAMPLES {
            self.samples.remove(0);
        }
        self.samples.push(Sample { position, time });
    }

    /// Velocity in pixels per second at the newest sample.
    ///
    /// Each axis is a least-squares slope over the samples within the horizon,
    /// starting from that axis's last turning point so a reversal just before
    /// release reports the new direction. Zero with fewer than two usable
    /// samples.
    pub fn velocity(&self) -> Vec2 {
        let Some(newest) = self.samples.last() else {
            return Vec2::ZERO;
        };
        let recent = self
            .samples
            .iter()
            .position(|s| newest.time.saturating_sub(s.time) <= HORIZON)
            .unwrap_or(self.samples.len());
        let window = &self.samples[recent..];

        Vec2 {
            x: axis_velocity(window, |s| s.position.x),
            y: axis_velocity(window, |s| s.position.y),
        }
    }
}

/// Index of the first sample of the final monotonic run along one axis.
fn last_run_start(window: &[Sample], axis: impl Fn(&Sample) -> f32) -> usize {
    let mut direction = 0.0f32;
    for i in (1..window.len()).rev() {
        let d = axis(&window[i]) - axis(&window[i - 1]);
        if d == 0.0 {
            continue;
        }
        if direction == 0.0 {
            direction = d.signum();
        } else if d.signum() != direction {
            return i;
        }
    }
    0
}

fn axis_velocity(window: &[Sample], axis: impl Fn(&Sample) -> f32) -> f32 {
    let run = &window[last_run_start(window, &axis)..];
    let Some(newest) = run.last() else {
        return 0.0;
    };
    if run.len() < 2 {
        return 0.0;
    }

    // Times relative to the newest sample, in seconds (all <= 0).
    let t = |s: &Sample| -(newest.time.saturating_sub(s.time).as_secs_f32());
    let n = run.len() as f32;
    let mean_t = run.iter().map(&t).sum::<f32>() / n;
    let mean_p = run.iter().map(&axis).sum::<f32>() / n;

    let (mut cov, mut var) = (0.0, 0.0);
    for s in run {
        let dt = t(s) - mean_t;
        cov += dt * (axis(s) - mean_p);
        var += dt * dt;
    }
    if var <= 0.0 { 0.0 } else { cov / var }
}

/// Zeroes magnitudes below `min` and caps magnitudes above `max`, keeping sign.
pub fn clamp_magnitude(value: f32, min: f32, max: f32) -> f32 {
    let abs = value.abs();
    if abs < min {
        0.0
    } else if abs > max {
        max.copysign(value)
    } else {
        value
    }
}
