use serde::{Deserialize, Serialize};
use swipeback_core::{Color, SwipeError};

use crate::edge::EdgeFlags;

pub const DEFAULT_THRESHOLD: f32 = 0.3;
pub const DEFAULT_SCRIM_ARGB: u32 = 0x9900_0000;
pub const DEFAULT_SHADOW_WIDTH: f32 = 16.0;
/// Width of the strip along each edge that can start a swipe.
pub const DEFAULT_EDGE_SIZE: f32 = 20.0;
/// Matches common platform touch slop (about 8dp).
pub const DEFAULT_TOUCH_SLOP: f32 = 8.0;
pub const DEFAULT_MIN_FLING_VELOCITY: f32 = 50.0;
pub const DEFAULT_MAX_FLING_VELOCITY: f32 = 8_000.0;
/// Extra distance past the shadow so a committed swipe ends fully off screen.
pub const OVERSCROLL_DISTANCE: f32 = 10.0;

/// Directional shadow image drawn beside the content while swiping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub width: f32,
}

impl Shadow {
    pub fn new(width: f32) -> Self {
        Self { width }
    }

    fn validate(&self) -> Result<(), SwipeError> {
        if self.width.is_finite() && self.width >= 0.0 {
            Ok(())
        } else {
            Err(SwipeError::InvalidShadow(self.width))
        }
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::new(DEFAULT_SHADOW_WIDTH)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    pub edges: EdgeFlags,
    pub threshold: f32,
    pub enabled: bool,
    pub scrim_color: Color,
    pub shadow_left: Shadow,
    pub shadow_right: Shadow,
    pub edge_size: f32,
    pub touch_slop: f32,
    pub min_fling_velocity: f32,
    pub max_fling_velocity: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            edges: EdgeFlags::LEFT,
            threshold: DEFAULT_THRESHOLD,
            enabled: true,
            scrim_color: Color::from_argb(DEFAULT_SCRIM_ARGB),
            shadow_left: Shadow::default(),
            shadow_right: Shadow::default(),
            edge_size: DEFAULT_EDGE_SIZE,
            touch_slop: DEFAULT_TOUCH_SLOP,
            min_fling_velocity: DEFAULT_MIN_FLING_VELOCITY,
            max_fling_velocity: DEFAULT_MAX_FLING_VELOCITY,
        }
    }
}

impl SwipeConfig {
    pub fn validate(&self) -> Result<(), SwipeError> {
        validate_threshold(self.threshold)?;
        self.shadow_left.validate()?;
        self.shadow_right.validate()?;
        if !(self.edge_size > 0.0) {
            return Err(SwipeError::Config(format!(
                "edge_size must be positive, got {}",
                self.edge_size
            )));
        }
        if !(self.touch_slop >= 0.0) {
            return Err(SwipeError::Config(format!(
                "touch_slop must be non-negative, got {}",
                self.touch_slop
            )));
        }
        if !(self.min_fling_velocity >= 0.0 && self.max_fling_velocity >= self.min_fling_velocity)
        {
            return Err(SwipeError::Config(format!(
                "fling velocity range {}..{} is empty",
                self.min_fling_velocity, self.max_fling_velocity
            )));
        }
        Ok(())
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, SwipeError> {
        let config: SwipeConfig =
            serde_json::from_str(json).map_err(|e| SwipeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn validate_threshold(threshold: f32) -> Result<(), SwipeError> {
    // NaN fails both comparisons and is rejected too.
    if threshold > 0.0 && threshold < 1.0 {
        Ok(())
    } else {
        Err(SwipeError::InvalidThreshold(threshold))
    }
}
