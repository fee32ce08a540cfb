use crate::input::PointerId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwipeError {
    #[error("threshold {0} must lie strictly between 0 and 1")]
    InvalidThreshold(f32),

    #[error("shadow width {0} must be finite and non-negative")]
    InvalidShadow(f32),

    #[error("pointer {0:?} is not being tracked")]
    UntrackedPointer(PointerId),

    #[error("pointer event has non-finite coordinates ({x}, {y})")]
    NonFiniteCoordinates { x: f32, y: f32 },

    #[error("swipe layout is already attached to a screen")]
    AlreadyAttached,

    #[error("screen has no content view to attach")]
    MissingContent,

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = SwipeError> = std::result::Result<T, E>;

/// Best-effort text for a caught panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}
