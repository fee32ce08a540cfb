//! # Core types
//!
//! Platform-neutral building blocks shared by the swipe layer:
//!
//! - `Vec2`, `Size`, `Rect`: geometry in container pixels.
//! - `Color`: RGBA colour with packed ARGB conversions.
//! - `PointerEvent`: the single-pointer input stream a host delivers.
//! - `Scroller` + `Clock`: the settle primitive, advanced once per frame.
//! - `VelocityTracker`: release velocity for fling decisions.
//! - `Scene` / `SceneNode`: draw commands handed back to the host.
//! - `SwipeError`: every error the swipe layer can report.
//!
//! Everything here is single-threaded: types use `Cell`/`Rc` rather than
//! locks, and nothing spawns work off the UI thread.
//!
//! ```rust
//! use swipeback_core::*;
//! use web_time::{Duration, Instant};
//!
//! let clock = ManualClock::new(Instant::now());
//! let mut s = Scroller::default();
//! s.start(Vec2::ZERO, Vec2::new(100.0, 0.0), Duration::from_millis(200), clock.now());
//! clock.advance(Duration::from_millis(250));
//! assert!(s.compute(clock.now()));
//! assert_eq!(s.current().x, 100.0);
//! ```

pub mod animation;
pub mod color;
pub mod error;
pub mod geometry;
pub mod input;
pub mod velocity;
pub mod view;

pub use animation::*;
pub use color::*;
pub use error::{Result, SwipeError};
pub use geometry::*;
pub use input::*;
pub use velocity::*;
pub use view::*;
