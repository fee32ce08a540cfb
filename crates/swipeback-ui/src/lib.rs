//! # Swipe to dismiss
//!
//! `SwipeBackLayout` wraps a screen's content and lets the user drag it off
//! screen from the left or right edge, revealing whatever is beneath. When the
//! content leaves the screen the layout reports `on_finish` and the host
//! dismisses the screen.
//!
//! The pieces:
//!
//! - `AxisClassifier`: locks a gesture vertical so nested lists keep scrolling.
//! - `DragHelper`: captures one horizontal drag, clamps it, and settles the
//!   content after release.
//! - the swipe state machine: derives progress, tracks the active edge and
//!   notifies `SwipeListener`s.
//! - `SwipeController`: shared settings and listener registry.
//! - `SwipeBackHelper`: attaches a layout to a host `Screen`.
//!
//! ## Driving a layout
//!
//! ```rust
//! use swipeback_core::{PointerEvent, Size};
//! use swipeback_ui::*;
//!
//! let mut layout = SwipeBackLayout::new(SwipeConfig::default()).unwrap();
//! layout.measure(Size::new(400.0, 800.0));
//! layout.add_view(1);
//!
//! // A touch in the left edge strip captures straight away when the layout
//! // itself receives the events.
//! assert!(layout.on_touch_event(&PointerEvent::down(4.0, 300.0, 0)));
//! layout.on_touch_event(&PointerEvent::moved(104.0, 300.0, 16));
//! assert_eq!(layout.content_frame().unwrap().x, 100.0);
//!
//! layout.on_touch_event(&PointerEvent::up(104.0, 300.0, 400));
//! while layout.advance_frame() {
//!     // the host waits for the next display refresh here
//!     # break;
//! }
//! ```
//!
//! ## Listening
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use swipeback_ui::*;
//!
//! #[derive(Default)]
//! struct Progress(Cell<f32>);
//!
//! impl SwipeListener for Progress {
//!     fn on_swipe(&self, percent: f32) {
//!         self.0.set(percent);
//!     }
//! }
//!
//! let mut layout = SwipeBackLayout::new(SwipeConfig::default()).unwrap();
//! layout.add_swipe_listener(Rc::new(Progress::default()));
//! ```

pub mod classifier;
pub mod config;
pub mod controller;
pub mod drag;
pub mod edge;
pub mod host;
pub mod layout;
pub mod listener;
pub mod state;


pub use classifier::AxisClassifier;
pub use config::{Shadow, SwipeConfig};
pub use controller::SwipeController;
pub use drag::{DragCallback, DragHelper, DragState};
pub use edge::{Edge, EdgeFlags, EdgeTracking};
pub use host::{Screen, SwipeBackHelper, Translucency};
pub use layout::SwipeBackLayout;
pub use listener::{ListenerRegistry, SwipeListener};
pub use state::swipe_percent;
