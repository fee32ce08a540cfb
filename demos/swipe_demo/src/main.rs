//! Runs one scripted left-edge swipe against a terminal "screen".
//!
//! `cargo run -p swipe_demo -- [config.json]`, with `RUST_LOG=swipeback_ui=debug`
//! to watch the drag engine.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use std::{env, fs, thread};

use anyhow::Context;
use swipeback_core::{Color, PointerEvent, SceneNode, Size, ViewId};
use swipeback_ui::*;

const WIDTH: f32 = 400.0;
const HEIGHT: f32 = 800.0;
const FRAME: Duration = Duration::from_millis(16);

struct TerminalScreen {
    content: Option<ViewId>,
    finishing: bool,
}

impl Screen for TerminalScreen {
    fn window_background(&self) -> Option<Color> {
        Some(Color::from_hex("#121212"))
    }
    fn clear_window_background(&mut self) {}
    fn detach_first_child(&mut self) -> Option<ViewId> {
        self.content.take()
    }
    fn install_root(&mut self) {
        println!("swipe layout installed as root");
    }
    fn is_finishing(&self) -> bool {
        self.finishing
    }
    fn finish_without_transition(&mut self) {
        println!("screen dismissed");
        self.finishing = true;
    }
}

struct Printer;

impl SwipeListener for Printer {
    fn on_swipe(&self, percent: f32) {
        let filled = (percent.clamp(0.0, 1.0) * 40.0) as usize;
        println!("[{:<40}] {:>5.1}%", "#".repeat(filled), percent * 100.0);
    }
    fn on_state_change(&self, edge: Option<Edge>, state: DragState) {
        println!("state {state:?} (edge {edge:?})");
    }
    fn on_swipe_over_threshold(&self) {
        println!("past threshold");
    }
    fn on_finish(&self) {
        println!("content off screen");
    }
}

fn load_config() -> anyhow::Result<SwipeConfig> {
    let Some(path) = env::args().nth(1) else {
        return Ok(SwipeConfig::default());
    };
    let json = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    SwipeConfig::from_json(&json).with_context(|| format!("parsing {path}"))
}

/// A finger landing in the left strip and dragging right at a steady pace.
fn script() -> Vec<PointerEvent> {
    let mut events = vec![PointerEvent::down(6.0, 400.0, 0)];
    for i in 1..=12u64 {
        events.push(PointerEvent::moved(6.0 + 24.0 * i as f32, 400.0, 16 * i));
    }
    events.push(PointerEvent::up(294.0, 400.0, 200));
    events
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = load_config()?;
    log::info!("config {}", serde_json::to_string(&config)?);

    let screen = Rc::new(RefCell::new(TerminalScreen {
        content: Some(1),
        finishing: false,
    }));
    let mut helper = SwipeBackHelper::new(screen.clone(), config)?;
    helper.on_post_create()?;

    let layout = helper.layout_mut();
    layout.measure(Size::new(WIDTH, HEIGHT));
    layout.add_swipe_listener(Rc::new(Printer));

    // Dispatch the way a view hierarchy would: interception first, then the
    // layout owns the rest of the gesture.
    let mut owned = false;
    for event in script() {
        owned = owned || layout.on_intercept_touch_event(&event);
        if owned {
            layout.on_touch_event(&event);
        }
    }

    while layout.advance_frame() {
        if layout.take_redraw_request() {
            let scene = layout.draw();
            if let Some(SceneNode::Child { rect, .. }) = scene.nodes.first() {
                log::debug!("frame: content at x={:.1}, {} nodes", rect.x, scene.nodes.len());
            }
        }
        thread::sleep(FRAME);
    }

    println!(
        "finished: {}, screen finishing: {}",
        layout.is_finished(),
        screen.borrow().finishing
    );
    Ok(())
}
