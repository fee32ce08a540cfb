//! End-to-end swipe flows through the public API: a host screen, a scripted
//! pointer stream and a manual clock.

use std::cell::{Cell, RefCell};
use std::error::Error;
use std::rc::Rc;

use swipeback_core::{Color, ManualClock, PointerEvent, Size, SwipeError, ViewId};
use swipeback_ui::{
    DragState, EdgeFlags, Screen, SwipeBackHelper, SwipeBackLayout, SwipeConfig, SwipeListener,
    Translucency,
};
use web_time::{Duration, Instant};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Default)]
struct FakeScreen {
    background: Option<Color>,
    background_cleared: bool,
    children: Vec<ViewId>,
    root_installed: bool,
    finishing: bool,
    finish_calls: usize,
}

impl Screen for FakeScreen {
    fn window_background(&self) -> Option<Color> {
        self.background
    }
    fn clear_window_background(&mut self) {
        self.background_cleared = true;
    }
    fn detach_first_child(&mut self) -> Option<ViewId> {
        (!self.children.is_empty()).then(|| self.children.remove(0))
    }
    fn install_root(&mut self) {
        self.root_installed = true;
    }
    fn is_finishing(&self) -> bool {
        self.finishing
    }
    fn finish_without_transition(&mut self) {
        self.finishing = true;
        self.finish_calls += 1;
    }
}

#[derive(Default)]
struct FakeTranslucency {
    to: Cell<usize>,
    from: Cell<usize>,
    fail: Cell<bool>,
}

impl Translucency for FakeTranslucency {
    fn convert_to_translucent(&self) -> Result<(), Box<dyn Error>> {
        if self.fail.get() {
            return Err("not supported".into());
        }
        self.to.set(self.to.get() + 1);
        Ok(())
    }
    fn convert_from_translucent(&self) -> Result<(), Box<dyn Error>> {
        self.from.set(self.from.get() + 1);
        Ok(())
    }
}

#[derive(Default)]
struct Finishes(Cell<usize>);

impl SwipeListener for Finishes {
    fn on_finish(&self) {
        self.0.set(self.0.get() + 1);
    }
}

fn screen_with_content() -> Rc<RefCell<FakeScreen>> {
    Rc::new(RefCell::new(FakeScreen {
        background: Some(Color::WHITE),
        children: vec![7],
        ..FakeScreen::default()
    }))
}

fn attached(
    screen: &Rc<RefCell<FakeScreen>>,
    clock: &Rc<ManualClock>,
) -> SwipeBackHelper<FakeScreen> {
    let mut helper =
        SwipeBackHelper::with_clock(screen.clone(), SwipeConfig::default(), clock.clone()).unwrap();
    helper.on_post_create().unwrap();
    helper.layout_mut().measure(Size::new(400.0, 800.0));
    helper
}

fn settle(layout: &mut SwipeBackLayout, clock: &ManualClock) {
    for _ in 0..100 {
        clock.advance(FRAME);
        if !layout.advance_frame() {
            return;
        }
    }
    panic!("settle never finished");
}

#[test]
fn attach_moves_content_into_layout_once() {
    let screen = screen_with_content();
    let clock = Rc::new(ManualClock::new(Instant::now()));
    let mut helper = attached(&screen, &clock);

    assert!(helper.is_attached());
    assert_eq!(helper.layout().content_id(), Some(7));
    {
        let screen = screen.borrow();
        assert!(screen.background_cleared);
        assert!(screen.root_installed);
        assert!(screen.children.is_empty());
    }
    let scene = helper.layout().draw();
    assert_eq!(scene.nodes.len(), 1);

    assert_eq!(helper.on_post_create(), Err(SwipeError::AlreadyAttached));
}

#[test]
fn attach_without_content_fails() {
    let screen = Rc::new(RefCell::new(FakeScreen::default()));
    let mut helper = SwipeBackHelper::new(screen.clone(), SwipeConfig::default()).unwrap();
    assert_eq!(helper.on_post_create(), Err(SwipeError::MissingContent));
    assert!(!helper.is_attached());
    // The window keeps its own background when nothing was adopted.
    assert!(!screen.borrow().background_cleared);
    assert!(!screen.borrow().root_installed);
}

#[test]
fn clearing_listeners_keeps_screen_dismissal() {
    let screen = screen_with_content();
    let clock = Rc::new(ManualClock::new(Instant::now()));
    let translucency = Rc::new(FakeTranslucency::default());
    let mut helper = attached(&screen, &clock).with_translucency(translucency.clone());

    let layout = helper.layout_mut();
    layout.clear_swipe_listeners();
    assert_eq!(layout.controller().listener_count(), 0);

    layout.swipe_to_finish(EdgeFlags::LEFT);
    settle(layout, &clock);

    assert!(layout.is_finished());
    assert_eq!(screen.borrow().finish_calls, 1);
    assert_eq!(translucency.to.get(), 1);
}

#[test]
fn fling_from_left_edge_dismisses_screen_once() {
    let screen = screen_with_content();
    let clock = Rc::new(ManualClock::new(Instant::now()));
    let mut helper = attached(&screen, &clock);
    let finishes = Rc::new(Finishes::default());
    helper.layout_mut().add_swipe_listener(finishes.clone());

    let layout = helper.layout_mut();
    assert!(!layout.on_intercept_touch_event(&PointerEvent::down(5.0, 300.0, 0)));
    assert!(layout.on_intercept_touch_event(&PointerEvent::moved(25.0, 301.0, 10)));
    layout.on_touch_event(&PointerEvent::moved(85.0, 302.0, 20));
    layout.on_touch_event(&PointerEvent::moved(145.0, 302.0, 30));
    // Barely a third of the way across, but moving fast.
    layout.on_touch_event(&PointerEvent::up(145.0, 302.0, 40));
    assert_eq!(layout.drag_state(), DragState::Settling);

    settle(layout, &clock);
    assert!(layout.is_finished());
    assert_eq!(finishes.0.get(), 1);
    assert_eq!(screen.borrow().finish_calls, 1);
}

#[test]
fn slow_short_drag_returns_to_rest() {
    let screen = screen_with_content();
    let clock = Rc::new(ManualClock::new(Instant::now()));
    let mut helper = attached(&screen, &clock);

    let layout = helper.layout_mut();
    assert!(layout.on_touch_event(&PointerEvent::down(5.0, 300.0, 0)));
    layout.on_touch_event(&PointerEvent::moved(65.0, 300.0, 16));
    layout.on_touch_event(&PointerEvent::up(65.0, 300.0, 600));

    settle(layout, &clock);
    assert_eq!(layout.content_frame().unwrap().x, 0.0);
    assert!(!layout.is_finished());
    assert_eq!(screen.borrow().finish_calls, 0);
}

#[test]
fn programmatic_dismiss_skips_screen_already_finishing() {
    let screen = screen_with_content();
    let clock = Rc::new(ManualClock::new(Instant::now()));
    let mut helper = attached(&screen, &clock);
    screen.borrow_mut().finishing = true;

    helper.layout_mut().swipe_to_finish(EdgeFlags::LEFT);
    settle(helper.layout_mut(), &clock);

    assert!(helper.layout().is_finished());
    assert_eq!(screen.borrow().finish_calls, 0);
}

#[test]
fn translucency_follows_drag_state() {
    let screen = screen_with_content();
    let clock = Rc::new(ManualClock::new(Instant::now()));
    let translucency = Rc::new(FakeTranslucency::default());
    let mut helper = attached(&screen, &clock).with_translucency(translucency.clone());

    let layout = helper.layout_mut();
    layout.on_touch_event(&PointerEvent::down(5.0, 300.0, 0));
    layout.on_touch_event(&PointerEvent::moved(45.0, 300.0, 16));
    layout.on_touch_event(&PointerEvent::up(45.0, 300.0, 600));
    assert_eq!(translucency.to.get(), 1);
    assert_eq!(translucency.from.get(), 0);

    settle(layout, &clock);
    assert_eq!(translucency.from.get(), 1);

    // A committed swipe leaves the window translucent behind the exit.
    layout.swipe_to_finish(EdgeFlags::LEFT);
    settle(layout, &clock);
    assert_eq!(translucency.to.get(), 2);
    assert_eq!(translucency.from.get(), 1);
}

#[test]
fn translucency_failure_is_not_fatal() {
    let screen = screen_with_content();
    let clock = Rc::new(ManualClock::new(Instant::now()));
    let translucency = Rc::new(FakeTranslucency::default());
    translucency.fail.set(true);
    let mut helper = attached(&screen, &clock).with_translucency(translucency.clone());

    let layout = helper.layout_mut();
    assert!(layout.on_touch_event(&PointerEvent::down(5.0, 300.0, 0)));
    assert!(layout.on_touch_event(&PointerEvent::moved(105.0, 300.0, 16)));
    assert_eq!(layout.content_frame().unwrap().x, 100.0);
    assert_eq!(translucency.to.get(), 0);
}

#[test]
fn config_from_json_drives_layout() {
    let config = SwipeConfig::from_json(r#"{ "threshold": 0.5, "edge_size": 40.0 }"#).unwrap();
    let clock = Rc::new(ManualClock::new(Instant::now()));
    let mut layout = SwipeBackLayout::with_clock(config, clock.clone()).unwrap();
    layout.measure(Size::new(400.0, 800.0));
    layout.add_view(1);

    // Inside the wider strip.
    assert!(layout.on_touch_event(&PointerEvent::down(35.0, 300.0, 0)));
    assert_eq!(layout.drag_state(), DragState::Dragging);
    // 0.4 of the way is short of the raised threshold.
    layout.on_touch_event(&PointerEvent::moved(35.0 + 166.4, 300.0, 16));
    layout.on_touch_event(&PointerEvent::up(35.0 + 166.4, 300.0, 600));
    settle(&mut layout, &clock);
    assert_eq!(layout.content_frame().unwrap().x, 0.0);
}
