//! End-to-end transition behaviour through the public API.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use pixel_transitions::{
    ControllerRegistry, Easing, Frame, PixelTransition, Size, TransitionConfig, TransitionSnapshot,
    TransitionStyle, Way,
};
use pixel_transitions_core::{FrameClock, FrameDriverBuilder, ManualTimeSource, Property};

const FRAME: Duration = Duration::from_millis(16);

struct Scene {
    time: Arc<ManualTimeSource>,
    clock: Arc<FrameClock>,
    registry: ControllerRegistry,
    selection: Arc<Property<usize>>,
}

impl Scene {
    fn new() -> Self {
        let time = Arc::new(ManualTimeSource::new());
        let clock = Arc::new(FrameClock::with_time_source(time.clone()));
        Self {
            time,
            registry: ControllerRegistry::new(clock.clone()),
            clock,
            selection: Arc::new(Property::new(0usize)),
        }
    }

    fn view(&self, identity: &str, config: TransitionConfig) -> PixelTransition<String> {
        PixelTransition::new(
            &self.registry,
            identity,
            self.selection.clone(),
            TransitionStyle::Flip(Way::Right),
            config,
            (0..4).map(|i| format!("pane {i}")).collect(),
        )
    }

    fn frame(&self) {
        self.time.advance(FRAME);
        self.clock.tick();
    }
}

fn linear(millis: u64) -> TransitionConfig {
    TransitionConfig::new()
        .with_duration(Duration::from_millis(millis))
        .with_easing(Easing::Linear)
}

fn record(view: &PixelTransition<String>) -> Arc<Mutex<Vec<TransitionSnapshot>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    view.controller()
        .state_changed()
        .connect(move |snapshot: &TransitionSnapshot| log_clone.lock().push(*snapshot));
    log
}

#[test]
fn linear_run_is_monotone_and_settles_on_target() {
    let scene = Scene::new();
    let view = scene.view("monotone", linear(160));
    let log = record(&view);

    scene.selection.set(2);
    for _ in 0..12 {
        scene.frame();
    }

    let log = log.lock();
    let fractions: Vec<f64> = log.iter().filter(|s| s.active).map(|s| s.fraction).collect();
    assert!(fractions.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!(log.iter().filter(|s| s.active).all(|s| s.from_index == 0 && s.to_index == 2));

    let last = log.last().unwrap();
    assert!(!last.active);
    assert_eq!(last.from_index, 2);
    assert_eq!(last.fraction, 0.0);
    assert_eq!(view.frame(Size::new(10.0, 10.0)), Some(Frame::Still(&"pane 2".to_string())));
}

#[test]
fn retarget_mid_run_chains_without_idle_frame() {
    let scene = Scene::new();
    let view = scene.view("chain", linear(100));
    let log = record(&view);

    scene.selection.set(1);
    scene.frame();
    scene.frame();
    scene.frame();
    scene.selection.set(3);
    for _ in 0..20 {
        scene.frame();
    }

    let log = log.lock();
    let first_idle = log.iter().position(|s| !s.active).unwrap();
    assert_eq!(first_idle, log.len() - 1, "an idle state was exposed between runs");

    let targets: Vec<(usize, usize)> = log
        .iter()
        .filter(|s| s.active)
        .map(|s| (s.from_index, s.to_index))
        .collect();
    assert_eq!(targets.first(), Some(&(0, 1)));
    assert_eq!(targets.last(), Some(&(1, 3)));
    assert_eq!(log.last().unwrap().from_index, 3);
    assert_eq!(view.controller().runs_started(), 2);
}

#[test]
fn round_trip_between_frames_is_noop() {
    let scene = Scene::new();
    let view = scene.view("noop", linear(100));
    let log = record(&view);

    scene.selection.set(1);
    scene.selection.set(0);
    scene.frame();
    scene.frame();

    assert!(log.lock().is_empty());
    assert!(!view.controller().is_active());
    assert_eq!(view.controller().runs_started(), 0);
}

#[test]
fn views_with_same_identity_share_controller() {
    let scene = Scene::new();
    let first = scene.view("shared", linear(100));
    let second = scene.view("shared", linear(900));

    assert!(Arc::ptr_eq(first.controller(), second.controller()));
    assert_eq!(second.controller().duration(), Duration::from_millis(100));

    scene.selection.set(1);
    scene.frame();
    scene.frame();
    assert!(first.frame(Size::ZERO).unwrap().is_blend());
    assert!(second.frame(Size::ZERO).unwrap().is_blend());
}

#[test]
fn duration_below_frame_interval_finishes_next_frame() {
    let scene = Scene::new();
    let view = scene.view("short", linear(5));

    scene.selection.set(2);
    scene.frame();
    assert!(view.controller().is_active());
    scene.frame();
    assert!(!view.controller().is_active());
    assert_eq!(view.controller().from_index(), 2);
}

#[test]
fn motion_starts_on_frame_after_change() {
    let scene = Scene::new();
    let view = scene.view("latency", linear(100));

    scene.selection.set(1);
    scene.frame();
    let snapshot = view.controller().snapshot();
    assert!(snapshot.active);
    assert_eq!(snapshot.fraction, 0.0);

    scene.frame();
    assert!(view.controller().fraction() > 0.0);
}

#[test]
fn released_identity_gets_fresh_controller() {
    let scene = Scene::new();
    let old = scene.view("pages", linear(100));

    let released = scene.registry.release("pages").unwrap();
    assert!(Arc::ptr_eq(&released, old.controller()));
    assert_eq!(scene.clock.subscription_count(), 0);

    scene.selection.set(3);
    scene.frame();
    assert!(!old.controller().is_active());

    let fresh = scene.view("pages", linear(100));
    assert!(!Arc::ptr_eq(fresh.controller(), old.controller()));
    assert_eq!(fresh.controller().observed_index(), 3);
    assert_eq!(scene.registry.len(), 1);
}

#[test]
fn transitions_emit_logs() {
    let subscriber = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let scene = Scene::new();
    let view = scene.view("logged", linear(32));
    scene.selection.set(1);
    for _ in 0..4 {
        scene.frame();
        let _ = view.frame(Size::new(64.0, 64.0));
    }
    assert_eq!(view.controller().from_index(), 1);
}

#[test]
fn frame_driver_completes_transition() {
    let clock = Arc::new(FrameClock::new());
    let registry = ControllerRegistry::new(clock.clone());
    let selection = Arc::new(Property::new(0usize));
    let controller = registry.get_or_create("driven", selection.clone(), linear(30));

    let driver = FrameDriverBuilder::new()
        .refresh_rate(200.0)
        .thread_name("transition-test-driver")
        .start(&clock)
        .unwrap();

    selection.set(1);
    let deadline = Instant::now() + Duration::from_secs(5);
    while controller.from_index() != 1 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    driver.stop_and_join();

    let snapshot = controller.snapshot();
    assert!(!snapshot.active);
    assert_eq!(snapshot.from_index, 1);
}
