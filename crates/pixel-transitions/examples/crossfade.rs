//! Cross-fades through a few text panes on a real frame driver.
//!
//! Run with:
//!
//! ```text
//! RUST_LOG=pixel_transitions=debug cargo run --example crossfade
//! ```

use std::sync::Arc;
use std::time::Duration;

use pixel_transitions::{
    ControllerRegistry, Easing, Frame, PixelTransition, Size, TransitionConfig, TransitionStyle,
};
use pixel_transitions_core::{FrameClock, FrameDriverBuilder, Property};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let clock = Arc::new(FrameClock::new());
    let registry = ControllerRegistry::new(clock.clone());
    let selection = Arc::new(Property::new(0usize));

    let config = TransitionConfig::new()
        .with_duration_secs(0.4)?
        .with_easing(Easing::EaseInOut);
    let view = PixelTransition::new(
        &registry,
        "crossfade-demo",
        selection.clone(),
        TransitionStyle::Cross,
        config,
        vec!["red", "green", "blue"],
    );

    let driver = FrameDriverBuilder::new().refresh_rate(30.0).start(&clock)?;

    // Repaint whenever the controller reports a change.
    view.controller().state_changed().connect(|snapshot| {
        if snapshot.active {
            println!(
                "  {} -> {}  {:>5.1}%",
                snapshot.from_index,
                snapshot.to_index,
                snapshot.fraction * 100.0
            );
        }
    });

    for next in [1, 2, 0] {
        println!("select {next}");
        selection.set(next);
        std::thread::sleep(Duration::from_millis(600));

        if let Some(Frame::Still(pane)) = view.frame(Size::new(320.0, 240.0)) {
            println!("showing {pane}");
        }
    }

    // Retarget while a run is in flight; only the latest selection counts.
    selection.set(1);
    std::thread::sleep(Duration::from_millis(100));
    selection.set(2);
    selection.set(1);
    selection.set(2);
    std::thread::sleep(Duration::from_millis(1000));
    println!(
        "runs started: {}, settled on {}",
        view.controller().runs_started(),
        view.controller().from_index()
    );

    driver.stop_and_join();
    Ok(())
}
