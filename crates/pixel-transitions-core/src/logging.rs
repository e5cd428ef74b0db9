//! Logging facilities for Pixel Transitions.
//!
//! Pixel Transitions uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("pixel_transitions=debug")
//!         .init();
//! }
//! ```
//!
//! Per-tick events are logged at `trace`, state machine transitions at
//! `debug`, lifecycle events (driver start/stop, controller creation) at
//! `info`, and tolerated contract violations at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "pixel_transitions_core";
    /// Frame clock dispatch.
    pub const FRAME_CLOCK: &str = "pixel_transitions_core::frame_clock";
    /// Frame driver thread.
    pub const DRIVER: &str = "pixel_transitions_core::driver";
    /// Signal emission.
    pub const SIGNAL: &str = "pixel_transitions_core::signal";
    /// Animation controller state machine.
    pub const CONTROLLER: &str = "pixel_transitions::controller";
    /// Controller registry.
    pub const REGISTRY: &str = "pixel_transitions::registry";
    /// Pane view binding.
    pub const VIEW: &str = "pixel_transitions::view";
}

/// Span names used for performance tracing.
pub mod span_names {
    /// One frame clock tick.
    pub const TICK: &str = "pixel_transitions::tick";
    /// Frame composition in the view binding.
    pub const COMPOSE: &str = "pixel_transitions::compose";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring how long a frame or a composition takes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "pixel_transitions::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event under the core target.
#[macro_export]
macro_rules! transitions_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "pixel_transitions_core", $($arg)*)
    };
}

/// Debug-level event under the core target.
#[macro_export]
macro_rules! transitions_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "pixel_transitions_core", $($arg)*)
    };
}
