//! Core systems for Pixel Transitions.
//!
//! This crate provides the primitives the transition engine is built on:
//!
//! - **Frame Clock**: Per-refresh dispatcher invoking subscriptions in registration order
//! - **Frame Driver**: The single refresh timer thread that ticks a clock
//! - **Time Sources**: Wall-clock and manually advanced time
//! - **Property System**: Thread-safe values with change detection
//! - **Signals**: Change notification to connected slots
//!
//! # Frame Clock Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use pixel_transitions_core::{FrameClock, ListenState, ManualTimeSource};
//!
//! let time = Arc::new(ManualTimeSource::new());
//! let clock = Arc::new(FrameClock::with_time_source(time.clone()));
//!
//! let start = clock.now();
//! let clock_clone = clock.clone();
//! clock.subscribe_until(move || {
//!     if clock_clone.now() - start >= Duration::from_millis(32) {
//!         ListenState::Done
//!     } else {
//!         ListenState::Continue
//!     }
//! });
//!
//! for _ in 0..2 {
//!     time.advance(Duration::from_millis(16));
//!     clock.tick();
//! }
//! assert_eq!(clock.subscription_count(), 0);
//! ```

mod driver;
mod error;
mod frame_clock;
pub mod logging;
pub mod property;
pub mod signal;
pub mod time;

pub use driver::{DEFAULT_REFRESH_RATE_HZ, FrameDriver, FrameDriverBuilder, FrameDriverConfig};
pub use error::{ClockError, Result};
pub use frame_clock::{FrameClock, ListenState, SubscriptionId};
pub use logging::PerfSpan;
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use time::{ManualTimeSource, MonotonicTimeSource, TimeSource};

static_assertions::assert_impl_all!(FrameClock: Send, Sync);
static_assertions::assert_impl_all!(FrameDriver: Send, Sync);
static_assertions::assert_impl_all!(Property<usize>: Send, Sync);
static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
