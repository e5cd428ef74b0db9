//! Time sources for the frame clock.
//!
//! Transition progress is computed from elapsed time, never from tick counts,
//! so a dropped frame or a stalled host only delays rendering. The clock reads
//! "now" through a [`TimeSource`] so hosts can substitute a deterministic
//! source for offline rendering or tests.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// A source of monotonic timestamps.
pub trait TimeSource: Send + Sync {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// Wall-clock time backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicTimeSource;

impl TimeSource for MonotonicTimeSource {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A time source that only moves when told to.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pixel_transitions_core::time::{ManualTimeSource, TimeSource};
///
/// let time = ManualTimeSource::new();
/// let start = time.now();
/// time.advance(Duration::from_millis(16));
/// assert_eq!(time.now() - start, Duration::from_millis(16));
/// ```
#[derive(Debug)]
pub struct ManualTimeSource {
    origin: Instant,
    offset: Mutex<Duration>,
}

impl ManualTimeSource {
    /// Create a manual source frozen at the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
        crate::transitions_trace!(?by, "manual time advanced");
    }

    /// Total time advanced since creation.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock()
    }
}

impl Default for ManualTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
}
