//! Per-identity transition configuration.

use std::time::Duration;

use super::easing::Easing;
use crate::error::{Result, TransitionError};

/// Default transition duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);

/// Timing settings for one transition identity.
///
/// Applied when the identity's controller is first created; later lookups
/// of the same identity keep the first settings.
///
/// A zero duration is allowed and makes every run complete on its first
/// progress frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    /// How long one run takes.
    pub duration: Duration,
    /// Easing curve applied to linear progress.
    pub easing: Easing,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            easing: Easing::default(),
        }
    }
}

impl TransitionConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the duration from floating-point seconds.
    ///
    /// Rejects negative, NaN, and infinite values.
    pub fn with_duration_secs(self, seconds: f64) -> Result<Self> {
        let duration = Duration::try_from_secs_f64(seconds)
            .map_err(|_| TransitionError::invalid_duration(seconds))?;
        Ok(self.with_duration(duration))
    }

    /// Set the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}
