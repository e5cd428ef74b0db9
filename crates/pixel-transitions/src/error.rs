//! Error types for the transition engine.

use pixel_transitions_core::ClockError;

/// Result type alias for transition operations.
pub type Result<T> = std::result::Result<T, TransitionError>;

/// Errors that can occur while configuring transitions.
///
/// Ticking, registry lookups and rendering are infallible; only
/// configuration input and frame driver start-up can fail.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    /// A transition duration was negative, NaN, or infinite.
    #[error("Invalid transition duration {seconds}s: must be a finite, non-negative number")]
    InvalidDuration { seconds: f64 },

    /// Frame clock error.
    #[error(transparent)]
    Clock(#[from] ClockError),
}

impl TransitionError {
    /// Create an invalid duration error.
    pub fn invalid_duration(seconds: f64) -> Self {
        Self::InvalidDuration { seconds }
    }
}
