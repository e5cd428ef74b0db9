//! Error types for Pixel Transitions core.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, ClockError>;

/// Errors raised while configuring or starting the frame clock machinery.
///
/// Subscription management and tick dispatch are infallible; only the
/// creation of the refresh timer can fail.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// A frame driver is already ticking this clock.
    #[error("A frame driver is already running for this clock")]
    DriverAlreadyRunning,

    /// The requested refresh rate is zero, negative, or not finite.
    #[error("Invalid refresh rate {hz} Hz: must be a positive, finite number")]
    InvalidRefreshRate { hz: f64 },

    /// The driver thread could not be spawned.
    #[error("Failed to spawn frame driver thread: {0}")]
    DriverSpawn(#[source] std::io::Error),
}

impl ClockError {
    /// Create a refresh rate error.
    pub fn invalid_refresh_rate(hz: f64) -> Self {
        Self::InvalidRefreshRate { hz }
    }
}
