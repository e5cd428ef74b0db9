//! Frame driver: the single refresh timer behind a [`FrameClock`].
//!
//! A `FrameDriver` owns a dedicated thread that ticks its clock at a fixed
//! refresh rate. Hosts that already receive a display-refresh callback can skip
//! the driver and call [`FrameClock::tick`] themselves; either way there is
//! exactly one tick source per clock.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pixel_transitions_core::{FrameClock, FrameDriverBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clock = Arc::new(FrameClock::new());
//!     let driver = FrameDriverBuilder::new().refresh_rate(120.0).start(&clock)?;
//!
//!     clock.subscribe_forever(|| println!("frame"));
//!     std::thread::sleep(std::time::Duration::from_millis(50));
//!
//!     driver.stop_and_join();
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, bounded};
use parking_lot::Mutex;

use crate::error::{ClockError, Result};
use crate::frame_clock::FrameClock;
use crate::logging::targets;

/// Default refresh rate in frames per second.
pub const DEFAULT_REFRESH_RATE_HZ: f64 = 60.0;

/// Configuration for a [`FrameDriver`].
#[derive(Debug, Clone)]
pub struct FrameDriverConfig {
    /// Ticks per second.
    pub refresh_rate_hz: f64,
    /// Name for the driver thread.
    pub thread_name: String,
}

impl Default for FrameDriverConfig {
    fn default() -> Self {
        Self {
            refresh_rate_hz: DEFAULT_REFRESH_RATE_HZ,
            thread_name: "pixel-transitions-frame".to_string(),
        }
    }
}

impl FrameDriverConfig {
    /// Create a configuration with the given refresh rate.
    pub fn with_refresh_rate(refresh_rate_hz: f64) -> Self {
        Self {
            refresh_rate_hz,
            ..Default::default()
        }
    }

    /// The interval between ticks.
    ///
    /// Fails if the refresh rate is not a positive, finite number.
    pub fn interval(&self) -> Result<Duration> {
        let hz = self.refresh_rate_hz;
        if !hz.is_finite() || hz <= 0.0 {
            return Err(ClockError::invalid_refresh_rate(hz));
        }
        Duration::try_from_secs_f64(1.0 / hz).map_err(|_| ClockError::invalid_refresh_rate(hz))
    }
}

/// Builder for starting a [`FrameDriver`] with custom configuration.
#[derive(Debug, Default)]
pub struct FrameDriverBuilder {
    config: FrameDriverConfig,
}

impl FrameDriverBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the refresh rate in frames per second.
    pub fn refresh_rate(mut self, hz: f64) -> Self {
        self.config.refresh_rate_hz = hz;
        self
    }

    /// Set the driver thread name.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.config.thread_name = name.into();
        self
    }

    /// Start ticking `clock`.
    pub fn start(self, clock: &Arc<FrameClock>) -> Result<FrameDriver> {
        FrameDriver::start(clock, self.config)
    }
}

impl FrameClock {
    /// Start a driver thread ticking this clock.
    ///
    /// Shorthand for [`FrameDriver::start`].
    pub fn start_driver(self: &Arc<Self>, config: FrameDriverConfig) -> Result<FrameDriver> {
        FrameDriver::start(self, config)
    }
}

/// Handle to a running frame driver thread.
///
/// Dropping the handle stops the thread and waits for it to exit.
pub struct FrameDriver {
    shutdown: Sender<()>,
    handle: Mutex<Option<JoinHandle<()>>>,
    interval: Duration,
}

impl FrameDriver {
    /// Start a driver thread ticking `clock` according to `config`.
    ///
    /// A clock accepts one driver at a time; starting a second one while the
    /// first is running fails with [`ClockError::DriverAlreadyRunning`].
    pub fn start(clock: &Arc<FrameClock>, config: FrameDriverConfig) -> Result<Self> {
        let interval = config.interval()?;

        if clock
            .driver_active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!(target: targets::DRIVER, "frame driver already running");
            return Err(ClockError::DriverAlreadyRunning);
        }

        let (shutdown, shutdown_rx) = bounded(1);
        let thread_clock = clock.clone();

        let spawned = thread::Builder::new()
            .name(config.thread_name.clone())
            .spawn(move || {
                let active = DriverActiveGuard(thread_clock);
                driver_loop(&active.0, &shutdown_rx, interval);
            });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(err) => {
                clock.driver_active.store(false, Ordering::Release);
                return Err(ClockError::DriverSpawn(err));
            }
        };

        tracing::info!(
            target: targets::DRIVER,
            refresh_rate_hz = config.refresh_rate_hz,
            thread = %config.thread_name,
            "frame driver started"
        );

        Ok(Self {
            shutdown,
            handle: Mutex::new(Some(handle)),
            interval,
        })
    }

    /// Start a driver at the default refresh rate.
    pub fn start_default(clock: &Arc<FrameClock>) -> Result<Self> {
        Self::start(clock, FrameDriverConfig::default())
    }

    /// The interval between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Check whether the driver thread is still running.
    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Ask the driver thread to stop after its current tick.
    pub fn stop(&self) {
        // Full or disconnected both mean shutdown is already underway.
        let _ = self.shutdown.try_send(());
    }

    /// Wait for the driver thread to exit.
    ///
    /// Returns `true` if the thread was joined, `false` if it was already
    /// joined, panicked, or this is called from the driver thread itself.
    pub fn join(&self) -> bool {
        let mut handle = self.handle.lock();
        let on_driver_thread = handle
            .as_ref()
            .is_some_and(|h| h.thread().id() == thread::current().id());
        if on_driver_thread {
            return false;
        }
        handle.take().is_some_and(|h| h.join().is_ok())
    }

    /// Stop the driver and wait for it to exit.
    pub fn stop_and_join(&self) -> bool {
        self.stop();
        self.join()
    }
}

impl Drop for FrameDriver {
    fn drop(&mut self) {
        if self.stop_and_join() {
            tracing::info!(target: targets::DRIVER, "frame driver stopped");
        }
    }
}

impl std::fmt::Debug for FrameDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDriver")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .finish()
    }
}

/// Releases the clock for the next driver when the driver thread exits,
/// including by unwinding out of a panicking frame callback.
struct DriverActiveGuard(Arc<FrameClock>);

impl Drop for DriverActiveGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            tracing::warn!(target: targets::DRIVER, "frame callback panicked, frame driver exiting");
        }
        self.0.driver_active.store(false, Ordering::Release);
    }
}

/// Tick `clock` every `interval` until a shutdown message arrives.
fn driver_loop(clock: &FrameClock, shutdown: &Receiver<()>, interval: Duration) {
    let mut next_frame = Instant::now() + interval;

    loop {
        let wait = next_frame.saturating_duration_since(Instant::now());
        match shutdown.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {
                clock.tick();

                next_frame += interval;
                let now = Instant::now();
                if next_frame < now {
                    // Fell behind: drop the missed frames instead of bursting.
                    tracing::trace!(target: targets::DRIVER, "frame deadline missed");
                    next_frame = now + interval;
                }
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
