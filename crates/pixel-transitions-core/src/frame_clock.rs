//! Frame clock: the per-refresh callback dispatcher.
//!
//! A [`FrameClock`] holds an ordered list of frame callbacks and invokes each
//! of them once per [`tick`](FrameClock::tick), in registration order. One
//! clock is meant to exist per process; it is constructed explicitly and
//! shared by `Arc` with whatever owns transition controllers.
//!
//! Ticks come either from the host's own display-refresh hook calling
//! [`FrameClock::tick`] directly, or from a [`FrameDriver`](crate::FrameDriver)
//! started with [`FrameClock::start_driver`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use pixel_transitions_core::{FrameClock, ListenState};
//!
//! let clock = FrameClock::new();
//! let frames = Arc::new(AtomicUsize::new(0));
//!
//! let counter = frames.clone();
//! clock.subscribe_until(move || {
//!     if counter.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
//!         ListenState::Done
//!     } else {
//!         ListenState::Continue
//!     }
//! });
//!
//! for _ in 0..5 {
//!     clock.tick();
//! }
//! assert_eq!(frames.load(Ordering::SeqCst), 3);
//! assert_eq!(clock.subscription_count(), 0);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;
use crate::time::{MonotonicTimeSource, TimeSource};

new_key_type! {
    /// A unique identifier for a frame subscription.
    ///
    /// Returned by [`FrameClock::subscribe_until`] and
    /// [`FrameClock::subscribe_forever`]; pass it to
    /// [`FrameClock::unsubscribe`] to stop receiving ticks.
    pub struct SubscriptionId;
}

/// What a self-terminating frame callback wants after the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenState {
    /// Keep receiving ticks.
    Continue,
    /// Remove this subscription before the next tick.
    Done,
}

/// A boxed frame callback, shared so a tick can run it without holding the
/// clock's lock.
type FrameCallback = Arc<Mutex<Box<dyn FnMut() -> ListenState + Send + 'static>>>;

/// Subscription table.
struct ClockState {
    /// All live subscriptions.
    subscriptions: SlotMap<SubscriptionId, FrameCallback>,
    /// Registration order; slot keys are reused, so the map alone can't keep it.
    order: Vec<SubscriptionId>,
}

/// Dispatches frame callbacks once per display refresh.
///
/// Subscription management is safe from any thread. Callbacks run
/// synchronously on whichever thread calls [`tick`](Self::tick), with no
/// clock lock held, so a callback may subscribe new callbacks or unsubscribe
/// any subscription, itself included:
///
/// - a subscription added during a tick first fires on the next tick;
/// - a subscription removed during a tick does not fire later in that tick.
///
/// The removal check happens under the callback's own lock right before it
/// runs. An `unsubscribe` from another thread that races with an invocation
/// already in progress does not interrupt it; that invocation completes and
/// the callback never runs again.
///
/// Callbacks must not block: a slow callback delays every sibling for that
/// frame.
pub struct FrameClock {
    state: Mutex<ClockState>,
    /// Where "now" comes from.
    time: Arc<dyn TimeSource>,
    /// Set while a tick is dispatching.
    ticking: AtomicBool,
    /// Number of completed ticks.
    frame_count: AtomicU64,
    /// Set while a `FrameDriver` owns this clock.
    pub(crate) driver_active: AtomicBool,
}

impl FrameClock {
    /// Create a clock that reads wall-clock time.
    pub fn new() -> Self {
        Self::with_time_source(Arc::new(MonotonicTimeSource))
    }

    /// Create a clock that reads time from `time`.
    pub fn with_time_source(time: Arc<dyn TimeSource>) -> Self {
        crate::transitions_debug!("frame clock created");
        Self {
            state: Mutex::new(ClockState {
                subscriptions: SlotMap::with_key(),
                order: Vec::new(),
            }),
            time,
            ticking: AtomicBool::new(false),
            frame_count: AtomicU64::new(0),
            driver_active: AtomicBool::new(false),
        }
    }

    /// The current instant according to this clock's time source.
    #[inline]
    pub fn now(&self) -> Instant {
        self.time.now()
    }

    /// Invoke `callback` every tick until it returns [`ListenState::Done`].
    ///
    /// A callback that returns `Done` is removed before the next tick fires;
    /// other subscriptions are neither skipped nor invoked twice as a result.
    pub fn subscribe_until<F>(&self, callback: F) -> SubscriptionId
    where
        F: FnMut() -> ListenState + Send + 'static,
    {
        let callback: FrameCallback = Arc::new(Mutex::new(Box::new(callback)));
        let mut state = self.state.lock();
        let id = state.subscriptions.insert(callback);
        state.order.push(id);
        tracing::trace!(target: targets::FRAME_CLOCK, ?id, "subscribed");
        id
    }

    /// Invoke `callback` every tick until explicitly unsubscribed.
    pub fn subscribe_forever<F>(&self, mut callback: F) -> SubscriptionId
    where
        F: FnMut() + Send + 'static,
    {
        self.subscribe_until(move || {
            callback();
            ListenState::Continue
        })
    }

    /// Remove a subscription.
    ///
    /// Idempotent: returns `true` if the subscription was live and is now
    /// removed, `false` if it had already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.state.lock();
        if state.subscriptions.remove(id).is_some() {
            state.order.retain(|&entry| entry != id);
            tracing::trace!(target: targets::FRAME_CLOCK, ?id, "unsubscribed");
            true
        } else {
            false
        }
    }

    /// Check whether a subscription is still live.
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.state.lock().subscriptions.contains_key(id)
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.state.lock().subscriptions.len()
    }

    /// Number of ticks dispatched so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count.load(Ordering::Acquire)
    }

    /// Whether a [`FrameDriver`](crate::FrameDriver) is currently ticking this clock.
    pub fn has_driver(&self) -> bool {
        self.driver_active.load(Ordering::Acquire)
    }

    /// Run one frame: invoke every live subscription once, in registration order.
    ///
    /// Returns the number of callbacks invoked. A tick requested from inside
    /// a frame callback is ignored.
    #[tracing::instrument(skip(self), target = "pixel_transitions_core::frame_clock", level = "trace")]
    pub fn tick(&self) -> usize {
        if self.ticking.swap(true, Ordering::AcqRel) {
            tracing::warn!(
                target: targets::FRAME_CLOCK,
                "tick requested while a tick is already dispatching, ignoring"
            );
            return 0;
        }
        let _ticking = TickGuard(&self.ticking);

        let snapshot: Vec<(SubscriptionId, FrameCallback)> = {
            let state = self.state.lock();
            state
                .order
                .iter()
                .filter_map(|&id| state.subscriptions.get(id).map(|cb| (id, cb.clone())))
                .collect()
        };

        let mut invoked = 0;
        for (id, callback) in snapshot {
            let listen = {
                let mut callback = callback.lock();
                // Removed earlier in this tick, possibly from another thread.
                if !self.is_subscribed(id) {
                    continue;
                }
                (&mut **callback)()
            };
            invoked += 1;

            if listen == ListenState::Done {
                self.unsubscribe(id);
            }
        }

        let frame = self.frame_count.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(target: targets::FRAME_CLOCK, frame, invoked, "tick dispatched");
        invoked
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClock")
            .field("subscriptions", &self.subscription_count())
            .field("frame_count", &self.frame_count())
            .field("has_driver", &self.has_driver())
            .finish()
    }
}

/// Clears the ticking flag even if a callback panics.
struct TickGuard<'a>(&'a AtomicBool);

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
