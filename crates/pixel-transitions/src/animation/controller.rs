//! Animation controller: the per-identity transition state machine.
//!
//! A controller watches an external selection index once per frame. When the
//! index changes while idle it starts a *run* from the last settled index to
//! the new one, advances progress from elapsed time on every following frame,
//! and settles when progress reaches 1. If the selection moved again during a
//! run, the next run starts in the same frame the previous one settles,
//! heading for whatever the selection is at that moment; intermediate
//! selections are dropped.
//!
//! Two frame subscriptions are involved: a permanent one that watches the
//! index, registered when the controller is created, and a self-terminating
//! one per run that advances progress. Because the progress subscription is
//! always registered after the watcher, an index change noticed in one frame
//! first shows up as motion in the next.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use pixel_transitions_core::logging::targets;
use pixel_transitions_core::{FrameClock, ListenState, Signal, SubscriptionId};

use super::config::TransitionConfig;
use super::easing::Easing;
use super::source::IndexSource;

/// Observable transition state, as committed at the end of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionSnapshot {
    /// Whether a run is in progress.
    pub active: bool,
    /// Eased progress of the current run; `0.0` while idle.
    pub fraction: f64,
    /// Pane the current run leaves.
    pub from_index: usize,
    /// Pane the current run arrives at.
    pub to_index: usize,
    /// Latest external index seen by the controller.
    pub observed_index: usize,
}

impl TransitionSnapshot {
    fn idle(index: usize) -> Self {
        Self {
            active: false,
            fraction: 0.0,
            from_index: index,
            to_index: index,
            observed_index: index,
        }
    }

    /// The pane to show when no compositing is needed.
    pub fn settled_index(&self) -> usize {
        self.observed_index
    }
}

/// Mutable state, written only from this controller's frame callbacks.
struct ControllerState {
    snapshot: TransitionSnapshot,
    /// Last snapshot sent through `state_changed`.
    published: TransitionSnapshot,
    /// When the current run started.
    run_started: Option<Instant>,
    /// Progress subscription of the current run.
    progress_subscription: Option<SubscriptionId>,
}

/// Drives transitions for one identity.
///
/// Created through [`ControllerRegistry::get_or_create`](super::ControllerRegistry::get_or_create)
/// or directly with [`AnimationController::new`]. Readers poll
/// [`snapshot`](Self::snapshot) or connect to
/// [`state_changed`](Self::state_changed).
///
/// Dropping the last handle detaches the controller from its clock.
pub struct AnimationController {
    identity: String,
    config: TransitionConfig,
    source: Arc<dyn IndexSource>,
    clock: Arc<FrameClock>,
    state: Mutex<ControllerState>,
    /// The permanent index watcher.
    watch_subscription: SubscriptionId,
    attached: AtomicBool,
    runs_started: AtomicU64,
    state_changed: Signal<TransitionSnapshot>,
    this: Weak<AnimationController>,
}

impl AnimationController {
    /// Create a controller and subscribe it to `clock`.
    ///
    /// The controller starts idle at the source's current index.
    pub fn new(
        identity: impl Into<String>,
        source: Arc<dyn IndexSource>,
        config: TransitionConfig,
        clock: &Arc<FrameClock>,
    ) -> Arc<Self> {
        let identity = identity.into();
        let initial = source.index();

        let controller = Arc::new_cyclic(|this: &Weak<Self>| {
            let watcher = this.clone();
            let watch_subscription = clock.subscribe_forever(move || {
                if let Some(controller) = watcher.upgrade() {
                    controller.watch_index();
                }
            });

            Self {
                identity,
                config,
                source,
                clock: clock.clone(),
                state: Mutex::new(ControllerState {
                    snapshot: TransitionSnapshot::idle(initial),
                    published: TransitionSnapshot::idle(initial),
                    run_started: None,
                    progress_subscription: None,
                }),
                watch_subscription,
                attached: AtomicBool::new(true),
                runs_started: AtomicU64::new(0),
                state_changed: Signal::new(),
                this: this.clone(),
            }
        });

        tracing::info!(
            target: targets::CONTROLLER,
            identity = %controller.identity,
            initial,
            duration = ?controller.config.duration,
            easing = ?controller.config.easing,
            "controller created"
        );
        controller
    }

    /// The identity this controller was created for.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The configuration applied at creation.
    pub fn config(&self) -> TransitionConfig {
        self.config
    }

    /// Duration of one run.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.config.duration
    }

    /// Easing curve applied to progress.
    #[inline]
    pub fn easing(&self) -> Easing {
        self.config.easing
    }

    /// The latest committed state.
    pub fn snapshot(&self) -> TransitionSnapshot {
        self.state.lock().snapshot
    }

    /// Whether a run is in progress.
    pub fn is_active(&self) -> bool {
        self.snapshot().active
    }

    /// Eased progress of the current run.
    pub fn fraction(&self) -> f64 {
        self.snapshot().fraction
    }

    /// Pane the current run leaves (the settled pane while idle).
    pub fn from_index(&self) -> usize {
        self.snapshot().from_index
    }

    /// Pane the current run arrives at.
    pub fn to_index(&self) -> usize {
        self.snapshot().to_index
    }

    /// Latest external index seen.
    pub fn observed_index(&self) -> usize {
        self.snapshot().observed_index
    }

    /// Number of runs started so far, chained runs included.
    pub fn runs_started(&self) -> u64 {
        self.runs_started.load(Ordering::Acquire)
    }

    /// Emitted at most once per frame, after any frame in which the
    /// observable state changed.
    pub fn state_changed(&self) -> &Signal<TransitionSnapshot> {
        &self.state_changed
    }

    /// Whether the controller still receives frames.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }

    /// Stop receiving frames.
    ///
    /// The state freezes where it is, mid-run included. Idempotent.
    pub fn detach(&self) {
        if !self.attached.swap(false, Ordering::AcqRel) {
            return;
        }

        self.clock.unsubscribe(self.watch_subscription);
        if let Some(id) = self.state.lock().progress_subscription.take() {
            self.clock.unsubscribe(id);
        }
        tracing::info!(target: targets::CONTROLLER, identity = %self.identity, "controller detached");
    }

    /// Permanent per-frame handler: notice external index changes.
    ///
    /// While a run is active its progress handler runs later in the same
    /// frame and publishes for both.
    fn watch_index(&self) {
        let index = self.source.index();

        let changes = {
            let mut state = self.state.lock();
            if index == state.snapshot.observed_index {
                return;
            }

            tracing::debug!(
                target: targets::CONTROLLER,
                identity = %self.identity,
                from = state.snapshot.observed_index,
                to = index,
                "external index changed"
            );
            state.snapshot.observed_index = index;

            if state.snapshot.active {
                return;
            }
            self.start_run(&mut state);
            state.take_changes()
        };

        if let Some(snapshot) = changes {
            self.state_changed.emit(snapshot);
        }
    }

    /// Begin a run towards the observed index. Only called while idle.
    fn start_run(&self, state: &mut ControllerState) {
        let snapshot = &mut state.snapshot;
        snapshot.to_index = snapshot.observed_index;

        if snapshot.to_index == snapshot.from_index {
            tracing::debug!(
                target: targets::CONTROLLER,
                identity = %self.identity,
                index = snapshot.from_index,
                "target equals settled index, staying idle"
            );
            return;
        }

        snapshot.active = true;
        snapshot.fraction = 0.0;
        state.run_started = Some(self.clock.now());
        self.runs_started.fetch_add(1, Ordering::AcqRel);

        let this = self.this.clone();
        state.progress_subscription = Some(self.clock.subscribe_until(move || {
            match this.upgrade() {
                Some(controller) => controller.advance(),
                None => ListenState::Done,
            }
        }));

        tracing::debug!(
            target: targets::CONTROLLER,
            identity = %self.identity,
            from = state.snapshot.from_index,
            to = state.snapshot.to_index,
            "run started"
        );
    }

    /// Per-frame progress handler for the current run.
    fn advance(&self) -> ListenState {
        let (listen, changes) = {
            let mut state = self.state.lock();
            let Some(started) = state.run_started else {
                return ListenState::Done;
            };

            let elapsed = self.clock.now().saturating_duration_since(started);
            let linear = linear_progress(elapsed, self.config.duration);
            state.snapshot.fraction = self.config.easing.apply(linear);
            tracing::trace!(
                target: targets::CONTROLLER,
                identity = %self.identity,
                linear,
                fraction = state.snapshot.fraction,
                "progress"
            );

            let listen = if linear >= 1.0 {
                self.finish_run(&mut state);
                ListenState::Done
            } else {
                ListenState::Continue
            };
            (listen, state.take_changes())
        };

        if let Some(snapshot) = changes {
            self.state_changed.emit(snapshot);
        }
        listen
    }

    /// Settle the current run and chain into the next one if the selection moved.
    fn finish_run(&self, state: &mut ControllerState) {
        let snapshot = &mut state.snapshot;
        snapshot.active = false;
        snapshot.fraction = 0.0;
        snapshot.from_index = snapshot.to_index;
        state.run_started = None;
        state.progress_subscription = None;

        tracing::debug!(
            target: targets::CONTROLLER,
            identity = %self.identity,
            index = state.snapshot.from_index,
            "run finished"
        );

        if state.snapshot.to_index != state.snapshot.observed_index {
            tracing::debug!(
                target: targets::CONTROLLER,
                identity = %self.identity,
                next = state.snapshot.observed_index,
                "selection moved during run, chaining"
            );
            self.start_run(state);
        }
    }
}

impl ControllerState {
    /// The snapshot to publish, if it differs from the last published one.
    fn take_changes(&mut self) -> Option<TransitionSnapshot> {
        if self.snapshot == self.published {
            return None;
        }
        self.published = self.snapshot;
        Some(self.snapshot)
    }
}

impl Drop for AnimationController {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for AnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationController")
            .field("identity", &self.identity)
            .field("config", &self.config)
            .field("snapshot", &self.snapshot())
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// Linear progress of a run, clamped to `[0, 1]`.
///
/// A zero duration is complete immediately.
pub(crate) fn linear_progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}
