//! Identity-keyed controller registry.
//!
//! Every transitioning view names itself with an identity string. The registry
//! hands out one [`AnimationController`] per identity: the first caller's
//! source and configuration win, later callers with the same identity share
//! that controller regardless of what they pass.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use pixel_transitions_core::FrameClock;
use pixel_transitions_core::logging::targets;

use super::config::TransitionConfig;
use super::controller::AnimationController;
use super::source::IndexSource;

/// Maps identities to their controllers, all driven by one clock.
pub struct ControllerRegistry {
    clock: Arc<FrameClock>,
    controllers: Mutex<HashMap<String, Arc<AnimationController>>>,
}

impl ControllerRegistry {
    /// Create an empty registry whose controllers tick on `clock`.
    pub fn new(clock: Arc<FrameClock>) -> Self {
        Self {
            clock,
            controllers: Mutex::new(HashMap::new()),
        }
    }

    /// The clock shared by every controller in this registry.
    pub fn clock(&self) -> &Arc<FrameClock> {
        &self.clock
    }

    /// Return the controller for `identity`, creating it on first use.
    ///
    /// When a controller already exists, `source` and `config` are ignored.
    /// Lookup and creation happen under one lock, so concurrent first calls
    /// for the same identity still produce a single controller.
    pub fn get_or_create(
        &self,
        identity: &str,
        source: Arc<dyn IndexSource>,
        config: TransitionConfig,
    ) -> Arc<AnimationController> {
        let mut controllers = self.controllers.lock();
        if let Some(existing) = controllers.get(identity) {
            tracing::trace!(target: targets::REGISTRY, identity, "reusing controller");
            return existing.clone();
        }

        let controller = AnimationController::new(identity, source, config, &self.clock);
        controllers.insert(identity.to_owned(), controller.clone());
        tracing::debug!(
            target: targets::REGISTRY,
            identity,
            count = controllers.len(),
            "registered controller"
        );
        controller
    }

    /// Look up an existing controller.
    pub fn get(&self, identity: &str) -> Option<Arc<AnimationController>> {
        self.controllers.lock().get(identity).cloned()
    }

    /// Whether a controller exists for `identity`.
    pub fn contains(&self, identity: &str) -> bool {
        self.controllers.lock().contains_key(identity)
    }

    /// Remove the controller for `identity` and detach it from the clock.
    ///
    /// Other holders keep a working handle, but it no longer advances. A later
    /// `get_or_create` with the same identity builds a fresh controller.
    pub fn release(&self, identity: &str) -> Option<Arc<AnimationController>> {
        let removed = self.controllers.lock().remove(identity)?;
        removed.detach();
        tracing::debug!(target: targets::REGISTRY, identity, "released controller");
        Some(removed)
    }

    /// Number of registered controllers.
    pub fn len(&self) -> usize {
        self.controllers.lock().len()
    }

    /// Whether no controllers are registered.
    pub fn is_empty(&self) -> bool {
        self.controllers.lock().is_empty()
    }

    /// Identities currently registered, in no particular order.
    pub fn identities(&self) -> Vec<String> {
        self.controllers.lock().keys().cloned().collect()
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.len())
            .finish()
    }
}
