//! Transition timing: easing, per-identity controllers and their registry.
//!
//! An [`AnimationController`] turns changes of an external selection index
//! into timed runs with eased progress. Controllers are normally obtained
//! from a [`ControllerRegistry`] so that views sharing an identity share one
//! controller.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use pixel_transitions::animation::{ControllerRegistry, Easing, TransitionConfig};
//! use pixel_transitions_core::{FrameClock, Property};
//!
//! let clock = Arc::new(FrameClock::new());
//! let registry = ControllerRegistry::new(clock.clone());
//! let selection = Arc::new(Property::new(0usize));
//!
//! let controller = registry.get_or_create(
//!     "gallery",
//!     selection.clone(),
//!     TransitionConfig::new().with_easing(Easing::EaseOut),
//! );
//!
//! selection.set(1);
//! clock.tick();
//! assert!(controller.is_active());
//! ```

mod config;
mod controller;
mod easing;
mod registry;
mod source;

pub use config::{DEFAULT_DURATION, TransitionConfig};
pub use controller::{AnimationController, TransitionSnapshot};
pub use easing::{Easing, ease, lerp_eased};
pub use registry::ControllerRegistry;
pub use source::{FnIndexSource, IndexSource};
