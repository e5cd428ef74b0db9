//! Pixel Transitions - frame-driven transitions between indexed panes.
//!
//! This is the main crate: it builds the transition engine on top of
//! [`pixel_transitions_core`] and re-exports the pieces applications need.
//!
//! - [`animation`]: easing curves, per-identity controllers and the registry
//! - [`render`]: transition styles and the per-pane compositing contract
//! - [`PixelTransition`]: binds panes and a style to a controller
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use pixel_transitions::{ControllerRegistry, Frame, PixelTransition, Size, TransitionConfig, TransitionStyle};
//! use pixel_transitions_core::{FrameClock, ManualTimeSource, Property};
//!
//! let time = Arc::new(ManualTimeSource::new());
//! let clock = Arc::new(FrameClock::with_time_source(time.clone()));
//! let registry = ControllerRegistry::new(clock.clone());
//! let selection = Arc::new(Property::new(0usize));
//!
//! let view = PixelTransition::new(
//!     &registry,
//!     "slides",
//!     selection.clone(),
//!     TransitionStyle::Zoom { zoom_in: true },
//!     TransitionConfig::new().with_duration(Duration::from_millis(200)),
//!     vec!["intro", "details"],
//! );
//!
//! selection.set(1);
//! clock.tick();
//! time.advance(Duration::from_millis(100));
//! clock.tick();
//! assert!(view.frame(Size::new(640.0, 480.0)).is_some_and(|frame| frame.is_blend()));
//! ```

pub mod animation;
mod error;
pub mod render;
mod view;

pub use animation::{
    AnimationController, ControllerRegistry, Easing, IndexSource, TransitionConfig,
    TransitionSnapshot, ease,
};
pub use error::{Result, TransitionError};
pub use render::{LayerTransform, Size, TransitionStyle, Way, composite};
pub use view::{Frame, PixelTransition};

static_assertions::assert_impl_all!(AnimationController: Send, Sync);
static_assertions::assert_impl_all!(ControllerRegistry: Send, Sync);
static_assertions::assert_impl_all!(PixelTransition<String>: Send, Sync);
