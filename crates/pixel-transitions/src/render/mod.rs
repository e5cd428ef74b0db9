//! Rendering contract: styles and per-pane layer transforms.
//!
//! Everything here is a pure function of the style, the eased fraction and
//! the pane size; no state is kept between frames.

mod layer;
mod style;

pub use layer::{Axis, LayerTransform, Size, composite};
pub use style::{TransitionStyle, Way};
