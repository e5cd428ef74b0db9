//! Per-pane layer transforms and the compositing contract.
//!
//! [`composite`] turns a style and a fraction into one [`LayerTransform`] for
//! the outgoing pane and one for the incoming pane. Painting them is left to
//! the host toolkit: draw the outgoing pane, then the incoming pane, each with
//! its transform applied about the pane centre.
//!
//! At fraction `0` the outgoing layer is [`LayerTransform::IDENTITY`] and the
//! incoming one is invisible; at fraction `1` it is the other way round.

use super::style::{TransitionStyle, Way};

/// Width and height of the area the panes are drawn into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}

impl From<(f32, f32)> for Size {
    fn from((width, height): (f32, f32)) -> Self {
        Self { width, height }
    }
}

/// Rotation axis for flips, in the plane of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Horizontal axis: the pane tips top-over-bottom.
    X,
    /// Vertical axis: the pane turns like a page.
    #[default]
    Y,
}

/// Visual adjustments for one pane during a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerTransform {
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Translation in pixels.
    pub offset: (f32, f32),
    /// Gaussian blur radius in pixels.
    pub blur_radius: f32,
    /// Axis of `rotation_degrees`.
    pub rotation_axis: Axis,
    /// 3D rotation about `rotation_axis`.
    pub rotation_degrees: f32,
    /// Uniform scale about the centre.
    pub scale: f32,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl LayerTransform {
    /// Fully opaque and untransformed.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset: (0.0, 0.0),
        blur_radius: 0.0,
        rotation_axis: Axis::Y,
        rotation_degrees: 0.0,
        scale: 1.0,
    };

    /// Not drawn at all.
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        ..Self::IDENTITY
    };

    /// Whether the layer contributes anything to the output.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Whether this is exactly [`LayerTransform::IDENTITY`].
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }
}

/// Compute the outgoing and incoming layer transforms at `fraction`.
///
/// `fraction` is clamped to `[0, 1]`, so eased values that overshoot by a
/// rounding error are harmless. Pure and allocation-free.
pub fn composite(style: TransitionStyle, fraction: f64, size: Size) -> (LayerTransform, LayerTransform) {
    let f = fraction.clamp(0.0, 1.0) as f32;
    let fade_out = LayerTransform::IDENTITY.with_opacity(1.0 - f);
    let fade_in = LayerTransform::IDENTITY.with_opacity(f);

    match style {
        TransitionStyle::Cross => (fade_out, fade_in),

        TransitionStyle::Pan(way) => {
            let (dx, dy) = way.unit();
            let (w, h) = (size.width, size.height);
            (
                LayerTransform {
                    offset: (dx * w * f, dy * h * f),
                    ..fade_out
                },
                LayerTransform {
                    offset: (-dx * w * (1.0 - f), -dy * h * (1.0 - f)),
                    ..fade_in
                },
            )
        }

        TransitionStyle::Blur { radius } => (
            LayerTransform {
                blur_radius: radius * f,
                ..fade_out
            },
            LayerTransform {
                blur_radius: radius * (1.0 - f),
                ..fade_in
            },
        ),

        TransitionStyle::Flip(way) => flip(way, f),

        TransitionStyle::Zoom { zoom_in } => {
            let (out_scale, in_scale) = if zoom_in {
                (1.0 + f, 0.5 + 0.5 * f)
            } else {
                (1.0 - 0.5 * f, 2.0 - f)
            };
            (
                LayerTransform {
                    scale: out_scale,
                    ..fade_out
                },
                LayerTransform {
                    scale: in_scale,
                    ..fade_in
                },
            )
        }
    }
}

/// Outgoing pane turns edge-on during the first half, incoming pane turns
/// back from edge-on during the second.
fn flip(way: Way, f: f32) -> (LayerTransform, LayerTransform) {
    let (dx, dy) = way.unit();
    let sign = dx + dy;
    let axis = if way.is_horizontal() { Axis::Y } else { Axis::X };
    let turned = |degrees: f32| LayerTransform {
        rotation_axis: axis,
        rotation_degrees: degrees,
        ..LayerTransform::IDENTITY
    };

    if f < 0.5 {
        (
            turned(sign * 90.0 * (2.0 * f)),
            LayerTransform {
                rotation_axis: axis,
                ..LayerTransform::HIDDEN
            },
        )
    } else {
        (
            LayerTransform {
                rotation_axis: axis,
                ..LayerTransform::HIDDEN
            },
            turned(-sign * 90.0 * (2.0 - 2.0 * f)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;
    const SIZE: Size = Size::new(320.0, 200.0);

    fn all_styles() -> Vec<TransitionStyle> {
        let mut styles = vec![
            TransitionStyle::Cross,
            TransitionStyle::blur(),
            TransitionStyle::Zoom { zoom_in: true },
            TransitionStyle::Zoom { zoom_in: false },
        ];
        for way in Way::ALL {
            styles.push(TransitionStyle::Pan(way));
            styles.push(TransitionStyle::Flip(way));
        }
        styles
    }

    fn assert_identity(layer: &LayerTransform, context: &str) {
        let close = |a: f32, b: f32| (a - b).abs() < EPSILON;
        assert!(
            close(layer.opacity, 1.0)
                && close(layer.offset.0, 0.0)
                && close(layer.offset.1, 0.0)
                && close(layer.blur_radius, 0.0)
                && close(layer.rotation_degrees, 0.0)
                && close(layer.scale, 1.0),
            "{context}: {layer:?} is not identity"
        );
    }

    #[test]
    fn test_endpoints() {
        for style in all_styles() {
            let (from, to) = composite(style, 0.0, SIZE);
            assert_identity(&from, &format!("{style:?} outgoing at 0"));
            assert!(!to.is_visible(), "{style:?} incoming visible at 0");

            let (from, to) = composite(style, 1.0, SIZE);
            assert!(!from.is_visible(), "{style:?} outgoing visible at 1");
            assert_identity(&to, &format!("{style:?} incoming at 1"));
        }
    }

    #[test]
    fn test_cross_midpoint() {
        let (from, to) = composite(TransitionStyle::Cross, 0.25, SIZE);
        assert_eq!(from.opacity, 0.75);
        assert_eq!(to.opacity, 0.25);
        assert_eq!(from.offset, (0.0, 0.0));
    }

    #[test]
    fn test_pan_left_slides_one_width() {
        let (from, to) = composite(TransitionStyle::Pan(Way::Left), 0.5, SIZE);
        assert_eq!(from.offset, (-160.0, 0.0));
        assert_eq!(to.offset, (160.0, 0.0));
    }

    #[test]
    fn test_pan_down_slides_one_height() {
        let (from, to) = composite(TransitionStyle::Pan(Way::Down), 0.5, SIZE);
        assert_eq!(from.offset, (0.0, 100.0));
        assert_eq!(to.offset, (0.0, -100.0));
    }

    #[test]
    fn test_blur_peaks_at_extremes() {
        let (from, to) = composite(TransitionStyle::Blur { radius: 10.0 }, 0.5, SIZE);
        assert_eq!(from.blur_radius, 5.0);
        assert_eq!(to.blur_radius, 5.0);
    }

    #[test]
    fn test_flip_halves() {
        let (from, to) = composite(TransitionStyle::Flip(Way::Right), 0.25, SIZE);
        assert_eq!(from.rotation_axis, Axis::Y);
        assert!((from.rotation_degrees - 45.0).abs() < EPSILON);
        assert!(!to.is_visible());

        let (from, to) = composite(TransitionStyle::Flip(Way::Up), 0.75, SIZE);
        assert!(!from.is_visible());
        assert_eq!(to.rotation_axis, Axis::X);
        assert!((to.rotation_degrees - 45.0).abs() < EPSILON);
    }

    #[test]
    fn test_zoom_scales() {
        let (from, to) = composite(TransitionStyle::Zoom { zoom_in: true }, 0.5, SIZE);
        assert_eq!((from.scale, to.scale), (1.5, 0.75));

        let (from, to) = composite(TransitionStyle::Zoom { zoom_in: false }, 0.5, SIZE);
        assert_eq!((from.scale, to.scale), (0.75, 1.5));
    }

    #[test]
    fn test_fraction_is_clamped() {
        assert_eq!(
            composite(TransitionStyle::Cross, 1.0 + 1e-12, SIZE),
            composite(TransitionStyle::Cross, 1.0, SIZE)
        );
        assert_eq!(
            composite(TransitionStyle::Cross, -0.5, SIZE),
            composite(TransitionStyle::Cross, 0.0, SIZE)
        );
    }
}
