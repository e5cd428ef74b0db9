//! Easing curves for transition progress.
//!
//! An easing curve maps linear progress `t` in `[0, 1]` onto eased progress.
//! Every curve passes through `(0, 0)` and `(1, 1)`; in between they only
//! differ in where they accelerate.

use std::f64::consts::{FRAC_PI_2, PI};

/// Available easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// No easing: output equals input.
    Linear,
    /// Starts slow, accelerates (quarter cosine).
    EaseIn,
    /// Starts fast, decelerates (quarter cosine).
    EaseOut,
    /// Slow start and end (half cosine).
    #[default]
    EaseInOut,
}

impl Easing {
    /// All easing curves.
    pub const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    /// Apply this curve to `t`. See [`ease`].
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        ease(self, t)
    }
}

/// Apply an easing curve to a progress value.
///
/// `t` is expected to be already clamped to `[0, 1]`; no clamping happens
/// here. At the endpoints the result matches `t` to within floating-point
/// rounding (about `1e-16`).
///
/// # Example
///
/// ```
/// use pixel_transitions::animation::{ease, Easing};
///
/// assert_eq!(ease(Easing::Linear, 0.25), 0.25);
/// assert!(ease(Easing::EaseIn, 0.5) < 0.5);
/// assert!(ease(Easing::EaseOut, 0.5) > 0.5);
/// assert!((ease(Easing::EaseInOut, 0.5) - 0.5).abs() < 1e-12);
/// ```
#[inline]
pub fn ease(easing: Easing, t: f64) -> f64 {
    match easing {
        Easing::Linear => t,
        Easing::EaseIn => (t * FRAC_PI_2 + PI).cos() + 1.0,
        Easing::EaseOut => (t * FRAC_PI_2 + 3.0 * FRAC_PI_2).cos(),
        Easing::EaseInOut => (t * PI + PI).cos() / 2.0 + 0.5,
    }
}

/// Interpolate between `start` and `end` at eased progress `t`.
#[inline]
pub fn lerp_eased(easing: Easing, start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * ease(easing, t)
}
