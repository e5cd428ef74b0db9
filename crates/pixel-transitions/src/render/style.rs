//! Transition styles and their parameters.

/// Direction of travel for panning and flipping styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Way {
    /// Content moves towards the left edge.
    Left,
    /// Content moves towards the right edge.
    Right,
    /// Content moves towards the top edge.
    Up,
    /// Content moves towards the bottom edge.
    Down,
}

impl Way {
    /// All four ways.
    pub const ALL: [Way; 4] = [Way::Left, Way::Right, Way::Up, Way::Down];

    /// Whether motion happens along the x axis.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Way::Left | Way::Right)
    }

    /// Unit vector of the motion, in screen coordinates (y grows downwards).
    #[inline]
    pub fn unit(self) -> (f32, f32) {
        match self {
            Way::Left => (-1.0, 0.0),
            Way::Right => (1.0, 0.0),
            Way::Up => (0.0, -1.0),
            Way::Down => (0.0, 1.0),
        }
    }
}

/// How the outgoing pane is replaced by the incoming one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TransitionStyle {
    /// Cross-fade: opacities swap linearly with the fraction.
    #[default]
    Cross,
    /// Slide both panes one full extent along `Way` while fading.
    Pan(Way),
    /// Fade through a blur of up to `radius` pixels.
    Blur {
        /// Blur radius at the extremes.
        radius: f32,
    },
    /// Card flip around the axis perpendicular to `Way`.
    Flip(Way),
    /// Scale through the viewer. `zoom_in` grows the outgoing pane away;
    /// otherwise it shrinks away and the incoming pane arrives from large.
    Zoom {
        /// Zoom towards the viewer.
        zoom_in: bool,
    },
}

impl TransitionStyle {
    /// Default blur radius in pixels.
    pub const DEFAULT_BLUR_RADIUS: f32 = 20.0;

    /// Blur style with the default radius.
    pub fn blur() -> Self {
        TransitionStyle::Blur {
            radius: Self::DEFAULT_BLUR_RADIUS,
        }
    }

    /// The way parameter, for styles that have one.
    pub fn way(&self) -> Option<Way> {
        match *self {
            TransitionStyle::Pan(way) | TransitionStyle::Flip(way) => Some(way),
            _ => None,
        }
    }

    /// The direction parameter, for styles that have one.
    pub fn direction(&self) -> Option<bool> {
        match *self {
            TransitionStyle::Zoom { zoom_in } => Some(zoom_in),
            _ => None,
        }
    }

    /// Short lowercase name, as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            TransitionStyle::Cross => "cross",
            TransitionStyle::Pan(_) => "pan",
            TransitionStyle::Blur { .. } => "blur",
            TransitionStyle::Flip(_) => "flip",
            TransitionStyle::Zoom { .. } => "zoom",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameters() {
        assert_eq!(TransitionStyle::Cross.way(), None);
        assert_eq!(TransitionStyle::Pan(Way::Up).way(), Some(Way::Up));
        assert_eq!(TransitionStyle::Flip(Way::Left).way(), Some(Way::Left));
        assert_eq!(TransitionStyle::Zoom { zoom_in: false }.direction(), Some(false));
        assert_eq!(TransitionStyle::blur().direction(), None);
        assert_eq!(TransitionStyle::default(), TransitionStyle::Cross);
    }

    #[test]
    fn test_way_axes() {
        for way in Way::ALL {
            let (x, y) = way.unit();
            assert_eq!(way.is_horizontal(), y == 0.0);
            assert_eq!(x.abs() + y.abs(), 1.0);
        }
    }
}
