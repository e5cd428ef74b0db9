//! Pane view binding.
//!
//! [`PixelTransition`] ties an ordered list of panes and a style to the
//! controller registered for an identity. Each frame it answers one question:
//! draw a single pane, or blend two?

use std::sync::Arc;

use pixel_transitions_core::PerfSpan;
use pixel_transitions_core::logging::{span_names, targets};

use crate::animation::{AnimationController, ControllerRegistry, IndexSource, TransitionConfig};
use crate::render::{LayerTransform, Size, TransitionStyle, composite};

/// What to draw for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame<'a, C> {
    /// No transition running: draw this pane as is.
    Still(&'a C),
    /// A transition is running: draw `from` then `to` with their layers.
    Blend {
        /// Outgoing pane.
        from: &'a C,
        /// Incoming pane.
        to: &'a C,
        /// Transform for the outgoing pane.
        from_layer: LayerTransform,
        /// Transform for the incoming pane.
        to_layer: LayerTransform,
        /// Eased progress the layers were computed from.
        fraction: f64,
    },
}

impl<C> Frame<'_, C> {
    /// Whether this frame needs compositing.
    pub fn is_blend(&self) -> bool {
        matches!(self, Frame::Blend { .. })
    }
}

/// A set of panes that transition when the selected index changes.
///
/// Views built with the same identity share one controller, so a view
/// re-created every frame keeps its animation going.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pixel_transitions::{ControllerRegistry, Frame, PixelTransition, Size, TransitionConfig, TransitionStyle};
/// use pixel_transitions_core::{FrameClock, Property};
///
/// let registry = ControllerRegistry::new(Arc::new(FrameClock::new()));
/// let selection = Arc::new(Property::new(0usize));
/// let view = PixelTransition::new(
///     &registry,
///     "pages",
///     selection.clone(),
///     TransitionStyle::Cross,
///     TransitionConfig::new(),
///     vec!["first", "second"],
/// );
///
/// assert_eq!(view.frame(Size::new(100.0, 100.0)), Some(Frame::Still(&"first")));
/// ```
pub struct PixelTransition<C> {
    panes: Vec<C>,
    style: TransitionStyle,
    controller: Arc<AnimationController>,
}

impl<C> PixelTransition<C> {
    /// Bind `panes` to the controller for `identity`, creating it if needed.
    pub fn new(
        registry: &ControllerRegistry,
        identity: &str,
        selection: Arc<dyn IndexSource>,
        style: TransitionStyle,
        config: TransitionConfig,
        panes: Vec<C>,
    ) -> Self {
        let controller = registry.get_or_create(identity, selection, config);
        Self::with_controller(controller, style, panes)
    }

    /// Bind `panes` to an existing controller.
    pub fn with_controller(controller: Arc<AnimationController>, style: TransitionStyle, panes: Vec<C>) -> Self {
        Self {
            panes,
            style,
            controller,
        }
    }

    /// The panes, in index order.
    pub fn panes(&self) -> &[C] {
        &self.panes
    }

    /// Number of panes.
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    /// Style used when blending.
    pub fn style(&self) -> TransitionStyle {
        self.style
    }

    /// The controller shared by every view with this identity.
    pub fn controller(&self) -> &Arc<AnimationController> {
        &self.controller
    }

    /// Identity of the bound controller.
    pub fn identity(&self) -> &str {
        self.controller.identity()
    }

    /// Compose the current frame for an area of `size`.
    ///
    /// Returns `None` if the controller refers to a pane that does not exist.
    pub fn frame(&self, size: Size) -> Option<Frame<'_, C>> {
        let _span = PerfSpan::new(span_names::COMPOSE);
        let snapshot = self.controller.snapshot();

        if !snapshot.active {
            return self.pane(snapshot.settled_index()).map(Frame::Still);
        }

        let from = self.pane(snapshot.from_index)?;
        let to = self.pane(snapshot.to_index)?;
        let (from_layer, to_layer) = composite(self.style, snapshot.fraction, size);
        tracing::trace!(
            target: targets::VIEW,
            identity = self.identity(),
            style = self.style.name(),
            fraction = snapshot.fraction,
            "blend frame"
        );

        Some(Frame::Blend {
            from,
            to,
            from_layer,
            to_layer,
            fraction: snapshot.fraction,
        })
    }

    fn pane(&self, index: usize) -> Option<&C> {
        let pane = self.panes.get(index);
        if pane.is_none() {
            tracing::warn!(
                target: targets::VIEW,
                identity = self.identity(),
                index,
                pane_count = self.panes.len(),
                "index out of range"
            );
        }
        pane
    }
}

impl<C> std::fmt::Debug for PixelTransition<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelTransition")
            .field("identity", &self.identity())
            .field("style", &self.style)
            .field("panes", &self.panes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pixel_transitions_core::{FrameClock, ManualTimeSource, Property};

    use super::*;
    use crate::animation::Easing;

    const SIZE: Size = Size::new(100.0, 50.0);

    struct Fixture {
        time: Arc<ManualTimeSource>,
        clock: Arc<FrameClock>,
        selection: Arc<Property<usize>>,
        view: PixelTransition<&'static str>,
    }

    fn fixture(style: TransitionStyle) -> Fixture {
        let time = Arc::new(ManualTimeSource::new());
        let clock = Arc::new(FrameClock::with_time_source(time.clone()));
        let registry = ControllerRegistry::new(clock.clone());
        let selection = Arc::new(Property::new(0usize));
        let view = PixelTransition::new(
            &registry,
            "view",
            selection.clone(),
            style,
            TransitionConfig::new()
                .with_duration(Duration::from_millis(100))
                .with_easing(Easing::Linear),
            vec!["a", "b", "c"],
        );
        Fixture {
            time,
            clock,
            selection,
            view,
        }
    }

    impl Fixture {
        fn tick(&self, millis: u64) {
            self.time.advance(Duration::from_millis(millis));
            self.clock.tick();
        }
    }

    #[test]
    fn test_idle_frame_is_still() {
        let fixture = fixture(TransitionStyle::Cross);
        assert_eq!(fixture.view.frame(SIZE), Some(Frame::Still(&"a")));
    }

    #[test]
    fn test_blend_during_run() {
        let fixture = fixture(TransitionStyle::Pan(crate::render::Way::Left));
        fixture.selection.set(2);
        fixture.tick(0);
        fixture.tick(50);

        let frame = fixture.view.frame(SIZE).unwrap();
        let Frame::Blend {
            from,
            to,
            from_layer,
            to_layer,
            fraction,
        } = frame
        else {
            panic!("expected blend, got {frame:?}");
        };
        assert_eq!((*from, *to), ("a", "c"));
        assert!((fraction - 0.5).abs() < 1e-9);
        assert!((from_layer.offset.0 + 50.0).abs() < 1e-3);
        assert!((to_layer.opacity - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_settles_on_new_pane() {
        let fixture = fixture(TransitionStyle::Cross);
        fixture.selection.set(1);
        fixture.tick(0);
        fixture.tick(100);

        assert_eq!(fixture.view.frame(SIZE), Some(Frame::Still(&"b")));
    }

    #[test]
    fn test_out_of_range_index_yields_none() {
        let fixture = fixture(TransitionStyle::Cross);
        fixture.selection.set(7);
        fixture.tick(0);
        assert!(fixture.view.frame(SIZE).is_none());

        fixture.tick(100);
        assert!(fixture.view.frame(SIZE).is_none());
    }
}
