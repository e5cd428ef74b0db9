//! Sources for the externally owned selection index.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pixel_transitions_core::Property;

/// A read-only view onto the caller's selected pane index.
///
/// Polled once per frame by the controller; the engine never writes it.
/// Indices are expected to lie in `[0, pane_count)`, which is not checked.
pub trait IndexSource: Send + Sync {
    /// The currently selected index.
    fn index(&self) -> usize;
}

impl IndexSource for Property<usize> {
    fn index(&self) -> usize {
        self.get()
    }
}

impl IndexSource for AtomicUsize {
    fn index(&self) -> usize {
        self.load(Ordering::Acquire)
    }
}

impl<T: IndexSource + ?Sized> IndexSource for Arc<T> {
    fn index(&self) -> usize {
        (**self).index()
    }
}

/// Adapts a closure into an [`IndexSource`].
///
/// # Example
///
/// ```
/// use pixel_transitions::animation::{FnIndexSource, IndexSource};
///
/// let source = FnIndexSource(|| 3);
/// assert_eq!(source.index(), 3);
/// ```
pub struct FnIndexSource<F>(pub F);

impl<F> IndexSource for FnIndexSource<F>
where
    F: Fn() -> usize + Send + Sync,
{
    fn index(&self) -> usize {
        (self.0)()
    }
}
