//! Reactive value cells.
//!
//! A [`Property<T>`] wraps a value behind a read-write lock and reports
//! whether a write actually changed it. Applications typically keep the
//! selected pane index in a `Property<usize>` and hand an `Arc` of it to the
//! transition engine, which polls it once per frame.
//!
//! # Example
//!
//! ```
//! use pixel_transitions_core::Property;
//!
//! let selection = Property::new(0usize);
//! assert!(!selection.set(0));
//! assert!(selection.set(2));
//! assert_eq!(selection.get(), 2);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A thread-safe value with change detection.
///
/// `set()` compares the new value with the current one and returns whether
/// it changed; the caller decides whether that warrants a notification.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Overwrite the value without comparing.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the previous one if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
