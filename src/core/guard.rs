//! Guard predicates for gating handler table rows.
//!
//! Guards are pure boolean functions over the execution context. A row whose
//! guard rejects the context is skipped, so the event keeps bubbling.

use std::fmt;
use std::sync::Arc;

/// Pure predicate over the machine context.
///
/// # Example
///
/// ```rust
/// use hsm::core::Guard;
///
/// struct Battery {
///     level: u8,
/// }
///
/// let charged = Guard::new(|b: &Battery| b.level > 20);
///
/// assert!(charged.check(&Battery { level: 80 }));
/// assert!(!charged.check(&Battery { level: 5 }));
/// ```
pub struct Guard<C> {
    predicate: Arc<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Guard<C> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic, side-effect free and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard accepts this context.
    pub fn check(&self, context: &C) -> bool {
        (self.predicate)(context)
    }

    /// Guard accepting only contexts that this guard rejects.
    pub fn negate(self) -> Self
    where
        C: 'static,
    {
        let predicate = self.predicate;
        Guard::new(move |context: &C| !(*predicate)(context))
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
