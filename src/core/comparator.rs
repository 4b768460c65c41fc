//! Pluggable ordering for shuffle keys and values.
//!
//! A comparator is a pure total order supplied by the caller. It decides
//! which keys share a group, the order groups are emitted in, and the
//! order values take inside a group.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Pure total order over `T`.
///
/// # Example
///
/// ```rust
/// use mrtest::core::Comparator;
/// use std::cmp::Ordering;
///
/// // Group keys by their first character only
/// let by_initial = Comparator::by_key(|s: &String| s.chars().next());
///
/// assert!(by_initial.equivalent(&"a1".to_string(), &"a3".to_string()));
/// assert_eq!(
///     by_initial.compare(&"a1".to_string(), &"b1".to_string()),
///     Ordering::Less
/// );
/// ```
pub struct Comparator<T> {
    order: Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
}

impl<T> Comparator<T> {
    /// Create a comparator from an ordering function.
    ///
    /// The function must be deterministic and define a total order;
    /// shuffling relies on it for stable sorting.
    pub fn new<F>(order: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Comparator {
            order: Arc::new(order),
        }
    }

    /// Compare a projection of each element by its natural order.
    pub fn by_key<B, F>(project: F) -> Self
    where
        T: 'static,
        B: Ord + 'static,
        F: Fn(&T) -> B + Send + Sync + 'static,
    {
        Self::new(move |a, b| project(a).cmp(&project(b)))
    }

    /// Same relation, opposite direction.
    pub fn reversed(&self) -> Self
    where
        T: 'static,
    {
        let order = Arc::clone(&self.order);
        Self::new(move |a, b| order(b, a))
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.order)(a, b)
    }

    /// Whether the comparator places `a` and `b` in the same group.
    pub fn equivalent(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

impl<T: Ord + 'static> Comparator<T> {
    /// The natural order of `T`.
    pub fn natural() -> Self {
        Self::new(|a: &T, b: &T| a.cmp(b))
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            order: Arc::clone(&self.order),
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator").finish_non_exhaustive()
    }
}
