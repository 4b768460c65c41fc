//! Macros for writing record lists.

/// Build a `Vec<Pair<K, V>>` from `(key, value)` tuples.
///
/// # Example
///
/// ```
/// use mrtest::core::Pair;
/// use mrtest::pairs;
///
/// let records = pairs![("foo", 42), ("bar", 12)];
/// assert_eq!(records[0], Pair::new("foo", 42));
/// assert_eq!(records.len(), 2);
/// ```
#[macro_export]
macro_rules! pairs {
    () => {
        ::std::vec::Vec::new()
    };
    ($(($key:expr, $value:expr)),+ $(,)?) => {
        ::std::vec![$($crate::core::Pair::new($key, $value)),+]
    };
}
