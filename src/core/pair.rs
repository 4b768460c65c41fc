//! Key/value records and shuffled groups.
//!
//! Records are plain owned values. A driver that stores a `Pair` owns
//! its key and value outright, so later changes to the caller's copies
//! never leak into a stored fixture.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single key/value record.
///
/// # Example
///
/// ```rust
/// use mrtest::core::Pair;
///
/// let pair = Pair::new("foo", 52);
/// assert_eq!(pair.to_string(), "(foo, 52)");
///
/// let (key, value) = pair.into_tuple();
/// assert_eq!(key, "foo");
/// assert_eq!(value, 52);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Pair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Build a pair by cloning borrowed parts.
    pub fn copied(key: &K, value: &V) -> Self
    where
        K: Clone,
        V: Clone,
    {
        Self {
            key: key.clone(),
            value: value.clone(),
        }
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    fn from(pair: Pair<K, V>) -> Self {
        (pair.key, pair.value)
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for Pair<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.key, self.value)
    }
}

/// A key together with every value shuffled into its group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group<K, V> {
    pub key: K,
    pub values: Vec<V>,
}

impl<K, V> Group<K, V> {
    pub fn new(key: K, values: Vec<V>) -> Self {
        Self { key, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_report_format() {
        let pair = Pair::new("bar".to_string(), 12_i64);
        assert_eq!(pair.to_string(), "(bar, 12)");
    }

    #[test]
    fn copied_is_independent_of_source() {
        let mut key = String::from("a");
        let mut value = 1_i64;
        let pair = Pair::copied(&key, &value);

        key.push('b');
        value = 2;

        assert_eq!(pair, Pair::new("a".to_string(), 1));
        assert_eq!(key, "ab");
        assert_eq!(value, 2);
    }

    #[test]
    fn tuple_conversions() {
        let pair: Pair<&str, u8> = ("k", 7).into();
        assert_eq!(pair.key, "k");

        let tuple: (&str, u8) = pair.into();
        assert_eq!(tuple, ("k", 7));
    }

    #[test]
    fn group_reports_length() {
        let group = Group::new("a", vec![1, 2, 3]);
        assert_eq!(group.len(), 3);
        assert!(!group.is_empty());
    }
}
