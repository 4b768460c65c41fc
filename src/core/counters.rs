//! Per-run counter bookkeeping.
//!
//! Counters are explicit state: each run creates one `Counters`, threads
//! it through every map, combine and reduce call, and hands it to the
//! verifier afterwards. Nothing is process-wide.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifies a counter by group and name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CounterKey {
    pub group: String,
    pub name: String,
}

impl CounterKey {
    pub fn new(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
        }
    }
}

/// Counter values accumulated during one run.
///
/// Unknown counters read as zero.
///
/// # Example
///
/// ```rust
/// use mrtest::core::Counters;
///
/// let mut counters = Counters::new();
/// counters.increment("records", "mapped", 2);
/// counters.increment("records", "mapped", 1);
///
/// assert_eq!(counters.get("records", "mapped"), 3);
/// assert_eq!(counters.get("records", "reduced"), 0);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    values: BTreeMap<CounterKey, u64>,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, group: impl Into<String>, name: impl Into<String>, amount: u64) {
        *self
            .values
            .entry(CounterKey::new(group, name))
            .or_insert(0) += amount;
    }

    pub fn get(&self, group: &str, name: &str) -> u64 {
        self.values
            .get(&CounterKey::new(group, name))
            .copied()
            .unwrap_or(0)
    }

    /// Fold another set of counters into this one.
    pub fn merge(&mut self, other: Counters) {
        for (key, amount) in other.values {
            *self.values.entry(key).or_insert(0) += amount;
        }
    }

    pub fn value(&self, key: &CounterKey) -> u64 {
        self.values.get(key).copied().unwrap_or(0)
    }

    /// Counters in (group, name) order.
    pub fn iter(&self) -> impl Iterator<Item = (&CounterKey, u64)> {
        self.values.iter().map(|(k, v)| (k, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
