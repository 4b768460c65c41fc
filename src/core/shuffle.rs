//! Grouping and ordering of mapped records.
//!
//! The shuffle sits between map and reduce. With no comparators it
//! groups by natural key equality and keeps groups in the order their
//! keys first appear. A grouping comparator both defines which keys
//! share a group and sorts the groups. A key-order comparator sorts
//! records by their full key before grouping, so values reach the
//! reducer in key order. A value-order comparator sorts values inside
//! each group. Every sort is stable, so ties keep their input order.

use super::comparator::Comparator;
use super::pair::{Group, Pair};
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::trace;

type GroupFn<K, V> = fn(Vec<Pair<K, V>>) -> Vec<Group<K, V>>;

/// How records are partitioned into groups.
enum Grouping<K, V> {
    /// Natural key equality, captured while `K: Eq + Hash` is known
    FirstSeen(GroupFn<K, V>),
    Comparator(Comparator<K>),
}

/// Shuffle configuration: how keys group, plus optional key and value
/// ordering.
///
/// `Shuffle::new` groups by natural key equality and needs
/// `K: Eq + Hash + Clone`. `Shuffle::grouped_by` needs nothing from `K`
/// beyond the comparator.
///
/// # Example
///
/// ```rust
/// use mrtest::core::{Comparator, Group, Pair, Shuffle};
///
/// let records = vec![
///     Pair::new("b", "z"),
///     Pair::new("a", "x"),
///     Pair::new("b", "w"),
///     Pair::new("a", "y"),
/// ];
///
/// // First-seen key order by default
/// let groups = Shuffle::new().run(records.clone());
/// assert_eq!(
///     groups,
///     vec![Group::new("b", vec!["z", "w"]), Group::new("a", vec!["x", "y"])]
/// );
///
/// // Ascending key order once a grouping comparator is supplied
/// let groups = Shuffle::new()
///     .with_grouping(Comparator::natural())
///     .run(records);
/// assert_eq!(
///     groups,
///     vec![Group::new("a", vec!["x", "y"]), Group::new("b", vec!["z", "w"])]
/// );
/// ```
pub struct Shuffle<K, V> {
    grouping: Grouping<K, V>,
    key_order: Option<Comparator<K>>,
    value_order: Option<Comparator<V>>,
}

impl<K: Eq + Hash + Clone, V> Shuffle<K, V> {
    pub fn new() -> Self {
        Self::with_strategy(Grouping::FirstSeen(group_first_seen::<K, V>))
    }
}

impl<K, V> Shuffle<K, V> {
    /// Group solely by `comparator`. Keys need not be hashable.
    pub fn grouped_by(comparator: Comparator<K>) -> Self {
        Self::with_strategy(Grouping::Comparator(comparator))
    }

    fn with_strategy(grouping: Grouping<K, V>) -> Self {
        Self {
            grouping,
            key_order: None,
            value_order: None,
        }
    }

    pub fn with_grouping(mut self, comparator: Comparator<K>) -> Self {
        self.set_grouping(comparator);
        self
    }

    pub fn set_grouping(&mut self, comparator: Comparator<K>) {
        self.grouping = Grouping::Comparator(comparator);
    }

    /// Sort records by their full key before grouping.
    pub fn with_key_order(mut self, comparator: Comparator<K>) -> Self {
        self.set_key_order(comparator);
        self
    }

    pub fn set_key_order(&mut self, comparator: Comparator<K>) {
        self.key_order = Some(comparator);
    }

    pub fn with_value_order(mut self, comparator: Comparator<V>) -> Self {
        self.set_value_order(comparator);
        self
    }

    pub fn set_value_order(&mut self, comparator: Comparator<V>) {
        self.value_order = Some(comparator);
    }

    /// The grouping comparator, if one replaced natural key equality.
    pub fn grouping(&self) -> Option<&Comparator<K>> {
        match &self.grouping {
            Grouping::Comparator(comparator) => Some(comparator),
            Grouping::FirstSeen(_) => None,
        }
    }

    pub fn key_order(&self) -> Option<&Comparator<K>> {
        self.key_order.as_ref()
    }

    pub fn value_order(&self) -> Option<&Comparator<V>> {
        self.value_order.as_ref()
    }

    /// Partition `records` into groups.
    ///
    /// Every input value lands in exactly one group. Empty input gives
    /// no groups.
    pub fn run(&self, mut records: Vec<Pair<K, V>>) -> Vec<Group<K, V>> {
        if let Some(order) = &self.key_order {
            records.sort_by(|a, b| order.compare(&a.key, &b.key));
        }

        let mut groups = match &self.grouping {
            Grouping::FirstSeen(group) => group(records),
            Grouping::Comparator(grouping) => group_sorted(records, grouping),
        };

        if let Some(order) = &self.value_order {
            for group in &mut groups {
                group.values.sort_by(|a, b| order.compare(a, b));
            }
        }

        trace!(groups = groups.len(), "shuffle complete");
        groups
    }
}

impl<K: Eq + Hash + Clone, V> Default for Shuffle<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Shuffle<K, V> {
    fn clone(&self) -> Self {
        let grouping = match &self.grouping {
            Grouping::FirstSeen(group) => Grouping::FirstSeen(*group),
            Grouping::Comparator(comparator) => Grouping::Comparator(comparator.clone()),
        };
        Self {
            grouping,
            key_order: self.key_order.clone(),
            value_order: self.value_order.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Shuffle<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shuffle")
            .field("grouping", &self.grouping().is_some())
            .field("key_order", &self.key_order.is_some())
            .field("value_order", &self.value_order.is_some())
            .finish()
    }
}

fn group_first_seen<K: Eq + Hash + Clone, V>(records: Vec<Pair<K, V>>) -> Vec<Group<K, V>> {
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Group<K, V>> = Vec::new();

    for Pair { key, value } in records {
        match slots.get(&key).copied() {
            Some(slot) => groups[slot].values.push(value),
            None => {
                slots.insert(key.clone(), groups.len());
                groups.push(Group::new(key, vec![value]));
            }
        }
    }

    groups
}

fn group_sorted<K, V>(mut records: Vec<Pair<K, V>>, grouping: &Comparator<K>) -> Vec<Group<K, V>> {
    // Vec::sort_by is stable: the first key of each run is the
    // earliest member of its group.
    records.sort_by(|a, b| grouping.compare(&a.key, &b.key));

    records
        .into_iter()
        .map(|Pair { key, value }| Group::new(key, vec![value]))
        .coalesce(|mut current, next| {
            if grouping.equivalent(&current.key, &next.key) {
                current.values.extend(next.values);
                Ok(current)
            } else {
                Err((current, next))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&'static str, &'static str)]) -> Vec<Pair<&'static str, &'static str>> {
        items.iter().map(|&(k, v)| Pair::new(k, v)).collect()
    }

    #[test]
    fn empty_input_yields_no_groups() {
        let groups = Shuffle::<&str, &str>::new().run(Vec::new());
        assert!(groups.is_empty());
    }

    #[test]
    fn single_record_yields_single_group() {
        let groups = Shuffle::new().run(pairs(&[("a", "b")]));
        assert_eq!(groups, vec![Group::new("a", vec!["b"])]);
    }

    #[test]
    fn one_key_collects_values_in_input_order() {
        let groups = Shuffle::new().run(pairs(&[("a", "b"), ("a", "c")]));
        assert_eq!(groups, vec![Group::new("a", vec!["b", "c"])]);
    }

    #[test]
    fn default_keeps_first_seen_key_order() {
        let groups = Shuffle::new().run(pairs(&[("a", "x"), ("b", "z"), ("b", "w"), ("a", "y")]));
        assert_eq!(
            groups,
            vec![Group::new("a", vec!["x", "y"]), Group::new("b", vec!["z", "w"])]
        );

        let groups = Shuffle::new().run(pairs(&[("b", "z"), ("a", "x"), ("b", "w"), ("a", "y")]));
        assert_eq!(
            groups,
            vec![Group::new("b", vec!["z", "w"]), Group::new("a", vec!["x", "y"])]
        );
    }

    #[test]
    fn grouping_comparator_sorts_groups() {
        let groups = Shuffle::new()
            .with_grouping(Comparator::natural())
            .run(pairs(&[("b", "z"), ("a", "x"), ("b", "w"), ("a", "y")]));

        assert_eq!(
            groups,
            vec![Group::new("a", vec!["x", "y"]), Group::new("b", vec!["z", "w"])]
        );
    }

    #[test]
    fn grouping_comparator_merges_equivalent_keys() {
        let groups = Shuffle::new()
            .with_grouping(Comparator::by_key(|k: &&str| k.chars().next()))
            .run(vec![
                Pair::new("b1", 1),
                Pair::new("a3", 3),
                Pair::new("a1", 1),
                Pair::new("a2", 2),
            ]);

        // Representative key is the earliest-seen member of the group
        assert_eq!(
            groups,
            vec![Group::new("a3", vec![3, 1, 2]), Group::new("b1", vec![1])]
        );
    }

    #[test]
    fn value_order_sorts_within_groups() {
        let groups = Shuffle::new()
            .with_value_order(Comparator::natural())
            .run(vec![
                Pair::new("k", 3),
                Pair::new("j", 9),
                Pair::new("k", 1),
                Pair::new("k", 2),
            ]);

        assert_eq!(
            groups,
            vec![Group::new("k", vec![1, 2, 3]), Group::new("j", vec![9])]
        );
    }

    #[test]
    fn value_order_is_stable_for_ties() {
        // Compare only by tens digit; units record input order
        let groups = Shuffle::new()
            .with_value_order(Comparator::by_key(|v: &u32| v / 10))
            .run(vec![
                Pair::new("k", 21),
                Pair::new("k", 12),
                Pair::new("k", 23),
                Pair::new("k", 11),
            ]);

        assert_eq!(groups, vec![Group::new("k", vec![12, 11, 21, 23])]);
    }

    #[test]
    fn natural_grouping_matches_default_partition() {
        let records = pairs(&[("c", "1"), ("a", "2"), ("c", "3"), ("b", "4"), ("a", "5")]);

        let mut by_default = Shuffle::new().run(records.clone());
        let by_comparator = Shuffle::new()
            .with_grouping(Comparator::natural())
            .run(records);

        by_default.sort_by(|a, b| a.key.cmp(b.key));
        assert_eq!(by_default, by_comparator);
    }

    #[test]
    fn key_order_sorts_records_before_grouping() {
        // Groups by initial letter; values arrive sorted by the full key
        let groups = Shuffle::new()
            .with_grouping(Comparator::by_key(|k: &&str| k.as_bytes()[0]))
            .with_key_order(Comparator::natural())
            .run(vec![
                Pair::new("a3", 3),
                Pair::new("b1", 1),
                Pair::new("a1", 1),
                Pair::new("a2", 2),
            ]);

        assert_eq!(
            groups,
            vec![Group::new("a1", vec![1, 2, 3]), Group::new("b1", vec![1])]
        );
    }

    #[test]
    fn key_order_alone_sorts_first_seen_groups() {
        let groups = Shuffle::new()
            .with_key_order(Comparator::natural())
            .run(vec![Pair::new("b", 1), Pair::new("a", 2), Pair::new("b", 3)]);

        assert_eq!(
            groups,
            vec![Group::new("a", vec![2]), Group::new("b", vec![1, 3])]
        );
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Label(f64);

    #[test]
    fn grouped_by_needs_no_hashable_key() {
        let shuffle = Shuffle::grouped_by(Comparator::new(|a: &Label, b: &Label| {
            a.0.floor().total_cmp(&b.0.floor())
        }));

        let groups = shuffle.run(vec![
            Pair::new(Label(2.5), "x"),
            Pair::new(Label(1.1), "y"),
            Pair::new(Label(2.0), "z"),
        ]);

        assert_eq!(
            groups,
            vec![
                Group::new(Label(1.1), vec!["y"]),
                Group::new(Label(2.5), vec!["x", "z"]),
            ]
        );
    }

    #[test]
    fn accessors_report_configured_comparators() {
        let plain = Shuffle::<&str, i32>::new();
        assert!(plain.grouping().is_none());
        assert!(plain.key_order().is_none());
        assert!(plain.value_order().is_none());

        let configured = plain
            .clone()
            .with_grouping(Comparator::natural())
            .with_key_order(Comparator::natural().reversed())
            .with_value_order(Comparator::natural());
        let grouping = configured.grouping().unwrap();
        assert!(grouping.equivalent(&"a", &"a"));
        assert_eq!(
            configured.key_order().unwrap().compare(&"a", &"b"),
            std::cmp::Ordering::Greater
        );
        assert_eq!(
            configured.value_order().unwrap().compare(&1, &2),
            std::cmp::Ordering::Less
        );

        let copy = configured.clone();
        assert!(copy.grouping().is_some());
        assert_eq!(format!("{copy:?}"), "Shuffle { grouping: true, key_order: true, value_order: true }");
    }
}
