//! Testing a full map → shuffle → reduce stage.

use crate::core::{Comparator, Group, Pair, Shuffle};
use crate::driver::fixture::Driver;
use crate::stage::{Context, Stage, Values};

/// Runs one stage end to end, with an optional combiner and custom
/// grouping or value ordering.
///
/// # Example
///
/// ```rust
/// use mrtest::driver::MapReduceDriver;
/// use mrtest::stage::library::{identity_mapper, sum_reducer};
///
/// let mut driver = MapReduceDriver::new()
///     .with_mapper(identity_mapper())
///     .with_reducer(sum_reducer())
///     .with_input("foo", 42)
///     .with_input("bar", 12)
///     .with_input("foo", 10)
///     .with_output("foo", 52)
///     .with_output("bar", 12);
///
/// driver.run_test().unwrap();
/// ```
pub type MapReduceDriver<K1, V1, K2, V2, K3, V3> = Driver<Stage<K1, V1, K2, V2, K3, V3>>;

impl<K1, V1, K2, V2, K3, V3> Driver<Stage<K1, V1, K2, V2, K3, V3>>
where
    K1: Clone,
    V1: Clone,
{
    /// A driver whose stage groups keys solely by `comparator`, for
    /// intermediate keys that are not hashable.
    pub fn grouped_by(comparator: Comparator<K2>) -> Self {
        Driver::from_subject(Stage::from_shuffle(Shuffle::grouped_by(comparator)))
    }

    pub fn with_mapper<F>(mut self, mapper: F) -> Self
    where
        F: FnMut(K1, V1, &mut Context<K2, V2>) -> anyhow::Result<()> + 'static,
    {
        self.subject_mut().set_mapper(mapper);
        self
    }

    pub fn with_combiner<F>(mut self, combiner: F) -> Self
    where
        F: FnMut(K2, Values<V2>, &mut Context<K2, V2>) -> anyhow::Result<()> + 'static,
    {
        self.subject_mut().set_combiner(combiner);
        self
    }

    pub fn with_reducer<F>(mut self, reducer: F) -> Self
    where
        F: FnMut(K2, Values<V2>, &mut Context<K3, V3>) -> anyhow::Result<()> + 'static,
    {
        self.subject_mut().set_reducer(reducer);
        self
    }

    /// Keys the comparator reports as equal share one reduce call.
    pub fn with_grouping(mut self, comparator: Comparator<K2>) -> Self {
        self.subject_mut().set_grouping(comparator);
        self
    }

    /// Reducers see each group's values in full-key order.
    pub fn with_key_order(mut self, comparator: Comparator<K2>) -> Self {
        self.subject_mut().set_key_order(comparator);
        self
    }

    pub fn with_value_order(mut self, comparator: Comparator<V2>) -> Self {
        self.subject_mut().set_value_order(comparator);
        self
    }

    /// Group records the way this driver's stage would before reducing.
    pub fn shuffle(&self, records: Vec<Pair<K2, V2>>) -> Vec<Group<K2, V2>> {
        self.subject().shuffle().run(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::library::{identity_mapper, identity_reducer, sum_reducer};

    #[test]
    fn shuffle_uses_first_seen_order() {
        let driver: MapReduceDriver<&str, i64, &str, i64, &str, i64> = MapReduceDriver::new();

        let groups = driver.shuffle(vec![
            Pair::new("b", 1),
            Pair::new("a", 2),
            Pair::new("b", 3),
        ]);

        assert_eq!(groups, vec![Group::new("b", vec![1, 3]), Group::new("a", vec![2])]);
    }

    #[test]
    fn shuffle_honours_grouping_comparator() {
        let driver: MapReduceDriver<&str, i64, &str, i64, &str, i64> =
            MapReduceDriver::new().with_grouping(Comparator::natural());

        let groups = driver.shuffle(vec![Pair::new("b", 1), Pair::new("a", 2)]);

        assert_eq!(groups, vec![Group::new("a", vec![2]), Group::new("b", vec![1])]);
    }

    #[test]
    fn sum_combiner_does_not_change_totals() {
        let mut driver = MapReduceDriver::new()
            .with_mapper(identity_mapper())
            .with_combiner(sum_reducer())
            .with_reducer(sum_reducer())
            .with_input("foo", 42)
            .with_input("bar", 12)
            .with_input("foo", 10)
            .with_output("foo", 52)
            .with_output("bar", 12);

        driver.run_test().unwrap();
    }

    #[test]
    fn value_order_reaches_the_reducer() {
        let mut driver = MapReduceDriver::new()
            .with_mapper(identity_mapper())
            .with_reducer(identity_reducer())
            .with_value_order(Comparator::natural().reversed())
            .with_input("k", 1)
            .with_input("k", 3)
            .with_input("k", 2)
            .with_output("k", 3)
            .with_output("k", 2)
            .with_output("k", 1);

        driver.run_test().unwrap();
    }

    #[test]
    fn key_order_decides_value_arrival() {
        // Grouped by initial letter; values arrive by the second
        // character of their original key
        let mut driver = MapReduceDriver::new()
            .with_mapper(identity_mapper())
            .with_reducer(identity_reducer())
            .with_grouping(Comparator::by_key(|k: &&str| k.chars().next()))
            .with_key_order(Comparator::by_key(|k: &&str| k.chars().nth(1)))
            .with_input("a1", 3)
            .with_input("b1", 1)
            .with_input("a3", 1)
            .with_input("a2", 2)
            .with_output("a1", 3)
            .with_output("a1", 2)
            .with_output("a1", 1)
            .with_output("b1", 1);

        driver.run_test_ordered(true).unwrap();
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Span(f32, f32);

    impl std::fmt::Display for Span {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}..{}", self.0, self.1)
        }
    }

    #[test]
    fn grouped_by_accepts_keys_without_hash() {
        let mut driver = MapReduceDriver::grouped_by(Comparator::new(|a: &Span, b: &Span| {
            a.0.total_cmp(&b.0)
        }))
        .with_mapper(identity_mapper())
        .with_reducer(sum_reducer())
        .with_input(Span(1.0, 2.0), 5_i64)
        .with_input(Span(0.5, 9.0), 1)
        .with_input(Span(1.0, 4.0), 7)
        .with_output(Span(0.5, 9.0), 1)
        .with_output(Span(1.0, 2.0), 12);

        driver.run_test_ordered(true).unwrap();
    }
}
