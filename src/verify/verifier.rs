//! Output and counter verification using Validation.

use crate::core::{CounterKey, Counters, Pair};
use crate::error::VerificationFailure;
use crate::verify::discrepancy::{Discrepancy, OrderMode};
use std::fmt::Display;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, error};

/// Expected results for one run.
/// Uses Validation to accumulate ALL discrepancies.
///
/// # Example
///
/// ```rust
/// use mrtest::core::Pair;
/// use mrtest::verify::{OrderMode, Verifier};
///
/// let verifier = Verifier::new(OrderMode::Ordered)
///     .expect_output(Pair::new("bar", 12))
///     .expect_output(Pair::new("foo", 52));
///
/// let actual = vec![Pair::new("foo", 52), Pair::new("bar", 12)];
/// let failure = verifier
///     .verify(&actual, &Default::default())
///     .unwrap_err();
///
/// assert_eq!(failure.discrepancies.len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct Verifier<K, V> {
    expected: Vec<Pair<K, V>>,
    expected_counters: Vec<(CounterKey, u64)>,
    mode: OrderMode,
}

impl<K, V> Verifier<K, V> {
    pub fn new(mode: OrderMode) -> Self {
        Self {
            expected: Vec::new(),
            expected_counters: Vec::new(),
            mode,
        }
    }

    pub fn expect_output(mut self, record: Pair<K, V>) -> Self {
        self.expected.push(record);
        self
    }

    pub fn expect_outputs(mut self, records: impl IntoIterator<Item = Pair<K, V>>) -> Self {
        self.expected.extend(records);
        self
    }

    pub fn expect_counter(mut self, key: CounterKey, value: u64) -> Self {
        self.expected_counters.push((key, value));
        self
    }

    pub fn add_output(&mut self, record: Pair<K, V>) {
        self.expected.push(record);
    }

    pub fn add_counter(&mut self, key: CounterKey, value: u64) {
        self.expected_counters.push((key, value));
    }

    pub fn set_mode(&mut self, mode: OrderMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> OrderMode {
        self.mode
    }

    pub fn expected_outputs(&self) -> &[Pair<K, V>] {
        &self.expected
    }

    pub fn expected_counters(&self) -> &[(CounterKey, u64)] {
        &self.expected_counters
    }
}

impl<K, V> Verifier<K, V>
where
    K: PartialEq + Display,
    V: PartialEq + Display,
{
    /// Check outputs, then counters, accumulating every discrepancy.
    pub fn check(
        &self,
        actual: &[Pair<K, V>],
        counters: &Counters,
    ) -> Validation<(), NonEmptyVec<Discrepancy>> {
        let found = output_discrepancies(actual, &self.expected, self.mode)
            .into_iter()
            .chain(counter_discrepancies(counters, &self.expected_counters));

        let checks: Vec<Validation<(), NonEmptyVec<Discrepancy>>> =
            found.map(Validation::fail).collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Run `check` and turn any discrepancies into one failure.
    pub fn verify(
        &self,
        actual: &[Pair<K, V>],
        counters: &Counters,
    ) -> Result<(), VerificationFailure> {
        match self.check(actual, counters) {
            Validation::Success(_) => {
                debug!(outputs = actual.len(), "verification passed");
                Ok(())
            }
            Validation::Failure(errors) => {
                let failure = VerificationFailure {
                    discrepancies: errors.iter().cloned().collect(),
                };
                error!(discrepancies = failure.discrepancies.len(), "{}", failure);
                Err(failure)
            }
        }
    }
}

/// Compare `actual` against `expected` and list every discrepancy.
///
/// Ordered mode first pairs records that already sit at their expected
/// position, then looks elsewhere for the rest. Unordered mode treats
/// both sides as multisets. Either way each actual record satisfies at
/// most one expected record.
pub fn output_discrepancies<K, V>(
    actual: &[Pair<K, V>],
    expected: &[Pair<K, V>],
    mode: OrderMode,
) -> Vec<Discrepancy>
where
    K: PartialEq + Display,
    V: PartialEq + Display,
{
    let mut consumed = vec![false; actual.len()];
    let mut found = Vec::new();

    match mode {
        OrderMode::Ordered => {
            let mut in_place = vec![false; expected.len()];
            for (i, record) in expected.iter().enumerate() {
                if actual.get(i) == Some(record) {
                    consumed[i] = true;
                    in_place[i] = true;
                }
            }

            for (i, record) in expected.iter().enumerate() {
                if in_place[i] {
                    continue;
                }
                match take_match(actual, &mut consumed, record) {
                    Some(j) => found.push(Discrepancy::Misplaced {
                        record: record.to_string(),
                        actual: j,
                        expected: i,
                    }),
                    None => found.push(Discrepancy::Missing {
                        record: record.to_string(),
                        position: Some(i),
                    }),
                }
            }
        }
        OrderMode::Unordered => {
            for record in expected {
                if take_match(actual, &mut consumed, record).is_none() {
                    found.push(Discrepancy::Missing {
                        record: record.to_string(),
                        position: None,
                    });
                }
            }
        }
    }

    let positional = mode == OrderMode::Ordered;
    for (j, record) in actual.iter().enumerate() {
        if !consumed[j] {
            found.push(Discrepancy::Unexpected {
                record: record.to_string(),
                position: positional.then_some(j),
            });
        }
    }

    found
}

/// Compare counter values against expectations, in expectation order.
pub fn counter_discrepancies(counters: &Counters, expected: &[(CounterKey, u64)]) -> Vec<Discrepancy> {
    expected
        .iter()
        .filter_map(|(key, value)| {
            let actual = counters.value(key);
            (actual != *value).then(|| Discrepancy::CounterMismatch {
                group: key.group.clone(),
                name: key.name.clone(),
                actual,
                expected: *value,
            })
        })
        .collect()
}

/// Consume the first not-yet-consumed actual record equal to `record`.
fn take_match<K: PartialEq, V: PartialEq>(
    actual: &[Pair<K, V>],
    consumed: &mut [bool],
    record: &Pair<K, V>,
) -> Option<usize> {
    let j = (0..actual.len()).find(|&j| !consumed[j] && actual[j] == *record)?;
    consumed[j] = true;
    Some(j)
}
