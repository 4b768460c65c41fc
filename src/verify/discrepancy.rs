//! Individual mismatches between actual and expected results.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One unit of mismatch found during verification.
///
/// Records are stored already rendered as `(key, value)` so a report
/// stays readable regardless of the record types involved.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum Discrepancy {
    #[error(
        "Matched expected output {record} but at incorrect position {actual} (expected position {expected})"
    )]
    Misplaced {
        record: String,
        actual: usize,
        expected: usize,
    },

    #[error("Missing expected output {record}{}", at_position(.position))]
    Missing {
        record: String,
        position: Option<usize>,
    },

    #[error("Received unexpected output {record}{}", at_position(.position))]
    Unexpected {
        record: String,
        position: Option<usize>,
    },

    #[error(
        "Counter with category {group} and name {name} have value {actual} instead of expected {expected}"
    )]
    CounterMismatch {
        group: String,
        name: String,
        actual: u64,
        expected: u64,
    },
}

fn at_position(position: &Option<usize>) -> String {
    position
        .map(|p| format!(" at position {p}"))
        .unwrap_or_default()
}

/// How actual output is compared against expected output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderMode {
    /// Records must appear at the expected positions
    Ordered,

    /// Records are compared as multisets
    Unordered,
}

impl OrderMode {
    pub fn from_sensitivity(order_sensitive: bool) -> Self {
        if order_sensitive {
            Self::Ordered
        } else {
            Self::Unordered
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn misplaced_message() {
        let d = Discrepancy::Misplaced {
            record: "(foo, 52)".to_string(),
            actual: 1,
            expected: 0,
        };
        assert_eq!(
            d.to_string(),
            "Matched expected output (foo, 52) but at incorrect position 1 (expected position 0)"
        );
    }

    #[test]
    fn position_suffix_is_optional() {
        let ordered = Discrepancy::Unexpected {
            record: "(foo, bar)".to_string(),
            position: Some(1),
        };
        let unordered = Discrepancy::Unexpected {
            record: "(foo, bar)".to_string(),
            position: None,
        };

        assert_eq!(
            ordered.to_string(),
            "Received unexpected output (foo, bar) at position 1"
        );
        assert_eq!(unordered.to_string(), "Received unexpected output (foo, bar)");
    }

    #[test]
    fn counter_message() {
        let d = Discrepancy::CounterMismatch {
            group: "category".to_string(),
            name: "name".to_string(),
            actual: 1,
            expected: 20,
        };
        assert_eq!(
            d.to_string(),
            "Counter with category category and name name have value 1 instead of expected 20"
        );
    }

    #[test]
    fn order_mode_from_flag() {
        assert_eq!(OrderMode::from_sensitivity(true), OrderMode::Ordered);
        assert_eq!(OrderMode::from_sensitivity(false), OrderMode::Unordered);
    }
}
