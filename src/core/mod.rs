//! Core record types and the in-memory shuffle.
//!
//! This module holds the pure parts of the harness:
//! - `Pair` and `Group` records
//! - `Comparator` capabilities for grouping and value order
//! - the `Shuffle` engine
//! - per-run `Counters`
//!
//! Nothing here calls user code.

mod comparator;
mod counters;
mod pair;
mod shuffle;

pub use comparator::Comparator;
pub use counters::{CounterKey, Counters};
pub use pair::{Group, Pair};
pub use shuffle::Shuffle;
