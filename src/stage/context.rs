//! The output collector handed to user map/combine/reduce functions.

use crate::core::{Counters, Pair};

/// Owning iterator over the values of one shuffled group.
pub type Values<V> = std::vec::IntoIter<V>;

/// A map function: consumes one input record, emits zero or more pairs.
pub type MapFn<K1, V1, K2, V2> =
    Box<dyn FnMut(K1, V1, &mut Context<K2, V2>) -> anyhow::Result<()>>;

/// A combine or reduce function: consumes one group, emits zero or more pairs.
pub type ReduceFn<K1, V1, K2, V2> =
    Box<dyn FnMut(K1, Values<V1>, &mut Context<K2, V2>) -> anyhow::Result<()>>;

/// Collects what a user function emits during one phase.
///
/// Emitted pairs are materialized in emission order. Counter
/// increments made here are folded into the run's counters once the
/// phase finishes.
///
/// # Example
///
/// ```rust
/// use mrtest::stage::Context;
///
/// let mut ctx: Context<&str, u64> = Context::new();
/// ctx.emit("foo", 1);
/// ctx.increment_counter("words", "seen", 1);
///
/// let (output, counters) = ctx.finish();
/// assert_eq!(output.len(), 1);
/// assert_eq!(counters.get("words", "seen"), 1);
/// ```
#[derive(Debug)]
pub struct Context<K, V> {
    output: Vec<Pair<K, V>>,
    counters: Counters,
}

impl<K, V> Context<K, V> {
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            counters: Counters::new(),
        }
    }

    pub fn emit(&mut self, key: K, value: V) {
        self.output.push(Pair::new(key, value));
    }

    pub fn emit_pair(&mut self, pair: Pair<K, V>) {
        self.output.push(pair);
    }

    pub fn increment_counter(&mut self, group: &str, name: &str, amount: u64) {
        self.counters.increment(group, name, amount);
    }

    /// Number of pairs emitted so far.
    pub fn emitted(&self) -> usize {
        self.output.len()
    }

    pub fn finish(self) -> (Vec<Pair<K, V>>, Counters) {
        (self.output, self.counters)
    }
}

impl<K, V> Default for Context<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
