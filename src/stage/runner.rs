//! A single map → shuffle → combine → reduce stage.

use crate::core::{Comparator, Counters, Group, Pair, Shuffle};
use crate::error::{ConfigurationError, Result, StageExecutionError};
use crate::stage::context::{Context, MapFn, ReduceFn, Values};
use crate::stage::position::{Phase, StagePosition};
use std::hash::Hash;
use tracing::{debug, error};

/// One map/combine/reduce unit.
///
/// The mapper and reducer are optional while the stage is being wired
/// up; `run` refuses to start unless both are present.
///
/// # Example
///
/// ```rust
/// use mrtest::core::{Counters, Pair};
/// use mrtest::stage::{Context, Stage, Values};
///
/// let mut stage = Stage::new()
///     .with_mapper(|key: String, value: i64, ctx: &mut Context<String, i64>| {
///         ctx.emit(key, value);
///         Ok(())
///     })
///     .with_reducer(|key: String, values: Values<i64>, ctx: &mut Context<String, i64>| {
///         ctx.emit(key, values.sum());
///         Ok(())
///     });
///
/// let mut counters = Counters::new();
/// let output = stage
///     .run(
///         vec![
///             Pair::new("foo".to_string(), 42),
///             Pair::new("bar".to_string(), 12),
///             Pair::new("foo".to_string(), 10),
///         ],
///         &mut counters,
///         None,
///     )
///     .unwrap();
///
/// assert_eq!(
///     output,
///     vec![Pair::new("foo".to_string(), 52), Pair::new("bar".to_string(), 12)]
/// );
/// ```
pub struct Stage<K1, V1, K2, V2, K3, V3> {
    mapper: Option<MapFn<K1, V1, K2, V2>>,
    combiner: Option<ReduceFn<K2, V2, K2, V2>>,
    reducer: Option<ReduceFn<K2, V2, K3, V3>>,
    shuffle: Shuffle<K2, V2>,
}

impl<K1, V1, K2, V2, K3, V3> Stage<K1, V1, K2, V2, K3, V3>
where
    K2: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::from_shuffle(Shuffle::new())
    }
}

impl<K1, V1, K2, V2, K3, V3> Stage<K1, V1, K2, V2, K3, V3> {
    /// Start from a preconfigured shuffle. Keys grouped only by a
    /// comparator come in through here.
    pub fn from_shuffle(shuffle: Shuffle<K2, V2>) -> Self {
        Self {
            mapper: None,
            combiner: None,
            reducer: None,
            shuffle,
        }
    }

    pub fn with_mapper<F>(mut self, mapper: F) -> Self
    where
        F: FnMut(K1, V1, &mut Context<K2, V2>) -> anyhow::Result<()> + 'static,
    {
        self.set_mapper(mapper);
        self
    }

    pub fn set_mapper<F>(&mut self, mapper: F)
    where
        F: FnMut(K1, V1, &mut Context<K2, V2>) -> anyhow::Result<()> + 'static,
    {
        self.mapper = Some(Box::new(mapper));
    }

    /// Add a combine step, run per group before the final reduce.
    pub fn with_combiner<F>(mut self, combiner: F) -> Self
    where
        F: FnMut(K2, Values<V2>, &mut Context<K2, V2>) -> anyhow::Result<()> + 'static,
    {
        self.set_combiner(combiner);
        self
    }

    pub fn set_combiner<F>(&mut self, combiner: F)
    where
        F: FnMut(K2, Values<V2>, &mut Context<K2, V2>) -> anyhow::Result<()> + 'static,
    {
        self.combiner = Some(Box::new(combiner));
    }

    pub fn with_reducer<F>(mut self, reducer: F) -> Self
    where
        F: FnMut(K2, Values<V2>, &mut Context<K3, V3>) -> anyhow::Result<()> + 'static,
    {
        self.set_reducer(reducer);
        self
    }

    pub fn set_reducer<F>(&mut self, reducer: F)
    where
        F: FnMut(K2, Values<V2>, &mut Context<K3, V3>) -> anyhow::Result<()> + 'static,
    {
        self.reducer = Some(Box::new(reducer));
    }

    pub fn with_grouping(mut self, comparator: Comparator<K2>) -> Self {
        self.set_grouping(comparator);
        self
    }

    pub fn set_grouping(&mut self, comparator: Comparator<K2>) {
        self.shuffle.set_grouping(comparator);
    }

    /// Sort intermediate records by their full key before grouping.
    pub fn with_key_order(mut self, comparator: Comparator<K2>) -> Self {
        self.set_key_order(comparator);
        self
    }

    pub fn set_key_order(&mut self, comparator: Comparator<K2>) {
        self.shuffle.set_key_order(comparator);
    }

    pub fn with_value_order(mut self, comparator: Comparator<V2>) -> Self {
        self.set_value_order(comparator);
        self
    }

    pub fn set_value_order(&mut self, comparator: Comparator<V2>) {
        self.shuffle.set_value_order(comparator);
    }

    pub fn has_mapper(&self) -> bool {
        self.mapper.is_some()
    }

    pub fn has_combiner(&self) -> bool {
        self.combiner.is_some()
    }

    pub fn has_reducer(&self) -> bool {
        self.reducer.is_some()
    }

    pub fn shuffle(&self) -> &Shuffle<K2, V2> {
        &self.shuffle
    }

    /// Check the stage is fully wired.
    ///
    /// `position` is only given inside a pipeline and adds stage context
    /// to the error message.
    pub fn validate(&self, position: Option<StagePosition>) -> std::result::Result<(), ConfigurationError> {
        if self.mapper.is_none() {
            return Err(ConfigurationError::NoMapper { position });
        }
        if self.reducer.is_none() {
            return Err(ConfigurationError::NoReducer { position });
        }
        Ok(())
    }
}

impl<K1, V1, K2, V2, K3, V3> Stage<K1, V1, K2, V2, K3, V3> {
    /// Run the stage over `inputs`.
    ///
    /// Map runs over every input in order, the mapped output is
    /// shuffled, the combiner (if any) runs per group and its output is
    /// shuffled again, then the reducer runs per group. Output follows
    /// group order.
    pub fn run(
        &mut self,
        inputs: Vec<Pair<K1, V1>>,
        counters: &mut Counters,
        position: Option<StagePosition>,
    ) -> Result<Vec<Pair<K3, V3>>> {
        let mapper = self
            .mapper
            .as_mut()
            .ok_or(ConfigurationError::NoMapper { position })?;
        let reducer = self
            .reducer
            .as_mut()
            .ok_or(ConfigurationError::NoReducer { position })?;
        let stage = position.map_or(1, |p| p.index);

        let mapped = map_phase(mapper, inputs, counters, stage)?;
        let mut groups = self.shuffle.run(mapped);

        if let Some(combiner) = self.combiner.as_mut() {
            let combined = reduce_phase(combiner, groups, counters, stage, Phase::Combine)?;
            groups = self.shuffle.run(combined);
        }

        let output = reduce_phase(reducer, groups, counters, stage, Phase::Reduce)?;
        debug!(stage, outputs = output.len(), "stage complete");
        Ok(output)
    }
}

impl<K1, V1, K2, V2, K3, V3> Default for Stage<K1, V1, K2, V2, K3, V3>
where
    K2: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Apply `mapper` to every input record in order.
pub fn map_phase<K1, V1, K2, V2>(
    mapper: &mut MapFn<K1, V1, K2, V2>,
    inputs: Vec<Pair<K1, V1>>,
    counters: &mut Counters,
    stage: usize,
) -> std::result::Result<Vec<Pair<K2, V2>>, StageExecutionError> {
    debug!(stage, inputs = inputs.len(), "map phase");
    let mut ctx = Context::new();

    for Pair { key, value } in inputs {
        if let Err(source) = mapper(key, value, &mut ctx) {
            error!(stage, error = %source, "map function failed");
            return Err(StageExecutionError {
                stage,
                phase: Phase::Map,
                source,
            });
        }
    }

    let (output, emitted_counters) = ctx.finish();
    counters.merge(emitted_counters);
    Ok(output)
}

/// Apply `reducer` to every group in order.
pub fn reduce_phase<K1, V1, K2, V2>(
    reducer: &mut ReduceFn<K1, V1, K2, V2>,
    groups: Vec<Group<K1, V1>>,
    counters: &mut Counters,
    stage: usize,
    phase: Phase,
) -> std::result::Result<Vec<Pair<K2, V2>>, StageExecutionError> {
    debug!(stage, %phase, groups = groups.len(), "reduce phase");
    let mut ctx = Context::new();

    for Group { key, values } in groups {
        if let Err(source) = reducer(key, values.into_iter(), &mut ctx) {
            error!(stage, %phase, error = %source, "reduce function failed");
            return Err(StageExecutionError {
                stage,
                phase,
                source,
            });
        }
    }

    let (output, emitted_counters) = ctx.finish();
    counters.merge(emitted_counters);
    Ok(output)
}
