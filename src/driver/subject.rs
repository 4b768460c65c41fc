//! The code a driver puts under test.

use crate::core::{Counters, Group, Pair};
use crate::error::{ConfigurationError, Result};
use crate::stage::{map_phase, reduce_phase, MapFn, Phase, Pipeline, ReduceFn, Stage};

/// Something a `Driver` can feed inputs to and collect outputs from.
pub trait TestSubject {
    type Input: Clone;
    type OutKey;
    type OutValue;

    /// Short name used in log events.
    fn name(&self) -> &'static str;

    /// Check wiring before any input is touched.
    fn validate(&self) -> std::result::Result<(), ConfigurationError>;

    fn execute(
        &mut self,
        inputs: Vec<Self::Input>,
        counters: &mut Counters,
    ) -> Result<Vec<Pair<Self::OutKey, Self::OutValue>>>;

    /// Whether `run` may proceed with zero inputs.
    fn runs_without_input(&self) -> bool {
        false
    }
}

/// Builds a driver input record from its two parts.
pub trait InputRecord<A, B> {
    fn from_parts(first: A, second: B) -> Self;
}

impl<K, V> InputRecord<K, V> for Pair<K, V> {
    fn from_parts(key: K, value: V) -> Self {
        Pair::new(key, value)
    }
}

impl<K, V> InputRecord<K, Vec<V>> for Group<K, V> {
    fn from_parts(key: K, values: Vec<V>) -> Self {
        Group::new(key, values)
    }
}

/// A mapper tested on its own.
pub struct MapUnit<K1, V1, K2, V2> {
    pub(crate) mapper: Option<MapFn<K1, V1, K2, V2>>,
}

impl<K1, V1, K2, V2> Default for MapUnit<K1, V1, K2, V2> {
    fn default() -> Self {
        Self { mapper: None }
    }
}

impl<K1: Clone, V1: Clone, K2, V2> TestSubject for MapUnit<K1, V1, K2, V2> {
    type Input = Pair<K1, V1>;
    type OutKey = K2;
    type OutValue = V2;

    fn name(&self) -> &'static str {
        "map driver"
    }

    fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        match self.mapper {
            Some(_) => Ok(()),
            None => Err(ConfigurationError::NoMapper { position: None }),
        }
    }

    fn execute(&mut self, inputs: Vec<Pair<K1, V1>>, counters: &mut Counters) -> Result<Vec<Pair<K2, V2>>> {
        let mapper = self
            .mapper
            .as_mut()
            .ok_or(ConfigurationError::NoMapper { position: None })?;
        Ok(map_phase(mapper, inputs, counters, 1)?)
    }
}

/// A reducer tested on its own, fed pre-grouped input.
pub struct ReduceUnit<K1, V1, K2, V2> {
    pub(crate) reducer: Option<ReduceFn<K1, V1, K2, V2>>,
}

impl<K1, V1, K2, V2> Default for ReduceUnit<K1, V1, K2, V2> {
    fn default() -> Self {
        Self { reducer: None }
    }
}

impl<K1: Clone, V1: Clone, K2, V2> TestSubject for ReduceUnit<K1, V1, K2, V2> {
    type Input = Group<K1, V1>;
    type OutKey = K2;
    type OutValue = V2;

    fn name(&self) -> &'static str {
        "reduce driver"
    }

    fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        match self.reducer {
            Some(_) => Ok(()),
            None => Err(ConfigurationError::NoReducer { position: None }),
        }
    }

    fn execute(&mut self, inputs: Vec<Group<K1, V1>>, counters: &mut Counters) -> Result<Vec<Pair<K2, V2>>> {
        let reducer = self
            .reducer
            .as_mut()
            .ok_or(ConfigurationError::NoReducer { position: None })?;
        Ok(reduce_phase(reducer, inputs, counters, 1, Phase::Reduce)?)
    }
}

impl<K1, V1, K2, V2, K3, V3> TestSubject for Stage<K1, V1, K2, V2, K3, V3>
where
    K1: Clone,
    V1: Clone,
{
    type Input = Pair<K1, V1>;
    type OutKey = K3;
    type OutValue = V3;

    fn name(&self) -> &'static str {
        "map-reduce driver"
    }

    fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        Stage::validate(self, None)
    }

    fn execute(&mut self, inputs: Vec<Pair<K1, V1>>, counters: &mut Counters) -> Result<Vec<Pair<K3, V3>>> {
        self.run(inputs, counters, None)
    }
}

impl<K: Clone, V: Clone> TestSubject for Pipeline<K, V> {
    type Input = Pair<K, V>;
    type OutKey = K;
    type OutValue = V;

    fn name(&self) -> &'static str {
        "pipeline driver"
    }

    fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        Pipeline::validate(self)
    }

    fn execute(&mut self, inputs: Vec<Pair<K, V>>, counters: &mut Counters) -> Result<Vec<Pair<K, V>>> {
        self.run(inputs, counters)
    }

    fn runs_without_input(&self) -> bool {
        true
    }
}
