//! Testing a chain of stages.

use crate::driver::fixture::Driver;
use crate::stage::{Context, Pipeline, PipelineStage, Stage, Values};
use std::hash::Hash;

/// Runs records through every stage in order and verifies the last
/// stage's output.
///
/// With no stages, `run` returns the inputs unchanged.
pub type PipelineDriver<K, V> = Driver<Pipeline<K, V>>;

impl<K, V> Driver<Pipeline<K, V>>
where
    K: Clone,
    V: Clone,
{
    pub fn with_stage(mut self, stage: PipelineStage<K, V>) -> Self {
        self.add_stage(stage);
        self
    }

    pub fn add_stage(&mut self, stage: PipelineStage<K, V>) {
        self.subject_mut().add_stage(stage);
    }

    /// Append a stage built from a mapper and a reducer.
    pub fn with_map_reduce<M, R>(self, mapper: M, reducer: R) -> Self
    where
        M: FnMut(K, V, &mut Context<K, V>) -> anyhow::Result<()> + 'static,
        R: FnMut(K, Values<V>, &mut Context<K, V>) -> anyhow::Result<()> + 'static,
        K: Eq + Hash,
    {
        self.with_stage(Stage::new().with_mapper(mapper).with_reducer(reducer))
    }

    pub fn stage_count(&self) -> usize {
        self.subject().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::library::{identity_mapper, identity_reducer};

    #[test]
    fn empty_pipeline_without_input_runs_empty() {
        let mut driver: PipelineDriver<String, String> = PipelineDriver::new();

        assert!(driver.run().unwrap().is_empty());
    }

    #[test]
    fn empty_pipeline_run_test_still_needs_input() {
        let mut driver: PipelineDriver<String, String> = PipelineDriver::new();

        let err = driver.run_test().unwrap_err();
        assert_eq!(err.to_string(), "No input was provided");
    }

    #[test]
    fn counts_stages() {
        let driver: PipelineDriver<&str, &str> = PipelineDriver::new()
            .with_map_reduce(identity_mapper(), identity_reducer())
            .with_map_reduce(identity_mapper(), identity_reducer());

        assert_eq!(driver.stage_count(), 2);
    }
}
