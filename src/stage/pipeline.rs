//! Chains of stages sharing one key/value type.

use crate::core::{Counters, Pair};
use crate::error::{ConfigurationError, Result};
use crate::stage::position::StagePosition;
use crate::stage::runner::Stage;
use tracing::debug;

/// A stage whose input, intermediate and output types all match, so it
/// can sit anywhere in a pipeline.
pub type PipelineStage<K, V> = Stage<K, V, K, V, K, V>;

/// An ordered list of stages; each stage's output feeds the next.
pub struct Pipeline<K, V> {
    stages: Vec<PipelineStage<K, V>>,
}

impl<K, V> Pipeline<K, V> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn with_stage(mut self, stage: PipelineStage<K, V>) -> Self {
        self.add_stage(stage);
        self
    }

    pub fn add_stage(&mut self, stage: PipelineStage<K, V>) {
        self.stages.push(stage);
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Check every stage is wired, reporting the first gap with its
    /// position.
    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        let total = self.stages.len();
        self.stages
            .iter()
            .enumerate()
            .try_for_each(|(i, stage)| stage.validate(Some(StagePosition::new(i + 1, total))))
    }

    /// Run every stage in order.
    ///
    /// All stages are validated before any of them runs. An empty
    /// pipeline returns its inputs untouched.
    pub fn run(&mut self, inputs: Vec<Pair<K, V>>, counters: &mut Counters) -> Result<Vec<Pair<K, V>>> {
        if self.stages.is_empty() {
            debug!(records = inputs.len(), "empty pipeline, passing input through");
            return Ok(inputs);
        }

        self.validate()?;

        let total = self.stages.len();
        let mut records = inputs;
        for (i, stage) in self.stages.iter_mut().enumerate() {
            let position = StagePosition::new(i + 1, total);
            debug!(%position, records = records.len(), "running pipeline stage");
            records = stage.run(records, counters, Some(position))?;
        }

        Ok(records)
    }
}

impl<K, V> Default for Pipeline<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
