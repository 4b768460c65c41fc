//! The fixture shared by every driver.

use crate::config::DriverConfig;
use crate::core::{CounterKey, Counters, Pair};
use crate::driver::subject::{InputRecord, TestSubject};
use crate::error::{ConfigurationError, Result};
use crate::verify::{OrderMode, Verifier};
use std::fmt::Display;
use tracing::debug;

/// Inputs, expectations and configuration wrapped around a test subject.
///
/// `MapDriver`, `ReduceDriver`, `MapReduceDriver` and `PipelineDriver`
/// are all `Driver` over a different subject, so they share the adders
/// and run methods defined here.
pub struct Driver<S: TestSubject> {
    subject: S,
    inputs: Vec<S::Input>,
    verifier: Verifier<S::OutKey, S::OutValue>,
    config: DriverConfig,
    counters: Counters,
}

impl<S: TestSubject + Default> Driver<S> {
    pub fn new() -> Self {
        Self::from_subject(S::default())
    }
}

impl<S: TestSubject + Default> Default for Driver<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TestSubject> Driver<S> {
    pub fn from_subject(subject: S) -> Self {
        let config = DriverConfig::default();
        Self {
            subject,
            inputs: Vec::new(),
            verifier: Verifier::new(config.order_mode()),
            config,
            counters: Counters::new(),
        }
    }

    /// Add one input built from its parts: `(key, value)` for pair
    /// inputs, `(key, values)` for a reduce driver.
    pub fn with_input<A, B>(mut self, first: A, second: B) -> Self
    where
        S::Input: InputRecord<A, B>,
    {
        self.add_input(first, second);
        self
    }

    pub fn add_input<A, B>(&mut self, first: A, second: B)
    where
        S::Input: InputRecord<A, B>,
    {
        self.inputs
            .push(<S::Input as InputRecord<A, B>>::from_parts(first, second));
    }

    /// Add an input by copying borrowed parts. Later changes to the
    /// originals do not reach the fixture.
    pub fn add_input_ref<A, B>(&mut self, first: &A, second: &B)
    where
        A: Clone,
        B: Clone,
        S::Input: InputRecord<A, B>,
    {
        self.add_input(first.clone(), second.clone());
    }

    pub fn with_input_record(mut self, record: S::Input) -> Self {
        self.inputs.push(record);
        self
    }

    pub fn with_inputs(mut self, records: impl IntoIterator<Item = S::Input>) -> Self {
        self.inputs.extend(records);
        self
    }

    pub fn with_output(mut self, key: S::OutKey, value: S::OutValue) -> Self {
        self.add_output(key, value);
        self
    }

    pub fn add_output(&mut self, key: S::OutKey, value: S::OutValue) {
        self.verifier.add_output(Pair::new(key, value));
    }

    pub fn with_outputs(
        mut self,
        records: impl IntoIterator<Item = Pair<S::OutKey, S::OutValue>>,
    ) -> Self {
        for record in records {
            self.verifier.add_output(record);
        }
        self
    }

    /// Expect a counter to hold `value` after the run.
    pub fn with_counter(mut self, group: &str, name: &str, value: u64) -> Self {
        self.add_counter(group, name, value);
        self
    }

    pub fn add_counter(&mut self, group: &str, name: &str, value: u64) {
        self.verifier.add_counter(CounterKey::new(group, name), value);
    }

    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn inputs(&self) -> &[S::Input] {
        &self.inputs
    }

    pub fn expected_outputs(&self) -> &[Pair<S::OutKey, S::OutValue>] {
        self.verifier.expected_outputs()
    }

    /// Counters recorded by the most recent run.
    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn subject(&self) -> &S {
        &self.subject
    }

    pub(crate) fn subject_mut(&mut self) -> &mut S {
        &mut self.subject
    }

    /// Run the subject over copies of the inputs and return its output.
    ///
    /// Counters start from zero on every call.
    pub fn run(&mut self) -> Result<Vec<Pair<S::OutKey, S::OutValue>>> {
        if self.inputs.is_empty() && !self.subject.runs_without_input() {
            return Err(ConfigurationError::NoInput.into());
        }
        self.subject.validate()?;

        self.counters = Counters::new();
        debug!(
            driver = self.config.label_or(self.subject.name()),
            inputs = self.inputs.len(),
            "running driver"
        );
        self.subject.execute(self.inputs.clone(), &mut self.counters)
    }
}

impl<S: TestSubject> Driver<S>
where
    S::OutKey: PartialEq + Display,
    S::OutValue: PartialEq + Display,
{
    /// Run and verify using the configured order sensitivity.
    pub fn run_test(&mut self) -> Result<()> {
        self.run_test_ordered(self.config.order_sensitive)
    }

    /// Run and verify, comparing positionally when `order_sensitive`.
    pub fn run_test_ordered(&mut self, order_sensitive: bool) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(ConfigurationError::NoInput.into());
        }
        let outputs = self.run()?;

        self.verifier.set_mode(OrderMode::from_sensitivity(order_sensitive));
        self.verifier.verify(&outputs, &self.counters)?;
        debug!(
            driver = self.config.label_or(self.subject.name()),
            outputs = outputs.len(),
            "driver test passed"
        );
        Ok(())
    }
}
