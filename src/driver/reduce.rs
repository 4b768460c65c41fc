//! Testing a reducer on its own.

use crate::driver::fixture::Driver;
use crate::driver::subject::ReduceUnit;
use crate::stage::{Context, Values};

/// Feeds pre-grouped `(key, values)` inputs to a reducer.
///
/// No shuffle runs, so each input reaches the reducer exactly as added.
pub type ReduceDriver<K1, V1, K2, V2> = Driver<ReduceUnit<K1, V1, K2, V2>>;

impl<K1, V1, K2, V2> Driver<ReduceUnit<K1, V1, K2, V2>>
where
    K1: Clone,
    V1: Clone,
{
    pub fn with_reducer<F>(mut self, reducer: F) -> Self
    where
        F: FnMut(K1, Values<V1>, &mut Context<K2, V2>) -> anyhow::Result<()> + 'static,
    {
        self.set_reducer(reducer);
        self
    }

    pub fn set_reducer<F>(&mut self, reducer: F)
    where
        F: FnMut(K1, Values<V1>, &mut Context<K2, V2>) -> anyhow::Result<()> + 'static,
    {
        self.subject_mut().reducer = Some(Box::new(reducer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::library::sum_reducer;

    #[test]
    fn sums_each_group() {
        let mut driver = ReduceDriver::new()
            .with_reducer(sum_reducer())
            .with_input("foo", vec![42, 10])
            .with_input("bar", vec![12])
            .with_output("foo", 52)
            .with_output("bar", 12);

        driver.run_test().unwrap();
    }

    #[test]
    fn same_key_twice_is_reduced_twice() {
        let mut driver = ReduceDriver::new()
            .with_reducer(sum_reducer())
            .with_input("foo", vec![1])
            .with_input("foo", vec![2]);

        let output = driver.run().unwrap();
        assert_eq!(output.len(), 2);
    }

    #[test]
    fn missing_reducer_is_reported() {
        let mut driver: ReduceDriver<&str, i64, &str, i64> =
            ReduceDriver::new().with_input("foo", vec![1]);

        let err = driver.run_test().unwrap_err();
        assert_eq!(err.to_string(), "No Reducer class was provided");
    }
}
