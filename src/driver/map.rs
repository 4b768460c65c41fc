//! Testing a mapper on its own.

use crate::driver::fixture::Driver;
use crate::driver::subject::MapUnit;
use crate::stage::Context;

/// Feeds inputs straight to a mapper and verifies what it emits.
///
/// # Example
///
/// ```rust
/// use mrtest::driver::MapDriver;
/// use mrtest::stage::library::identity_mapper;
///
/// let mut driver = MapDriver::new()
///     .with_mapper(identity_mapper())
///     .with_input("foo", "bar")
///     .with_output("foo", "bar");
///
/// driver.run_test().unwrap();
/// ```
pub type MapDriver<K1, V1, K2, V2> = Driver<MapUnit<K1, V1, K2, V2>>;

impl<K1, V1, K2, V2> Driver<MapUnit<K1, V1, K2, V2>>
where
    K1: Clone,
    V1: Clone,
{
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
        self.subject_mut().mapper = Some(Box::new(mapper));
    }
}
