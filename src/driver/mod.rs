//! Fluent test drivers.
//!
//! A driver holds the code under test, its inputs and the outputs and
//! counters it is expected to produce. `run` executes the code and
//! returns what it emitted; `run_test` also verifies the result and
//! fails with every discrepancy at once.
//!
//! # Example
//!
//! ```rust
//! use mrtest::driver::MapReduceDriver;
//! use mrtest::stage::library::{identity_mapper, sum_reducer};
//!
//! let mut driver = MapReduceDriver::new()
//!     .with_mapper(identity_mapper())
//!     .with_reducer(sum_reducer())
//!     .with_input("foo", 42)
//!     .with_input("bar", 12)
//!     .with_input("foo", 10)
//!     .with_output("bar", 12)
//!     .with_output("foo", 52);
//!
//! let err = driver.run_test().unwrap_err();
//! assert!(err.is_verification());
//!
//! // Order-insensitive comparison accepts the same records.
//! driver.run_test_ordered(false).unwrap();
//! ```

mod fixture;
pub mod macros;
mod map;
mod map_reduce;
mod pipeline;
mod reduce;
mod subject;

pub use fixture::Driver;
pub use map::MapDriver;
pub use map_reduce::MapReduceDriver;
pub use pipeline::PipelineDriver;
pub use reduce::ReduceDriver;
pub use subject::{InputRecord, MapUnit, ReduceUnit, TestSubject};
