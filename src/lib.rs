//! mrtest: an in-memory test harness for map/reduce code
//!
//! mrtest runs map, combine and reduce functions over a handful of
//! records without any cluster, then checks the output against what the
//! test expected. It follows Stillwater's "pure core, imperative shell"
//! split: grouping, ordering and verification are pure functions, while
//! calls into user code live in a thin shell around them.
//!
//! # Core Concepts
//!
//! - **Shuffle**: groups intermediate records by key, optionally with a
//!   grouping comparator and a value order
//! - **Stage**: map → shuffle → (combine → shuffle) → reduce
//! - **Pipeline**: stages chained output-to-input
//! - **Verifier**: accumulates every discrepancy through `Validation`
//! - **Drivers**: fluent fixtures wrapping all of the above
//!
//! # Example
//!
//! ```rust
//! use mrtest::driver::MapReduceDriver;
//! use mrtest::stage::{Context, Values};
//!
//! let mut driver = MapReduceDriver::new()
//!     .with_mapper(|_: (), line: &str, ctx: &mut Context<String, u64>| {
//!         for word in line.split_whitespace() {
//!             ctx.emit(word.to_string(), 1);
//!         }
//!         Ok(())
//!     })
//!     .with_reducer(|word: String, counts: Values<u64>, ctx: &mut Context<String, u64>| {
//!         ctx.emit(word, counts.sum());
//!         Ok(())
//!     })
//!     .with_input((), "the cat the hat")
//!     .with_output("the".to_string(), 2)
//!     .with_output("cat".to_string(), 1)
//!     .with_output("hat".to_string(), 1);
//!
//! driver.run_test().unwrap();
//! ```

pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod stage;
pub mod verify;

// Re-export commonly used types
pub use config::DriverConfig;
pub use core::{Comparator, Counters, Group, Pair, Shuffle};
pub use driver::{Driver, MapDriver, MapReduceDriver, PipelineDriver, ReduceDriver};
pub use error::{HarnessError, Result};
pub use stage::{Context, Pipeline, Stage, Values};
