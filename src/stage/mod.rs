//! Stage execution: the effectful shell around the pure shuffle.
//!
//! This module runs user-supplied map, combine and reduce functions:
//!
//! - **Context**: collects emitted pairs and counter increments
//! - **Stage**: one map → shuffle → combine → reduce unit
//! - **Pipeline**: stages chained output-to-input
//!
//! Execution is sequential and synchronous. Each phase runs to
//! completion before the next starts, and user errors are wrapped with
//! the stage index and phase, never retried.

mod context;
pub mod library;
mod pipeline;
mod position;
mod runner;

pub use context::{Context, MapFn, ReduceFn, Values};
pub use pipeline::{Pipeline, PipelineStage};
pub use position::{Phase, StagePosition};
pub use runner::{map_phase, reduce_phase, Stage};
