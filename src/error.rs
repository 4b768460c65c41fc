//! Error taxonomy for harness runs.
//!
//! Three kinds of failure end a run: bad wiring caught before any data
//! flows, an error raised by user map/combine/reduce code, and the
//! aggregated verification report. None of them is retried.

use crate::stage::{Phase, StagePosition};
use crate::verify::Discrepancy;
use std::path::PathBuf;
use thiserror::Error;

/// Wiring problems detected before a run starts.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("No input was provided")]
    NoInput,

    #[error("No Mapper class was provided{}", stage_suffix(.position))]
    NoMapper { position: Option<StagePosition> },

    #[error("No Reducer class was provided{}", stage_suffix(.position))]
    NoReducer { position: Option<StagePosition> },

    #[error("Invalid driver configuration: {source}")]
    InvalidConfig {
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read driver configuration from {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn stage_suffix(position: &Option<StagePosition>) -> String {
    position
        .map(|p| format!(" for {p}"))
        .unwrap_or_default()
}

/// An error raised by user-supplied stage code.
#[derive(Debug, Error)]
#[error("{phase} function failed in stage {stage}: {source}")]
pub struct StageExecutionError {
    /// 1-based stage index
    pub stage: usize,
    pub phase: Phase,
    #[source]
    pub source: anyhow::Error,
}

/// Every discrepancy found by one verification pass.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render_report(.discrepancies))]
pub struct VerificationFailure {
    pub discrepancies: Vec<Discrepancy>,
}

fn render_report(discrepancies: &[Discrepancy]) -> String {
    let joined = discrepancies
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} Error(s): ({})", discrepancies.len(), joined)
}

/// Any failure that ends a harness run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    StageExecution(#[from] StageExecutionError),

    #[error(transparent)]
    Verification(#[from] VerificationFailure),
}

impl HarnessError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_verification(&self) -> bool {
        matches!(self, Self::Verification(_))
    }

    /// The discrepancies behind a verification failure, if that is what this is.
    pub fn discrepancies(&self) -> Option<&[Discrepancy]> {
        match self {
            Self::Verification(failure) => Some(&failure.discrepancies),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
