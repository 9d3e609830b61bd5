//! Error types for sequencing and initialization runs.

use fs_core::error::FsError;
use thiserror::Error;

/// Caller mistakes detected before a run starts.
///
/// Failures of individual units during a run are never reported through this
/// type; they are recorded in the run's report instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Iteration bound must be positive (got {max_iterations})")]
    InvalidIterations { max_iterations: usize },

    #[error("Sequence does not match the flowsheet: {what}")]
    SequenceMismatch { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<SolverError> for FsError {
    fn from(e: SolverError) -> Self {
        FsError::InvalidArg {
            what: e.to_string(),
        }
    }
}
