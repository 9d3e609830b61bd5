//! Error types for flowsheet construction and unit operations.

use fs_core::error::FsError;
use thiserror::Error;

/// Errors raised while building a flowsheet or by a unit's operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Unit '{name}' already exists in the flowsheet")]
    DuplicateUnit { name: String },

    #[error("Stream '{name}' already exists in the flowsheet")]
    DuplicateStream { name: String },

    #[error("Unit '{name}' not found")]
    UnknownUnit { name: String },

    #[error("Stream '{name}' not found")]
    UnknownStream { name: String },

    #[error("Port '{port}' not found on unit '{unit}'")]
    UnknownPort { unit: String, port: String },

    #[error("Stream '{stream}' already connected to port '{port}'")]
    AlreadyConnected { stream: String, port: String },

    #[error("No more streams allowed for port '{port}' of unit '{unit}' (multiplicity {multiplicity})")]
    PortFull {
        unit: String,
        port: String,
        multiplicity: usize,
    },

    #[error("Stream '{stream}' already has a {endpoint} unit")]
    EndpointTaken {
        stream: String,
        endpoint: &'static str,
    },

    #[error("Unit '{unit}' is not a column section")]
    NotAColumn { unit: String },

    #[error("Stage {stage} is outside column '{unit}' (stages: {stages:?})")]
    StageOutOfRange {
        unit: String,
        stage: usize,
        stages: Option<usize>,
    },

    #[error("Too many {what} for a single flowsheet")]
    Capacity { what: &'static str },

    #[error("Unit operation failed: {what}")]
    UnitOperationFailed { what: String },
}

pub type ModelResult<T> = Result<T, ModelError>;

impl ModelError {
    /// Convenience constructor for behaviors reporting a failed
    /// `initialize`/`solve`.
    pub fn operation_failed(what: impl Into<String>) -> Self {
        ModelError::UnitOperationFailed { what: what.into() }
    }
}

impl From<ModelError> for FsError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Capacity { what } => FsError::IndexOob {
                what,
                index: u32::MAX as usize,
                len: u32::MAX as usize,
            },
            other => FsError::InvalidArg {
                what: other.to_string(),
            },
        }
    }
}
