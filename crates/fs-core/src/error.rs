use thiserror::Error;

pub type FsResult<T> = Result<T, FsError>;

/// Errors shared by every crate of the workspace; crate-specific errors
/// convert into this type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FsError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },
}
