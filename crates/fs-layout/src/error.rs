//! Error types for automatic layout.

use fs_core::error::FsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid layout options: {what}")]
    InvalidOptions { what: String },
}

pub type LayoutResult<T> = Result<T, LayoutError>;

impl From<FsError> for LayoutError {
    fn from(e: FsError) -> Self {
        LayoutError::InvalidOptions {
            what: e.to_string(),
        }
    }
}

impl From<LayoutError> for FsError {
    fn from(e: LayoutError) -> Self {
        FsError::InvalidArg {
            what: e.to_string(),
        }
    }
}
