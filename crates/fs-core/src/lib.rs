//! fs-core: stable foundation for flowseq.
//!
//! Contains:
//! - ids (compact IDs for units and streams of a flowsheet)
//! - numeric (Real + finiteness helpers used by layout options)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FsError, FsResult};
pub use ids::*;
pub use numeric::*;
