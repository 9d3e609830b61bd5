//! Evaluation sequencing and initialization for flowsheets.
//!
//! This crate orders the units of a flowsheet so that every unit is computed
//! after its inputs (breaking recycle loops with a greedy heuristic) and drives
//! bounded, failure-tolerant initialization passes over that order. The
//! numerical work of each unit stays behind the `UnitOperation` trait.

pub mod error;
pub mod initialization;
pub mod sequence;

pub use error::{SolverError, SolverResult};
pub use initialization::{
    InitMode, InitOptions, InitProgressEvent, InitReport, PassReport, UnitOutcome, UnitStatus,
    run_initialization, run_initialization_with_progress,
};
pub use sequence::{KnownFraction, Sequencing, known_fraction, sequence_flowsheet};
