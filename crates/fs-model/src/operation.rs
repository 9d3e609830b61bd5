//! Unit-level operations delegated to the process-modeling backend.

use crate::error::ModelError;

pub type UnitOpResult = Result<(), ModelError>;

/// Behavior behind a unit's `initialize`/`solve`.
///
/// Implementations wrap whatever the backend does for a single unit: a
/// cold-start estimate of the outlet streams, or a full solve of the unit with
/// its outlets. Both calls are opaque and may fail; callers decide whether a
/// failure is fatal.
pub trait UnitOperation: Send {
    /// Produce a cold-start estimate of the unit's state.
    fn initialize(&mut self) -> UnitOpResult {
        Ok(())
    }

    /// Solve the unit together with its outlet streams.
    fn solve(&mut self) -> UnitOpResult {
        Ok(())
    }
}

/// Behavior that accepts every request without touching any state.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveUnit;

impl UnitOperation for PassiveUnit {}
