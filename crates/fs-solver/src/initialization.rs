//! Sequence-driven initialization of a flowsheet.
//!
//! The driver replays an evaluation sequence for a fixed number of passes and
//! asks every unit for a cold-start estimate (or a full per-unit solve). A unit
//! that fails is recorded and skipped; the run itself only fails when the
//! caller's inputs are inconsistent.

use std::collections::HashSet;

use fs_core::UnitId;
use fs_model::Flowsheet;
use tracing::{debug, info, warn};

use crate::error::{SolverError, SolverResult};

/// What the driver asks of each unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitMode {
    /// Cold-start estimate via `initialize`.
    #[default]
    Initialize,
    /// Full per-unit solve via `solve`.
    Solve,
}

impl InitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitMode::Initialize => "Initialize",
            InitMode::Solve => "Solve",
        }
    }
}

/// Options for an initialization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitOptions {
    /// Number of passes over the sequence; always run in full.
    pub max_iterations: usize,
    pub mode: InitMode,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            mode: InitMode::Initialize,
        }
    }
}

impl InitOptions {
    pub fn new(max_iterations: usize, solve_mode: bool) -> Self {
        Self {
            max_iterations,
            mode: if solve_mode {
                InitMode::Solve
            } else {
                InitMode::Initialize
            },
        }
    }
}

/// Outcome of one unit operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitStatus {
    Ok,
    Failed { reason: String },
}

impl UnitStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, UnitStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitOutcome {
    pub unit: String,
    pub status: UnitStatus,
}

/// Everything that happened during one pass over the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassReport {
    /// 0-based pass index.
    pub index: usize,
    /// One outcome per unit, in sequence order.
    pub outcomes: Vec<UnitOutcome>,
    pub failures: usize,
}

impl PassReport {
    pub fn failed_units(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.status.is_failed())
            .map(|o| o.unit.as_str())
    }

    pub fn outcome(&self, unit: &str) -> Option<&UnitStatus> {
        self.outcomes
            .iter()
            .find(|o| o.unit == unit)
            .map(|o| &o.status)
    }
}

/// Structured record of an initialization run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitReport {
    pub mode: InitMode,
    pub passes: Vec<PassReport>,
}

impl InitReport {
    pub fn total_failures(&self) -> usize {
        self.passes.iter().map(|p| p.failures).sum()
    }

    pub fn all_succeeded(&self) -> bool {
        self.total_failures() == 0
    }

    pub fn last_pass(&self) -> Option<&PassReport> {
        self.passes.last()
    }
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, Copy)]
pub enum InitProgressEvent<'a> {
    PassStarted {
        index: usize,
        of: usize,
    },
    UnitFinished {
        pass: usize,
        unit: &'a str,
        status: &'a UnitStatus,
    },
    PassCompleted {
        index: usize,
        failures: usize,
    },
}

/// Run `options.max_iterations` passes of unit initialization over `sequence`.
pub fn run_initialization<S: AsRef<str>>(
    flowsheet: &mut Flowsheet,
    sequence: &[S],
    options: &InitOptions,
) -> SolverResult<InitReport> {
    run_initialization_with_progress(flowsheet, sequence, options, None)
}

/// Like [`run_initialization`], reporting progress through `progress_cb`.
pub fn run_initialization_with_progress<S: AsRef<str>>(
    flowsheet: &mut Flowsheet,
    sequence: &[S],
    options: &InitOptions,
    mut progress_cb: Option<&mut dyn FnMut(InitProgressEvent<'_>)>,
) -> SolverResult<InitReport> {
    if options.max_iterations == 0 {
        return Err(SolverError::InvalidIterations {
            max_iterations: options.max_iterations,
        });
    }
    let ids = resolve_sequence(flowsheet, sequence)?;

    info!(
        flowsheet = flowsheet.name(),
        passes = options.max_iterations,
        units = ids.len(),
        mode = options.mode.as_str(),
        "starting initialization"
    );

    let mut passes = Vec::with_capacity(options.max_iterations);
    for index in 0..options.max_iterations {
        if let Some(cb) = progress_cb.as_deref_mut() {
            cb(InitProgressEvent::PassStarted {
                index,
                of: options.max_iterations,
            });
        }
        debug!(pass = index, "initialization pass");

        let mut outcomes = Vec::with_capacity(ids.len());
        let mut failures = 0;
        for (&id, name) in ids.iter().zip(sequence) {
            let name = name.as_ref();
            let Some(unit) = flowsheet.unit_mut(id) else {
                continue;
            };
            let result = match options.mode {
                InitMode::Initialize => unit.initialize(),
                InitMode::Solve => unit.solve(),
            };
            let status = match result {
                Ok(()) => {
                    debug!(pass = index, unit = name, "unit initialized");
                    UnitStatus::Ok
                }
                Err(e) => {
                    warn!(pass = index, unit = name, error = %e, "unit not initialized");
                    failures += 1;
                    UnitStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            if let Some(cb) = progress_cb.as_deref_mut() {
                cb(InitProgressEvent::UnitFinished {
                    pass: index,
                    unit: name,
                    status: &status,
                });
            }
            outcomes.push(UnitOutcome {
                unit: name.to_string(),
                status,
            });
        }

        if let Some(cb) = progress_cb.as_deref_mut() {
            cb(InitProgressEvent::PassCompleted { index, failures });
        }
        info!(pass = index, failures, "initialization pass complete");
        passes.push(PassReport {
            index,
            outcomes,
            failures,
        });
    }

    Ok(InitReport {
        mode: options.mode,
        passes,
    })
}

/// Map sequence names to unit IDs, checking the sequence is a permutation of
/// the flowsheet's units.
fn resolve_sequence<S: AsRef<str>>(
    flowsheet: &Flowsheet,
    sequence: &[S],
) -> SolverResult<Vec<UnitId>> {
    let mut seen = HashSet::with_capacity(sequence.len());
    let mut ids = Vec::with_capacity(sequence.len());
    for name in sequence {
        let name = name.as_ref();
        let id = flowsheet
            .unit_id(name)
            .ok_or_else(|| SolverError::SequenceMismatch {
                what: format!("unknown unit '{name}'"),
            })?;
        if !seen.insert(id) {
            return Err(SolverError::SequenceMismatch {
                what: format!("unit '{name}' appears more than once"),
            });
        }
        ids.push(id);
    }

    if ids.len() != flowsheet.unit_count() {
        let missing: Vec<&str> = flowsheet
            .units()
            .iter()
            .filter(|u| !flowsheet.unit_id(u.name()).is_some_and(|id| seen.contains(&id)))
            .map(|u| u.name())
            .collect();
        return Err(SolverError::SequenceMismatch {
            what: format!("missing units: {}", missing.join(", ")),
        });
    }
    Ok(ids)
}
