//! First-class invariants for the puzzle state machine.
//!
//! Invariants are logical properties that must hold throughout a puzzle's
//! run. They are checked in debug builds after every mutating operation and
//! are testable independently as documentation of engine guarantees.

use crate::machine::PuzzleMachine;
use crate::state::PuzzleState;

/// A logical property of a puzzle machine that must never be violated.
pub trait Invariant {
    /// Checks whether the invariant holds for the given machine.
    fn holds(&self, machine: &PuzzleMachine) -> bool;

    /// Human-readable description of the invariant.
    fn description(&self) -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    description: String,
}

impl InvariantViolation {
    /// Creates a new violation record.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// Description of the violated invariant.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// The step index never exceeds the sequence length.
pub struct StepWithinSequence;

impl Invariant for StepWithinSequence {
    fn holds(&self, machine: &PuzzleMachine) -> bool {
        machine.step_index() <= machine.sequence_len()
    }

    fn description(&self) -> &'static str {
        "step index is bounded by the sequence length"
    }
}

/// A completed puzzle has matched its entire sequence.
///
/// Holds even through `force_complete` and restore, both of which normalize
/// the step index to the full length.
pub struct CompletedExhaustsSequence;

impl Invariant for CompletedExhaustsSequence {
    fn holds(&self, machine: &PuzzleMachine) -> bool {
        machine.current_state() != PuzzleState::Completed
            || machine.step_index() == machine.sequence_len()
    }

    fn description(&self) -> &'static str {
        "completed implies the sequence is exhausted"
    }
}

/// Below the attempt limit, the machine is never in `Failed`; conversely a
/// non-failed machine with a configured limit stays under it.
///
/// Guaranteed on the normal transition path only: a restored snapshot may
/// legitimately carry arbitrary attempt counts, so this is not part of the
/// structural set the machine debug-asserts.
pub struct AttemptLimitRespected;

impl Invariant for AttemptLimitRespected {
    fn holds(&self, machine: &PuzzleMachine) -> bool {
        let Some(def) = machine.definition() else {
            return true;
        };
        let max = def.max_attempts();
        if max == 0 || machine.current_state() == PuzzleState::Failed {
            return true;
        }
        machine.attempt_count() < max
    }

    fn description(&self) -> &'static str {
        "a non-failed puzzle stays under its attempt limit"
    }
}

/// Checks every invariant in the set against the machine.
///
/// Returns all violations rather than stopping at the first.
pub fn check_all(
    machine: &PuzzleMachine,
    set: &[&dyn Invariant],
) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<InvariantViolation> = set
        .iter()
        .filter(|invariant| !invariant.holds(machine))
        .map(|invariant| InvariantViolation::new(invariant.description()))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Checks the invariants every reachable machine state satisfies, including
/// states produced by `force_complete` and snapshot restore.
pub fn check_structural(machine: &PuzzleMachine) -> Result<(), Vec<InvariantViolation>> {
    check_all(machine, &[&StepWithinSequence, &CompletedExhaustsSequence])
}

/// Checks the full invariant set for machines driven only through normal
/// transitions.
pub fn check_standard(machine: &PuzzleMachine) -> Result<(), Vec<InvariantViolation>> {
    check_all(
        machine,
        &[
            &StepWithinSequence,
            &CompletedExhaustsSequence,
            &AttemptLimitRespected,
        ],
    )
}
