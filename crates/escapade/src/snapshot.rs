//! The minimal persisted record of a puzzle's progress.

use crate::state::PuzzleState;
use serde::{Deserialize, Serialize};

/// Flat persisted record of one puzzle instance: `{state, step_index,
/// attempt_count}`, addressed by the instance's save key.
///
/// A snapshot outlives the instance it was captured from; it is restored
/// into a freshly constructed machine bound to the same definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    state: PuzzleState,
    step_index: u32,
    attempt_count: u32,
}

impl PuzzleSnapshot {
    /// Creates a snapshot from raw fields.
    pub fn new(state: PuzzleState, step_index: u32, attempt_count: u32) -> Self {
        Self {
            state,
            step_index,
            attempt_count,
        }
    }

    /// The recorded lifecycle state.
    pub fn state(&self) -> PuzzleState {
        self.state
    }

    /// The recorded step index.
    pub fn step_index(&self) -> u32 {
        self.step_index
    }

    /// The recorded attempt count.
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// Repairs a malformed snapshot against a concrete sequence length.
    ///
    /// The step index clamps into `0..=sequence_len`, and a `Completed`
    /// snapshot normalizes its step index to the full length. Applied on
    /// restore rather than rejecting the save.
    pub fn normalized(self, sequence_len: u32) -> Self {
        let step_index = if self.state == PuzzleState::Completed {
            sequence_len
        } else {
            self.step_index.min(sequence_len)
        };
        Self { step_index, ..self }
    }
}
