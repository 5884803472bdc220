//! Lifecycle states for a puzzle instance.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle state of a puzzle instance.
///
/// Legal forward transitions:
/// - `Locked` → `Available` (explicit unlock)
/// - `Available` → `InProgress` (first valid advance, silent)
/// - `InProgress` → `Completed` (sequence exhausted)
/// - `InProgress` → `Failed` (attempt limit reached)
///
/// [`reset`](crate::PuzzleMachine::reset) returns to `Available` from any
/// state; [`lock`](crate::PuzzleMachine::lock) is permitted from any state
/// except `Completed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum PuzzleState {
    /// The puzzle rejects all input until explicitly unlocked.
    Locked,
    /// The puzzle is ready to accept its first token.
    Available,
    /// At least one valid advance attempt has been made.
    InProgress,
    /// The full token sequence was entered in order.
    Completed,
    /// The attempt limit was reached; terminal until reset.
    Failed,
}

impl PuzzleState {
    /// Whether a token submitted in this state can advance progress.
    pub fn accepts_input(self) -> bool {
        matches!(self, PuzzleState::Available | PuzzleState::InProgress)
    }

    /// Whether this state ends the puzzle's run (pending a reset).
    pub fn is_terminal(self) -> bool {
        matches!(self, PuzzleState::Completed | PuzzleState::Failed)
    }

    /// Whether the puzzle may be locked from this state.
    pub fn can_lock(self) -> bool {
        !matches!(self, PuzzleState::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_available_and_in_progress_accept_input() {
        assert!(PuzzleState::Available.accepts_input());
        assert!(PuzzleState::InProgress.accepts_input());
        assert!(!PuzzleState::Locked.accepts_input());
        assert!(!PuzzleState::Completed.accepts_input());
        assert!(!PuzzleState::Failed.accepts_input());
    }

    #[test]
    fn test_completed_cannot_be_locked() {
        assert!(!PuzzleState::Completed.can_lock());
        assert!(PuzzleState::Failed.can_lock());
        assert!(PuzzleState::Locked.can_lock());
    }

    #[test]
    fn test_state_round_trips_through_display() {
        use std::str::FromStr;

        for state in [
            PuzzleState::Locked,
            PuzzleState::Available,
            PuzzleState::InProgress,
            PuzzleState::Completed,
            PuzzleState::Failed,
        ] {
            let text = state.to_string();
            assert_eq!(PuzzleState::from_str(&text).unwrap(), state);
        }
    }
}
