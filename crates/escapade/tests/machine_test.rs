//! Tests for the puzzle state machine's advance, failure, and reset rules.

use escapade::{PuzzleDefinition, PuzzleMachine, PuzzleState, Ungated};
use std::cell::Cell;
use std::rc::Rc;

fn three_step() -> PuzzleDefinition {
    PuzzleDefinition::new("three_step", ["A", "B", "C"])
}

#[test]
fn test_exact_sequence_advances_one_step_per_call() {
    let mut machine = PuzzleMachine::new(three_step());

    let completions = Rc::new(Cell::new(0u32));
    let completions_in = Rc::clone(&completions);
    machine
        .events()
        .completed
        .register(move |()| completions_in.set(completions_in.get() + 1));

    for (index, token) in ["A", "B", "C"].iter().enumerate() {
        assert!(machine.try_advance(token, &Ungated, &Ungated));
        assert_eq!(machine.step_index(), index as u32 + 1);
    }

    // Completed exactly once, on the final call.
    assert_eq!(machine.current_state(), PuzzleState::Completed);
    assert_eq!(completions.get(), 1);

    // Completed machines accept no further input.
    assert!(!machine.try_advance("A", &Ungated, &Ungated));
    assert_eq!(completions.get(), 1);
}

#[test]
fn test_token_comparison_is_case_insensitive() {
    let mut machine = PuzzleMachine::new(three_step());

    assert!(machine.try_advance("a", &Ungated, &Ungated));
    assert!(machine.try_advance("b", &Ungated, &Ungated));
    assert!(machine.try_advance("C", &Ungated, &Ungated));
    assert_eq!(machine.current_state(), PuzzleState::Completed);
}

#[test]
fn test_incorrect_token_under_limit_keeps_state() {
    let mut machine = PuzzleMachine::new(three_step().with_max_attempts(5));

    assert!(machine.try_advance("A", &Ungated, &Ungated));
    assert!(!machine.try_advance("X", &Ungated, &Ungated));

    assert_eq!(machine.current_state(), PuzzleState::InProgress);
    assert_eq!(machine.attempt_count(), 1);
    // reset_on_failure is off, so progress is untouched.
    assert_eq!(machine.step_index(), 1);
}

#[test]
fn test_incorrect_token_rewinds_when_configured() {
    let mut machine =
        PuzzleMachine::new(three_step().with_max_attempts(5).with_reset_on_failure(true));

    assert!(machine.try_advance("A", &Ungated, &Ungated));
    assert!(machine.try_advance("B", &Ungated, &Ungated));
    assert!(!machine.try_advance("X", &Ungated, &Ungated));

    assert_eq!(machine.current_state(), PuzzleState::InProgress);
    assert_eq!(machine.step_index(), 0);
    assert_eq!(machine.attempt_count(), 1);
}

#[test]
fn test_attempt_limit_fails_exactly_once() {
    let mut machine = PuzzleMachine::new(three_step().with_max_attempts(2));

    let failures = Rc::new(Cell::new(0u32));
    let failures_in = Rc::clone(&failures);
    machine
        .events()
        .failed
        .register(move |()| failures_in.set(failures_in.get() + 1));

    assert!(!machine.try_advance("X", &Ungated, &Ungated));
    assert_eq!(machine.current_state(), PuzzleState::InProgress);

    assert!(!machine.try_advance("Y", &Ungated, &Ungated));
    assert_eq!(machine.current_state(), PuzzleState::Failed);
    assert_eq!(failures.get(), 1);

    // Terminal until reset: nothing moves, no second failure signal.
    assert!(!machine.try_advance("A", &Ungated, &Ungated));
    assert_eq!(machine.attempt_count(), 2);
    assert_eq!(machine.step_index(), 0);
    assert_eq!(failures.get(), 1);
}

#[test]
fn test_zero_max_attempts_never_fails() {
    let mut machine = PuzzleMachine::new(three_step());

    for _ in 0..50 {
        assert!(!machine.try_advance("wrong", &Ungated, &Ungated));
    }
    assert_eq!(machine.current_state(), PuzzleState::InProgress);
    assert_eq!(machine.attempt_count(), 50);
}

#[test]
fn test_reset_recovers_from_every_state() {
    // Locked
    let mut machine = PuzzleMachine::new(three_step().with_starts_locked(true));
    machine.reset();
    assert_eq!(machine.current_state(), PuzzleState::Available);

    // InProgress
    let mut machine = PuzzleMachine::new(three_step());
    machine.try_advance("A", &Ungated, &Ungated);
    machine.reset();
    assert_eq!(machine.current_state(), PuzzleState::Available);
    assert_eq!(machine.step_index(), 0);
    assert_eq!(machine.attempt_count(), 0);

    // Failed
    let mut machine = PuzzleMachine::new(three_step().with_max_attempts(1));
    machine.try_advance("X", &Ungated, &Ungated);
    assert_eq!(machine.current_state(), PuzzleState::Failed);
    machine.reset();
    assert_eq!(machine.current_state(), PuzzleState::Available);
    assert!(machine.try_advance("A", &Ungated, &Ungated));

    // Completed
    let mut machine = PuzzleMachine::new(PuzzleDefinition::new("one", ["go"]));
    machine.try_advance("go", &Ungated, &Ungated);
    assert_eq!(machine.current_state(), PuzzleState::Completed);
    machine.reset();
    assert_eq!(machine.current_state(), PuzzleState::Available);
    assert_eq!(machine.step_index(), 0);
}

#[test]
fn test_locked_machine_rejects_every_token() {
    let mut machine = PuzzleMachine::new(three_step().with_starts_locked(true));

    for token in ["A", "B", "C", "anything"] {
        assert!(!machine.try_advance(token, &Ungated, &Ungated));
    }
    assert_eq!(machine.current_state(), PuzzleState::Locked);
    assert_eq!(machine.attempt_count(), 0);
    assert_eq!(machine.step_index(), 0);
}

#[test]
fn test_unlock_only_from_locked() {
    let mut machine = PuzzleMachine::new(three_step().with_starts_locked(true));

    assert!(machine.unlock());
    assert_eq!(machine.current_state(), PuzzleState::Available);

    // Already available: no-op.
    assert!(!machine.unlock());
    assert_eq!(machine.current_state(), PuzzleState::Available);
}

#[test]
fn test_lock_refused_only_from_completed() {
    let mut machine = PuzzleMachine::new(PuzzleDefinition::new("one", ["go"]));
    machine.try_advance("go", &Ungated, &Ungated);
    assert!(!machine.lock());
    assert_eq!(machine.current_state(), PuzzleState::Completed);

    let mut machine = PuzzleMachine::new(three_step());
    machine.try_advance("A", &Ungated, &Ungated);
    assert!(machine.lock());
    assert_eq!(machine.current_state(), PuzzleState::Locked);
    assert!(!machine.try_advance("B", &Ungated, &Ungated));
}

#[test]
fn test_available_to_in_progress_promotion_is_silent() {
    let mut machine = PuzzleMachine::new(three_step());

    let state_changes = Rc::new(Cell::new(0u32));
    let state_changes_in = Rc::clone(&state_changes);
    machine
        .events()
        .state_changed
        .register(move |_next| state_changes_in.set(state_changes_in.get() + 1));

    assert!(machine.try_advance("A", &Ungated, &Ungated));
    assert_eq!(machine.current_state(), PuzzleState::InProgress);
    assert_eq!(state_changes.get(), 0);
}

#[test]
fn test_progress_tracks_step_over_length() {
    let mut machine = PuzzleMachine::new(PuzzleDefinition::new("four", ["a", "b", "c", "d"]));
    assert_eq!(machine.progress(), 0.0);

    machine.try_advance("a", &Ungated, &Ungated);
    assert_eq!(machine.progress(), 0.25);

    machine.try_advance("b", &Ungated, &Ungated);
    assert_eq!(machine.progress(), 0.5);

    machine.try_advance("c", &Ungated, &Ungated);
    machine.try_advance("d", &Ungated, &Ungated);
    assert_eq!(machine.progress(), 1.0);
}

#[test]
fn test_empty_sequence_never_advances() {
    let mut machine = PuzzleMachine::new(PuzzleDefinition::new("hollow", Vec::<String>::new()));

    assert!(!machine.try_advance("anything", &Ungated, &Ungated));
    assert_eq!(machine.progress(), 0.0);
    assert_eq!(machine.current_state(), PuzzleState::Available);
}

#[test]
fn test_inert_machine_rejects_everything() {
    let mut machine = PuzzleMachine::inert("ghost");

    assert!(machine.is_inert());
    assert!(!machine.try_advance("A", &Ungated, &Ungated));
    assert!(!machine.unlock());
    assert!(!machine.lock());
    machine.reset();
    machine.force_complete();
    assert!(!machine.try_advance("A", &Ungated, &Ungated));
    assert_eq!(machine.progress(), 0.0);
    assert_eq!(machine.save_key(), "puzzle.ghost");
}

#[test]
fn test_hint_is_returned_and_broadcast() {
    let machine = PuzzleMachine::new(three_step().with_hint("Watch the paintings."));

    let heard = Rc::new(Cell::new(false));
    let heard_in = Rc::clone(&heard);
    machine.events().hint_shown.register(move |hint| {
        assert_eq!(hint, "Watch the paintings.");
        heard_in.set(true);
    });

    assert_eq!(machine.request_hint(), Some("Watch the paintings."));
    assert!(heard.get());

    let hintless = PuzzleMachine::new(three_step());
    assert_eq!(hintless.request_hint(), None);
}

#[test]
fn test_scenario_sequence_with_rewind() {
    // Tokens [A, B, C], two attempts allowed, rewind on failure.
    let mut machine = PuzzleMachine::new(
        PuzzleDefinition::new("scenario_a", ["A", "B", "C"])
            .with_max_attempts(2)
            .with_reset_on_failure(true)
            .with_starts_locked(true),
    );

    assert!(machine.unlock());
    assert_eq!(machine.current_state(), PuzzleState::Available);

    assert!(machine.try_advance("A", &Ungated, &Ungated));
    assert_eq!(machine.step_index(), 1);
    assert_eq!(machine.current_state(), PuzzleState::InProgress);

    assert!(!machine.try_advance("X", &Ungated, &Ungated));
    assert_eq!(machine.attempt_count(), 1);
    assert_eq!(machine.step_index(), 0);

    assert!(machine.try_advance("A", &Ungated, &Ungated));
    assert_eq!(machine.step_index(), 1);
    assert!(machine.try_advance("B", &Ungated, &Ungated));
    assert_eq!(machine.step_index(), 2);
    assert!(machine.try_advance("C", &Ungated, &Ungated));
    assert_eq!(machine.step_index(), 3);
    assert_eq!(machine.current_state(), PuzzleState::Completed);
}

#[test]
fn test_scenario_single_attempt_failure() {
    // Tokens [A, B], one attempt, no rewind.
    let mut machine = PuzzleMachine::new(
        PuzzleDefinition::new("scenario_b", ["A", "B"])
            .with_max_attempts(1)
            .with_starts_locked(true),
    );

    assert!(machine.unlock());

    assert!(!machine.try_advance("Z", &Ungated, &Ungated));
    assert_eq!(machine.attempt_count(), 1);
    assert_eq!(machine.current_state(), PuzzleState::Failed);

    assert!(!machine.try_advance("A", &Ungated, &Ungated));
    assert_eq!(machine.current_state(), PuzzleState::Failed);
    assert_eq!(machine.step_index(), 0);
}
