//! The puzzle progression state machine.

use crate::definition::PuzzleDefinition;
use crate::events::PuzzleEvents;
use crate::gate::{PrerequisiteGate, ResourceGate};
use crate::snapshot::PuzzleSnapshot;
use crate::state::PuzzleState;
use tracing::{debug, info, instrument, warn};

/// One puzzle instance: current state, step index, attempt count, and the
/// notification surface presentation systems subscribe to.
///
/// All mutating operations run to completion within the caller's
/// invocation; the machine holds no locks and expects a single logical
/// owner to serialize calls (see the crate docs). Invalid operations
/// communicate through boolean returns and emitted events, never errors.
#[derive(Debug)]
pub struct PuzzleMachine {
    id: String,
    definition: Option<PuzzleDefinition>,
    state: PuzzleState,
    step_index: u32,
    attempt_count: u32,
    events: PuzzleEvents,
}

impl PuzzleMachine {
    /// Creates a machine bound to a definition, in its initial state.
    #[instrument(skip(definition), fields(puzzle_id = %definition.id()))]
    pub fn new(definition: PuzzleDefinition) -> Self {
        info!(
            steps = definition.sequence().len(),
            max_attempts = definition.max_attempts(),
            "creating puzzle machine"
        );
        Self {
            id: definition.id().to_owned(),
            state: definition.initial_state(),
            definition: Some(definition),
            step_index: 0,
            attempt_count: 0,
            events: PuzzleEvents::default(),
        }
    }

    /// Creates a machine with no definition.
    ///
    /// The instance is permanently inert: every [`try_advance`] returns
    /// false and every transition operation is a no-op. Capture and restore
    /// still carry its raw fields so a save slot is never lost to a missing
    /// definition.
    ///
    /// [`try_advance`]: PuzzleMachine::try_advance
    #[instrument]
    pub fn inert(id: impl Into<String> + std::fmt::Debug) -> Self {
        let id = id.into();
        warn!(puzzle_id = %id, "creating inert puzzle machine, no definition");
        Self {
            id,
            definition: None,
            state: PuzzleState::Locked,
            step_index: 0,
            attempt_count: 0,
            events: PuzzleEvents::default(),
        }
    }

    /// The puzzle's stable identifier.
    pub fn puzzle_id(&self) -> &str {
        &self.id
    }

    /// The current lifecycle state.
    pub fn current_state(&self) -> PuzzleState {
        self.state
    }

    /// Steps matched so far, in `0..=sequence_len`.
    pub fn step_index(&self) -> u32 {
        self.step_index
    }

    /// Incorrect inputs counted since the last reset.
    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// The bound definition, if any.
    pub fn definition(&self) -> Option<&PuzzleDefinition> {
        self.definition.as_ref()
    }

    /// Whether the machine was constructed without a definition.
    pub fn is_inert(&self) -> bool {
        self.definition.is_none()
    }

    /// Length of the solution sequence; 0 for an inert machine.
    pub fn sequence_len(&self) -> u32 {
        self.definition
            .as_ref()
            .map_or(0, |def| def.sequence().len() as u32)
    }

    /// The notification surface of this instance.
    pub fn events(&self) -> &PuzzleEvents {
        &self.events
    }

    /// The key this instance's snapshot is stored under, stable across the
    /// save/load cycle.
    pub fn save_key(&self) -> String {
        self.definition
            .as_ref()
            .map(PuzzleDefinition::save_key)
            .unwrap_or_else(|| format!("puzzle.{}", self.id))
    }

    /// Validates one input token against the current solution step.
    ///
    /// Returns false without side effects unless the state accepts input,
    /// every prerequisite reports completed, and every required resource is
    /// present; gate misses count no attempt. A correct token advances the
    /// step index (completing the puzzle when the sequence is exhausted); an
    /// incorrect one counts an attempt and either fails the puzzle at the
    /// configured limit or rewinds progress when the definition says so.
    #[instrument(
        skip(self, prerequisites, resources),
        fields(puzzle_id = %self.id, state = %self.state, step = self.step_index)
    )]
    pub fn try_advance(
        &mut self,
        token: &str,
        prerequisites: &dyn PrerequisiteGate,
        resources: &dyn ResourceGate,
    ) -> bool {
        let Some(def) = self.definition.as_ref() else {
            debug!("advance ignored, machine is inert");
            return false;
        };
        if !self.state.accepts_input() {
            debug!("advance ignored, state accepts no input");
            return false;
        }

        let sequence_len = def.sequence().len() as u32;
        if sequence_len == 0 {
            debug!("advance ignored, empty sequence");
            return false;
        }

        // Gate check is all-or-nothing: a miss leaves the call side-effect
        // free, attempt count included.
        if let Some(unmet) = def
            .prerequisites()
            .iter()
            .find(|id| !prerequisites.is_completed(id))
        {
            debug!(prerequisite = %unmet, "gate closed, prerequisite incomplete");
            return false;
        }
        if let Some(missing) = def
            .required_resources()
            .iter()
            .find(|id| !resources.has_resource(id))
        {
            debug!(resource = %missing, "gate closed, resource missing");
            return false;
        }

        let matched = def.matches_step(self.step_index as usize, token);
        let max_attempts = def.max_attempts();
        let reset_on_failure = def.reset_on_failure();

        // Silent promotion: the first valid advance attempt moves Available
        // to InProgress without a state_changed notification.
        if self.state == PuzzleState::Available {
            self.state = PuzzleState::InProgress;
        }

        let advanced = if matched {
            self.step_index += 1;
            info!(step = self.step_index, "correct step");
            self.events.step_completed.raise(&self.step_index);
            if self.step_index == sequence_len {
                self.complete();
            }
            true
        } else {
            self.attempt_count += 1;
            info!(attempts = self.attempt_count, "incorrect input");
            self.events.incorrect_input.raise(&self.attempt_count);

            if max_attempts > 0 && self.attempt_count >= max_attempts {
                warn!(max_attempts, "attempt limit reached, puzzle failed");
                self.set_state(PuzzleState::Failed);
                self.events.failed.raise(&());
            } else if reset_on_failure {
                debug!("rewinding progress to step 0");
                self.step_index = 0;
                self.events.progress_reset.raise(&());
            }
            false
        };

        self.assert_invariants();
        advanced
    }

    /// Returns progress in `[0, 1]`: step index over sequence length, 0 for
    /// an empty sequence.
    pub fn progress(&self) -> f32 {
        let len = self.sequence_len();
        if len == 0 {
            0.0
        } else {
            self.step_index as f32 / len as f32
        }
    }

    /// Returns the configured hint text and broadcasts it on the
    /// [`hint_shown`](PuzzleEvents::hint_shown) channel.
    pub fn request_hint(&self) -> Option<&str> {
        let hint = self.definition.as_ref().and_then(PuzzleDefinition::hint)?;
        self.events.hint_shown.raise(&hint.to_owned());
        Some(hint)
    }

    /// Rewinds the puzzle to `Available` with zeroed step index and attempt
    /// count, from any state including `Completed` and `Failed`.
    #[instrument(skip(self), fields(puzzle_id = %self.id, state = %self.state))]
    pub fn reset(&mut self) {
        if self.definition.is_none() {
            return;
        }
        info!("resetting puzzle");
        self.step_index = 0;
        self.attempt_count = 0;
        self.set_state(PuzzleState::Available);
        self.events.progress_reset.raise(&());
        self.assert_invariants();
    }

    /// Marks the puzzle completed with a full step index, emitting nothing.
    ///
    /// For loading a save that already records completion: the completion
    /// side effects (audio, downstream unlocks) must not replay.
    #[instrument(skip(self), fields(puzzle_id = %self.id))]
    pub fn force_complete(&mut self) {
        if self.definition.is_none() {
            return;
        }
        debug!("force-completing without notifications");
        self.step_index = self.sequence_len();
        self.state = PuzzleState::Completed;
        self.assert_invariants();
    }

    /// `Locked` → `Available`. Returns false (no-op) from any other state.
    #[instrument(skip(self), fields(puzzle_id = %self.id, state = %self.state))]
    pub fn unlock(&mut self) -> bool {
        if self.definition.is_none() || self.state != PuzzleState::Locked {
            return false;
        }
        info!("unlocking puzzle");
        self.set_state(PuzzleState::Available);
        true
    }

    /// Locks the puzzle from any state except `Completed`.
    #[instrument(skip(self), fields(puzzle_id = %self.id, state = %self.state))]
    pub fn lock(&mut self) -> bool {
        if self.definition.is_none() || !self.state.can_lock() {
            debug!("lock refused");
            return false;
        }
        info!("locking puzzle");
        self.set_state(PuzzleState::Locked);
        true
    }

    /// Captures the persisted snapshot. A pure read.
    pub fn capture_state(&self) -> PuzzleSnapshot {
        PuzzleSnapshot::new(self.state, self.step_index, self.attempt_count)
    }

    /// Restores a snapshot, bypassing transition validation.
    ///
    /// Malformed snapshots are normalized against the bound sequence length
    /// (see [`PuzzleSnapshot::normalized`]). Emits only `state_changed` so
    /// that completion side effects never replay during a load.
    #[instrument(skip(self, snapshot), fields(puzzle_id = %self.id))]
    pub fn restore_state(&mut self, snapshot: PuzzleSnapshot) {
        let normalized = snapshot.normalized(self.sequence_len());
        if normalized != snapshot {
            warn!(
                recorded_step = snapshot.step_index(),
                restored_step = normalized.step_index(),
                "normalized malformed snapshot on restore"
            );
        }
        self.state = normalized.state();
        self.step_index = normalized.step_index();
        self.attempt_count = normalized.attempt_count();
        debug!(state = %self.state, step = self.step_index, "restored snapshot");
        // Restore always announces the loaded state, changed or not, so
        // presentation re-syncs after level teardown.
        self.events.state_changed.raise(&self.state);
        self.assert_invariants();
    }

    /// Completion transition: state change notification first, then the
    /// dedicated completed signal. Idempotent by construction, since a
    /// `Completed` machine no longer accepts input.
    fn complete(&mut self) {
        info!("puzzle completed");
        self.set_state(PuzzleState::Completed);
        self.events.completed.raise(&());
    }

    /// Assigns a state and raises `state_changed` when the value differs.
    fn set_state(&mut self, next: PuzzleState) {
        if self.state != next {
            self.state = next;
            self.events.state_changed.raise(&next);
        }
    }

    fn assert_invariants(&self) {
        if cfg!(debug_assertions) {
            if let Err(violations) = crate::invariants::check_structural(self) {
                panic!("puzzle invariants violated: {violations:?}");
            }
        }
    }
}
