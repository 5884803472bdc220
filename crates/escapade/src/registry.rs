//! ID-keyed registry of puzzle machines.
//!
//! The registry is the lookup behind cross-puzzle prerequisites: puzzles
//! name each other by ID, forming an unenforced dependency graph. Missing
//! IDs answer "not satisfied"; cycle-freeness is assumed, never checked.

use crate::definition::PuzzleDefinition;
use crate::gate::{PrerequisiteGate, ResourceGate};
use crate::machine::PuzzleMachine;
use crate::state::PuzzleState;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

/// Shared handle to a puzzle machine.
///
/// Single-threaded by design: exactly one logical owner drives a machine
/// per discrete input event, so `Rc<RefCell<_>>` is the whole story.
pub type SharedMachine = Rc<RefCell<PuzzleMachine>>;

/// Holds every puzzle machine in a scene, keyed by puzzle ID.
#[derive(Debug, Default)]
pub struct PuzzleRegistry {
    puzzles: RefCell<HashMap<String, SharedMachine>>,
}

impl PuzzleRegistry {
    /// Creates an empty registry.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a machine from a definition and registers it.
    ///
    /// A duplicate ID replaces the previous machine (with a warning); the
    /// old handle keeps working but is no longer reachable by ID.
    #[instrument(skip(self, definition), fields(puzzle_id = %definition.id()))]
    pub fn register(&self, definition: PuzzleDefinition) -> SharedMachine {
        self.insert(PuzzleMachine::new(definition))
    }

    /// Registers an already-constructed machine under its own ID.
    #[instrument(skip(self, machine), fields(puzzle_id = %machine.puzzle_id()))]
    pub fn insert(&self, machine: PuzzleMachine) -> SharedMachine {
        let id = machine.puzzle_id().to_owned();
        let handle = Rc::new(RefCell::new(machine));
        let previous = self
            .puzzles
            .borrow_mut()
            .insert(id.clone(), Rc::clone(&handle));
        if previous.is_some() {
            warn!(puzzle_id = %id, "replacing existing puzzle registration");
        } else {
            info!(puzzle_id = %id, "registered puzzle");
        }
        handle
    }

    /// Looks up a machine by ID.
    pub fn get(&self, puzzle_id: &str) -> Option<SharedMachine> {
        self.puzzles.borrow().get(puzzle_id).cloned()
    }

    /// Returns every registered puzzle ID.
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.puzzles.borrow().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of registered puzzles.
    pub fn len(&self) -> usize {
        self.puzzles.borrow().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.puzzles.borrow().is_empty()
    }

    /// Forwards a token into the named machine, with this registry serving
    /// the prerequisite side of the gate. Unknown IDs return false.
    #[instrument(skip(self, resources))]
    pub fn advance(&self, puzzle_id: &str, token: &str, resources: &dyn ResourceGate) -> bool {
        let Some(machine) = self.get(puzzle_id) else {
            warn!(puzzle_id, "advance on unknown puzzle");
            return false;
        };
        let result = machine.borrow_mut().try_advance(token, self, resources);
        result
    }

    /// Unlocks the named machine. Unknown IDs return false.
    #[instrument(skip(self))]
    pub fn unlock(&self, puzzle_id: &str) -> bool {
        match self.get(puzzle_id) {
            Some(machine) => machine.borrow_mut().unlock(),
            None => {
                warn!(puzzle_id, "unlock on unknown puzzle");
                false
            }
        }
    }

    /// Resets the named machine. Unknown IDs return false.
    #[instrument(skip(self))]
    pub fn reset(&self, puzzle_id: &str) -> bool {
        match self.get(puzzle_id) {
            Some(machine) => {
                machine.borrow_mut().reset();
                true
            }
            None => {
                warn!(puzzle_id, "reset on unknown puzzle");
                false
            }
        }
    }
}

impl PrerequisiteGate for PuzzleRegistry {
    /// A prerequisite is satisfied only by a registered machine that is
    /// currently `Completed`. Unknown IDs answer false, as does a puzzle
    /// naming itself (its cell is already mutably borrowed mid-advance).
    fn is_completed(&self, puzzle_id: &str) -> bool {
        let puzzles = self.puzzles.borrow();
        let Some(machine) = puzzles.get(puzzle_id) else {
            debug!(puzzle_id, "prerequisite lookup missed");
            return false;
        };
        match machine.try_borrow() {
            Ok(machine) => machine.current_state() == PuzzleState::Completed,
            Err(_) => {
                debug!(puzzle_id, "prerequisite lookup hit a borrowed machine");
                false
            }
        }
    }
}
