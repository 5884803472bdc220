//! Presentation-layer bindings.
//!
//! Everything in this module sits on the far side of the event channels: it
//! forwards raw interaction tokens into the engine and reacts to lifecycle
//! notifications, but owns no puzzle state and never calls transition logic
//! directly. Multiple physical skins (levers, dials, buttons) share one
//! [`PuzzleMachine`](crate::PuzzleMachine) through these types.

mod display;
mod pieces;

pub use display::{ElementVisual, SequenceDisplay};
pub use pieces::{ButtonPiece, DialPiece, LeverPiece};

use crate::gate::ResourceGate;
use crate::registry::PuzzleRegistry;
use crate::state::PuzzleState;
use std::rc::Rc;
use tracing::debug;

/// Capability interface for a focusable, interactable puzzle piece.
///
/// Replaces an inheritance hook: concrete pieces compose this trait and a
/// [`TokenPort`] instead of overriding a base class. A focus/interaction
/// detector (outside this crate) drives the hooks with discrete events.
pub trait Interactable {
    /// Prompt text shown while the piece is focused.
    fn prompt(&self) -> String;

    /// Whether interacting right now could do anything.
    fn can_interact(&self) -> bool;

    /// The piece gained focus.
    fn on_focus(&mut self);

    /// The piece lost focus.
    fn on_lose_focus(&mut self);

    /// The player interacted. Returns whether the forwarded token advanced
    /// the puzzle.
    fn on_interact(&mut self) -> bool;
}

/// Shared handle a piece uses to forward tokens into one puzzle.
///
/// Bundles the registry (which serves the prerequisite gate), the resource
/// gate, and the target puzzle ID, so a piece needs exactly one submission
/// path and no knowledge of gating.
pub struct TokenPort {
    registry: Rc<PuzzleRegistry>,
    resources: Rc<dyn ResourceGate>,
    puzzle_id: String,
}

impl TokenPort {
    /// Creates a port targeting one puzzle.
    pub fn new(
        registry: Rc<PuzzleRegistry>,
        resources: Rc<dyn ResourceGate>,
        puzzle_id: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            resources,
            puzzle_id: puzzle_id.into(),
        }
    }

    /// The targeted puzzle ID.
    pub fn puzzle_id(&self) -> &str {
        &self.puzzle_id
    }

    /// Forwards a raw token into the targeted machine.
    pub fn submit(&self, token: &str) -> bool {
        debug!(puzzle_id = %self.puzzle_id, token, "forwarding token");
        self.registry
            .advance(&self.puzzle_id, token, self.resources.as_ref())
    }

    /// Current state of the targeted machine, if it is registered.
    pub fn machine_state(&self) -> Option<PuzzleState> {
        self.registry
            .get(&self.puzzle_id)
            .map(|machine| machine.borrow().current_state())
    }
}

impl Clone for TokenPort {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
            resources: Rc::clone(&self.resources),
            puzzle_id: self.puzzle_id.clone(),
        }
    }
}

impl std::fmt::Debug for TokenPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPort")
            .field("puzzle_id", &self.puzzle_id)
            .finish_non_exhaustive()
    }
}
