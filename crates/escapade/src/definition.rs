//! Immutable per-puzzle configuration.

use crate::state::PuzzleState;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Immutable configuration for one puzzle instance.
///
/// Definitions are created at content-authoring time (usually deserialized
/// from JSON) and never mutated at runtime. The token sequence is the
/// solution: tokens are compared in order, ASCII case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDefinition {
    /// Stable identifier, unique within a registry.
    id: String,
    /// Ordered solution tokens.
    sequence: Vec<String>,
    /// IDs of puzzles that must be completed before this one accepts input.
    #[serde(default)]
    prerequisites: Vec<String>,
    /// IDs of resources the player must hold before this one accepts input.
    #[serde(default)]
    required_resources: Vec<String>,
    /// Incorrect inputs allowed before the puzzle fails. 0 means unlimited.
    #[serde(default)]
    max_attempts: u32,
    /// Whether an incorrect input rewinds progress to the first step.
    #[serde(default)]
    reset_on_failure: bool,
    /// Hint text surfaced to the player on request.
    #[serde(default)]
    hint: Option<String>,
    /// Whether the puzzle starts `Locked` instead of `Available`.
    #[serde(default)]
    starts_locked: bool,
    /// Overrides the derived save key.
    #[serde(default)]
    save_key: Option<String>,
}

impl PuzzleDefinition {
    /// Creates a definition with the given id and solution sequence.
    ///
    /// All other fields start at their defaults: no prerequisites, no
    /// required resources, unlimited attempts, no rewind on failure, no
    /// hint, initially `Available`.
    #[instrument(skip(sequence))]
    pub fn new(
        id: impl Into<String> + std::fmt::Debug,
        sequence: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into_iter().map(Into::into).collect(),
            prerequisites: Vec::new(),
            required_resources: Vec::new(),
            max_attempts: 0,
            reset_on_failure: false,
            hint: None,
            starts_locked: false,
            save_key: None,
        }
    }

    /// Adds prerequisite puzzle IDs.
    pub fn with_prerequisites(
        mut self,
        ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.prerequisites = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Adds required resource IDs.
    pub fn with_required_resources(
        mut self,
        ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.required_resources = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the attempt limit. 0 means unlimited.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets whether an incorrect input rewinds progress to step 0.
    pub fn with_reset_on_failure(mut self, reset_on_failure: bool) -> Self {
        self.reset_on_failure = reset_on_failure;
        self
    }

    /// Sets the hint text.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Makes the puzzle start `Locked` instead of `Available`.
    pub fn with_starts_locked(mut self, starts_locked: bool) -> Self {
        self.starts_locked = starts_locked;
        self
    }

    /// Overrides the derived save key.
    pub fn with_save_key(mut self, save_key: impl Into<String>) -> Self {
        self.save_key = Some(save_key.into());
        self
    }

    /// Returns the puzzle's stable identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the ordered solution tokens.
    pub fn sequence(&self) -> &[String] {
        &self.sequence
    }

    /// Returns the prerequisite puzzle IDs.
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    /// Returns the required resource IDs.
    pub fn required_resources(&self) -> &[String] {
        &self.required_resources
    }

    /// Returns the attempt limit. 0 means unlimited.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns whether an incorrect input rewinds progress.
    pub fn reset_on_failure(&self) -> bool {
        self.reset_on_failure
    }

    /// Returns the hint text, if any.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Returns whether the puzzle starts `Locked`.
    pub fn starts_locked(&self) -> bool {
        self.starts_locked
    }

    /// Returns the state a fresh instance of this puzzle starts in.
    pub fn initial_state(&self) -> PuzzleState {
        if self.starts_locked {
            PuzzleState::Locked
        } else {
            PuzzleState::Available
        }
    }

    /// Returns the key this puzzle's snapshot is stored under.
    ///
    /// Derived from the id (`puzzle.<id>`) unless overridden.
    pub fn save_key(&self) -> String {
        self.save_key
            .clone()
            .unwrap_or_else(|| format!("puzzle.{}", self.id))
    }

    /// Compares a token against the solution step at `index`,
    /// ASCII case-insensitively.
    pub fn matches_step(&self, index: usize, token: &str) -> bool {
        self.sequence
            .get(index)
            .is_some_and(|expected| expected.eq_ignore_ascii_case(token))
    }
}
