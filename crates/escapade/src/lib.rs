//! Escapade - ordered-input puzzle progression engine
//!
//! The core of an escape-room style interaction system: each puzzle is a
//! small state machine that validates ordered player inputs against a
//! configured solution, gates advancement on cross-puzzle prerequisites and
//! resource ownership, enforces attempt limits, and exposes a snapshot
//! contract for save files.
//!
//! # Architecture
//!
//! - **Definition**: immutable per-puzzle configuration (solution sequence,
//!   gates, attempt policy, hint)
//! - **Machine**: the per-instance state machine and its operation set
//! - **Events**: typed broadcast channels, the only path from core to
//!   presentation
//! - **Registry**: ID-keyed machine lookup serving the prerequisite gate
//! - **Persist**: flat keyed snapshots for an external save orchestrator
//! - **Bind**: presentation reactors and interactable piece skins
//!
//! # Example
//!
//! ```
//! use escapade::{MemoryInventory, PuzzleDefinition, PuzzleRegistry, PuzzleState};
//!
//! let registry = PuzzleRegistry::new();
//! let inventory = MemoryInventory::new();
//! registry.register(
//!     PuzzleDefinition::new("cellar_door", ["left", "right"])
//!         .with_required_resources(["iron_key"]),
//! );
//!
//! // Gated until the key is held.
//! assert!(!registry.advance("cellar_door", "left", &inventory));
//!
//! inventory.grant("iron_key");
//! assert!(registry.advance("cellar_door", "left", &inventory));
//! assert!(registry.advance("cellar_door", "right", &inventory));
//!
//! let door = registry.get("cellar_door").unwrap();
//! assert_eq!(door.borrow().current_state(), PuzzleState::Completed);
//! ```
//!
//! # Concurrency
//!
//! Single-threaded, cooperative, synchronous: every operation runs to
//! completion within the caller's invocation, and exactly one logical owner
//! is expected to drive a given machine per discrete input event. Callers
//! with concurrent input sources must serialize them.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod definition;
mod events;
mod gate;
mod machine;
mod persist;
mod registry;
mod snapshot;
mod state;

// Public module declarations
pub mod bind;
pub mod invariants;

// Crate-level exports - puzzle configuration
pub use definition::PuzzleDefinition;

// Crate-level exports - lifecycle state
pub use state::PuzzleState;

// Crate-level exports - event channels
pub use events::{
    CountChannel, EventChannel, LabelChannel, ListenerToken, PuzzleEvents, SignalChannel,
};

// Crate-level exports - gate capabilities
pub use gate::{MemoryInventory, PrerequisiteGate, ResourceGate, Ungated};

// Crate-level exports - the state machine
pub use machine::PuzzleMachine;

// Crate-level exports - persistence
pub use persist::{
    PersistError, SAVE_FORMAT_VERSION, SaveData, capture_registry, restore_registry,
};
pub use snapshot::PuzzleSnapshot;

// Crate-level exports - registry
pub use registry::{PuzzleRegistry, SharedMachine};
