//! Read-only gate capabilities consumed at the instant of an advance attempt.
//!
//! The engine never mutates gate-owned state; both queries are snapshot
//! reads, and a missing or unknown ID always answers "not satisfied".

use std::cell::RefCell;
use std::collections::HashSet;
use tracing::debug;

/// Completion lookup for cross-puzzle prerequisites.
pub trait PrerequisiteGate {
    /// Whether the named puzzle reports completed. Unknown IDs are false.
    fn is_completed(&self, puzzle_id: &str) -> bool;
}

/// Resource-presence lookup, the only surface an inventory exposes here.
pub trait ResourceGate {
    /// Whether the player holds the named resource. Unknown IDs are false.
    fn has_resource(&self, resource_id: &str) -> bool;
}

/// Gate that satisfies nothing.
///
/// The stand-in for an absent collaborator: every query answers false, so a
/// puzzle listing prerequisites or resources can never advance through it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ungated;

impl PrerequisiteGate for Ungated {
    fn is_completed(&self, _puzzle_id: &str) -> bool {
        false
    }
}

impl ResourceGate for Ungated {
    fn has_resource(&self, _resource_id: &str) -> bool {
        false
    }
}

/// Set-backed resource store for tests and demos.
///
/// Interior mutability lets a shared handle grant and revoke while machines
/// hold only the read-side [`ResourceGate`] view.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventory {
    items: RefCell<HashSet<String>>,
}

impl MemoryInventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource. Returns false if it was already held.
    pub fn grant(&self, resource_id: impl Into<String>) -> bool {
        let id = resource_id.into();
        debug!(resource_id = %id, "granting resource");
        self.items.borrow_mut().insert(id)
    }

    /// Removes a resource. Returns false if it was not held.
    pub fn revoke(&self, resource_id: &str) -> bool {
        debug!(resource_id, "revoking resource");
        self.items.borrow_mut().remove(resource_id)
    }

    /// Number of held resources.
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    /// Whether the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl ResourceGate for MemoryInventory {
    fn has_resource(&self, resource_id: &str) -> bool {
        self.items.borrow().contains(resource_id)
    }
}
