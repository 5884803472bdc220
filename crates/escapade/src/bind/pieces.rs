//! Concrete interactable skins sharing one puzzle machine.

use super::{Interactable, TokenPort};
use tracing::debug;

/// A two-position lever that submits a fixed token when thrown.
#[derive(Debug)]
pub struct LeverPiece {
    label: String,
    token: String,
    port: TokenPort,
    focused: bool,
    thrown: bool,
}

impl LeverPiece {
    /// Creates a lever submitting `token` through `port`.
    pub fn new(label: impl Into<String>, token: impl Into<String>, port: TokenPort) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
            port,
            focused: false,
            thrown: false,
        }
    }

    /// Whether the lever is currently thrown.
    pub fn thrown(&self) -> bool {
        self.thrown
    }

    /// Whether the lever is currently focused.
    pub fn is_focused(&self) -> bool {
        self.focused
    }
}

impl Interactable for LeverPiece {
    fn prompt(&self) -> String {
        format!("Pull the {}", self.label)
    }

    fn can_interact(&self) -> bool {
        self.port
            .machine_state()
            .is_some_and(|state| state.accepts_input())
    }

    fn on_focus(&mut self) {
        debug!(label = %self.label, "lever focused");
        self.focused = true;
    }

    fn on_lose_focus(&mut self) {
        self.focused = false;
    }

    fn on_interact(&mut self) -> bool {
        self.thrown = !self.thrown;
        self.port.submit(&self.token)
    }
}

/// A dial that cycles through labeled positions, submitting the newly
/// selected label on each turn.
#[derive(Debug)]
pub struct DialPiece {
    label: String,
    positions: Vec<String>,
    selected: usize,
    port: TokenPort,
    focused: bool,
}

impl DialPiece {
    /// Creates a dial over `positions`, starting at the first.
    pub fn new(
        label: impl Into<String>,
        positions: impl IntoIterator<Item = impl Into<String>>,
        port: TokenPort,
    ) -> Self {
        Self {
            label: label.into(),
            positions: positions.into_iter().map(Into::into).collect(),
            selected: 0,
            port,
            focused: false,
        }
    }

    /// The currently selected position label.
    pub fn selected_position(&self) -> Option<&str> {
        self.positions.get(self.selected).map(String::as_str)
    }
}

impl Interactable for DialPiece {
    fn prompt(&self) -> String {
        match self.selected_position() {
            Some(position) => format!("Turn the {} (now at {position})", self.label),
            None => format!("Turn the {}", self.label),
        }
    }

    fn can_interact(&self) -> bool {
        !self.positions.is_empty()
            && self
                .port
                .machine_state()
                .is_some_and(|state| state.accepts_input())
    }

    fn on_focus(&mut self) {
        debug!(label = %self.label, "dial focused");
        self.focused = true;
    }

    fn on_lose_focus(&mut self) {
        self.focused = false;
    }

    fn on_interact(&mut self) -> bool {
        if self.positions.is_empty() {
            return false;
        }
        self.selected = (self.selected + 1) % self.positions.len();
        let token = self.positions[self.selected].clone();
        self.port.submit(&token)
    }
}

/// A momentary button that submits its own label when pressed.
#[derive(Debug)]
pub struct ButtonPiece {
    label: String,
    port: TokenPort,
    focused: bool,
    presses: u32,
}

impl ButtonPiece {
    /// Creates a button submitting its `label` as the token.
    pub fn new(label: impl Into<String>, port: TokenPort) -> Self {
        Self {
            label: label.into(),
            port,
            focused: false,
            presses: 0,
        }
    }

    /// Times the button has been pressed.
    pub fn presses(&self) -> u32 {
        self.presses
    }
}

impl Interactable for ButtonPiece {
    fn prompt(&self) -> String {
        format!("Press {}", self.label)
    }

    fn can_interact(&self) -> bool {
        self.port
            .machine_state()
            .is_some_and(|state| state.accepts_input())
    }

    fn on_focus(&mut self) {
        debug!(label = %self.label, "button focused");
        self.focused = true;
    }

    fn on_lose_focus(&mut self) {
        self.focused = false;
    }

    fn on_interact(&mut self) -> bool {
        self.presses += 1;
        self.port.submit(&self.label)
    }
}
