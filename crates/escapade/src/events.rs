//! Decoupled broadcast channels for puzzle lifecycle notifications.
//!
//! An [`EventChannel`] is the sole sanctioned path from the puzzle core to
//! presentation systems. Dispatch is synchronous and iterates a snapshot of
//! the listener list, so listeners may register or unregister (themselves or
//! others) while a raise is in flight.

use crate::state::PuzzleState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::trace;

/// Handle returned by [`EventChannel::register`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerToken(u64);

struct Entry<T> {
    token: ListenerToken,
    listener: Rc<dyn Fn(&T)>,
}

/// A typed broadcast channel with synchronous delivery.
///
/// Listeners are called in registration order. A listener unregistered
/// mid-dispatch is skipped; one registered mid-dispatch first hears the
/// *next* raise. The channel is single-threaded, matching the engine's
/// cooperative execution model.
pub struct EventChannel<T> {
    entries: RefCell<Vec<Entry<T>>>,
    next_token: Cell<u64>,
}

impl<T> EventChannel<T> {
    /// Creates an empty channel.
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(Vec::new()),
            next_token: Cell::new(0),
        }
    }

    /// Registers a listener and returns a token for later removal.
    pub fn register(&self, listener: impl Fn(&T) + 'static) -> ListenerToken {
        let token = ListenerToken(self.next_token.get());
        self.next_token.set(token.0 + 1);
        self.entries.borrow_mut().push(Entry {
            token,
            listener: Rc::new(listener),
        });
        token
    }

    /// Removes a listener. Returns false if the token is unknown.
    pub fn unregister(&self, token: ListenerToken) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|entry| entry.token != token);
        entries.len() < before
    }

    /// Synchronously notifies every currently registered listener.
    pub fn raise(&self, payload: &T) {
        // Snapshot first: a listener may mutate the registration list.
        let snapshot: Vec<(ListenerToken, Rc<dyn Fn(&T)>)> = self
            .entries
            .borrow()
            .iter()
            .map(|entry| (entry.token, Rc::clone(&entry.listener)))
            .collect();
        trace!(listeners = snapshot.len(), "raising event");

        for (token, listener) in snapshot {
            let still_registered = self
                .entries
                .borrow()
                .iter()
                .any(|entry| entry.token == token);
            if still_registered {
                listener(payload);
            }
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.entries.borrow().len()
    }
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Channel with no payload.
pub type SignalChannel = EventChannel<()>;

/// Channel with an integer payload.
pub type CountChannel = EventChannel<u32>;

/// Channel with a string payload.
pub type LabelChannel = EventChannel<String>;

/// The notification surface of one puzzle instance.
///
/// Presentation systems subscribe here; the core holds no back-references.
#[derive(Debug, Default)]
pub struct PuzzleEvents {
    /// A correct token advanced progress. Payload: the new step index.
    pub step_completed: CountChannel,
    /// An incorrect token was submitted. Payload: the new attempt count.
    pub incorrect_input: CountChannel,
    /// Progress rewound to step 0 (failure rewind or explicit reset).
    pub progress_reset: SignalChannel,
    /// The full sequence was entered; the puzzle is complete.
    pub completed: SignalChannel,
    /// The attempt limit was reached; the puzzle is failed.
    pub failed: SignalChannel,
    /// Hint text was requested. Payload: the hint.
    pub hint_shown: LabelChannel,
    /// The lifecycle state changed. Payload: the new state.
    ///
    /// Not raised for the silent `Available` → `InProgress` promotion.
    pub state_changed: EventChannel<PuzzleState>,
}
