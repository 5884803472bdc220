//! Example presentation reactor for an ordered multi-element puzzle.

use crate::events::ListenerToken;
use crate::registry::SharedMachine;
use crate::state::PuzzleState;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Visual state of one physical element in the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementVisual {
    /// At rest.
    Lowered,
    /// Animated into its solved pose.
    Raised,
}

#[derive(Debug)]
struct DisplayState {
    elements: Vec<ElementVisual>,
    finished: bool,
    resets: u32,
    last_state: Option<PuzzleState>,
}

enum Subscription {
    Step(ListenerToken),
    Reset(ListenerToken),
    Completed(ListenerToken),
    State(ListenerToken),
}

/// Reacts to one machine's lifecycle notifications by animating a row of
/// physical elements, one per solution step.
///
/// The display owns only visuals: it raises an element per completed step,
/// lowers everything on a progress reset, and records completion. It never
/// mutates the machine; the only writes flow the other way, through the
/// channels it subscribes to. [`detach`](SequenceDisplay::detach) removes
/// the subscriptions, after which the visuals freeze.
pub struct SequenceDisplay {
    machine: SharedMachine,
    state: Rc<RefCell<DisplayState>>,
    subscriptions: Vec<Subscription>,
}

impl SequenceDisplay {
    /// Subscribes a new display to the machine's channels.
    pub fn attach(machine: SharedMachine) -> Self {
        let element_count = machine.borrow().sequence_len() as usize;
        let state = Rc::new(RefCell::new(DisplayState {
            elements: vec![ElementVisual::Lowered; element_count],
            finished: false,
            resets: 0,
            last_state: None,
        }));

        let mut subscriptions = Vec::new();
        {
            let m = machine.borrow();
            let events = m.events();

            let on_step = Rc::clone(&state);
            subscriptions.push(Subscription::Step(events.step_completed.register(
                move |step| {
                    let mut s = on_step.borrow_mut();
                    if let Some(element) = s.elements.get_mut(*step as usize - 1) {
                        *element = ElementVisual::Raised;
                    }
                    debug!(step, "display raised element");
                },
            )));

            let on_reset = Rc::clone(&state);
            subscriptions.push(Subscription::Reset(events.progress_reset.register(
                move |()| {
                    let mut s = on_reset.borrow_mut();
                    s.elements.fill(ElementVisual::Lowered);
                    s.resets += 1;
                    debug!("display lowered all elements");
                },
            )));

            let on_completed = Rc::clone(&state);
            subscriptions.push(Subscription::Completed(events.completed.register(
                move |()| {
                    on_completed.borrow_mut().finished = true;
                    debug!("display marked finished");
                },
            )));

            let on_state = Rc::clone(&state);
            subscriptions.push(Subscription::State(events.state_changed.register(
                move |next| {
                    on_state.borrow_mut().last_state = Some(*next);
                },
            )));
        }

        Self {
            machine,
            state,
            subscriptions,
        }
    }

    /// Removes every subscription; the visuals keep their final pose.
    pub fn detach(&mut self) {
        let machine = self.machine.borrow();
        let events = machine.events();
        for subscription in self.subscriptions.drain(..) {
            match subscription {
                Subscription::Step(token) => events.step_completed.unregister(token),
                Subscription::Reset(token) => events.progress_reset.unregister(token),
                Subscription::Completed(token) => events.completed.unregister(token),
                Subscription::State(token) => events.state_changed.unregister(token),
            };
        }
    }

    /// Visual of the element at `index`.
    pub fn element(&self, index: usize) -> Option<ElementVisual> {
        self.state.borrow().elements.get(index).copied()
    }

    /// Number of elements currently raised.
    pub fn raised_count(&self) -> usize {
        self.state
            .borrow()
            .elements
            .iter()
            .filter(|element| **element == ElementVisual::Raised)
            .count()
    }

    /// Whether the completion notification has fired.
    pub fn is_finished(&self) -> bool {
        self.state.borrow().finished
    }

    /// Times the reset animation has replayed.
    pub fn reset_count(&self) -> u32 {
        self.state.borrow().resets
    }

    /// Last state announced on the `state_changed` channel.
    pub fn last_state(&self) -> Option<PuzzleState> {
        self.state.borrow().last_state
    }
}

impl std::fmt::Debug for SequenceDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceDisplay")
            .field("state", &self.state.borrow())
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}
