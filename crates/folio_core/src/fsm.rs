//! State Machine Runtime
//!
//! Flat state machines for component interaction states (hover, playback,
//! form status). A state type describes its own transition table by
//! implementing [`StateTransitions`]; [`Machine`] wraps a current state,
//! applies events, and keeps a short transition history for debugging.

use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Transition table for a state enum
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Maximum transitions kept in a machine's history
const HISTORY_LIMIT: usize = 32;

/// A running state machine over a [`StateTransitions`] type
#[derive(Clone, Debug)]
pub struct Machine<S: StateTransitions> {
    current: S,
    history: Vec<(S, EventType, S)>,
}

impl<S: StateTransitions> Machine<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventType) -> Option<S> {
        let next = self.current.on_event(event)?;
        if next != self.current {
            tracing::trace!(from = ?self.current, to = ?next, event, "state transition");
            self.record(self.current, event, next);
            self.current = next;
        }
        Some(next)
    }

    /// Force a state without consulting the transition table
    pub fn force(&mut self, state: S, event: EventType) {
        if state != self.current {
            self.record(self.current, event, state);
            self.current = state;
        }
    }

    /// Get transition history (oldest first)
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, from: S, event: EventType, to: S) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((from, event, to));
    }
}

impl<S: StateTransitions + Default> Default for Machine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Pointer hover state shared by hover-driven components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovered,
}

impl StateTransitions for HoverState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use crate::events::event_types::*;
        match (self, event) {
            (HoverState::Idle, POINTER_ENTER) => Some(HoverState::Hovered),
            (HoverState::Hovered, POINTER_LEAVE) => Some(HoverState::Idle),
            _ => None,
        }
    }
}
