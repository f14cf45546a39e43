//! Outstanding-call bookkeeping and the stale-write gate.
//!
//! Every remote call on a screen is started under a named slot and receives a
//! [`Ticket`]. Only the completion holding the latest ticket of its slot may
//! mutate the view model; earlier completions for the same slot, and every
//! completion after the screen was closed, are discarded.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Lifecycle of one call slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl CallState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CallState::Loading)
    }
}

/// Proof that a call was started; returned with its completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<S> {
    slot: S,
    generation: u64,
}

impl<S> Ticket<S> {
    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Slots with a call in flight.
#[derive(Debug, Clone)]
pub struct LoadingSet<S> {
    slots: HashSet<S>,
}

impl<S> Default for LoadingSet<S> {
    fn default() -> Self {
        Self {
            slots: HashSet::new(),
        }
    }
}

impl<S: Eq + Hash> LoadingSet<S> {
    pub fn contains(&self, slot: &S) -> bool {
        self.slots.contains(slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.slots.iter()
    }

    fn insert(&mut self, slot: S) {
        self.slots.insert(slot);
    }

    fn remove(&mut self, slot: &S) {
        self.slots.remove(slot);
    }

    fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Per-screen call tracker.
#[derive(Debug, Clone)]
pub struct CallTracker<S> {
    next_generation: u64,
    latest: HashMap<S, u64>,
    states: HashMap<S, CallState>,
    loading: LoadingSet<S>,
    closed: bool,
}

impl<S> Default for CallTracker<S> {
    fn default() -> Self {
        Self {
            next_generation: 0,
            latest: HashMap::new(),
            states: HashMap::new(),
            loading: LoadingSet::default(),
            closed: false,
        }
    }
}

impl<S: Clone + Eq + Hash> CallTracker<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a call under `slot`, superseding any call in flight there.
    pub fn begin(&mut self, slot: S) -> Ticket<S> {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.latest.insert(slot.clone(), generation);
        self.states.insert(slot.clone(), CallState::Loading);
        if !self.closed {
            self.loading.insert(slot.clone());
        }
        Ticket { slot, generation }
    }

    /// Whether a completion carrying `ticket` may still write.
    pub fn is_current(&self, ticket: &Ticket<S>) -> bool {
        !self.closed && self.latest.get(&ticket.slot) == Some(&ticket.generation)
    }

    /// Records a completion. Returns false, changing nothing, when the
    /// ticket is stale or the tracker is closed.
    pub fn finish(&mut self, ticket: &Ticket<S>, succeeded: bool) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let state = if succeeded {
            CallState::Succeeded
        } else {
            CallState::Failed
        };
        self.states.insert(ticket.slot.clone(), state);
        self.loading.remove(&ticket.slot);
        true
    }

    /// Returns a settled slot to `Idle`. A slot still loading is left alone.
    pub fn reset(&mut self, slot: &S) {
        if let Some(state) = self.states.get_mut(slot)
            && !state.is_loading()
        {
            *state = CallState::Idle;
        }
    }

    pub fn state(&self, slot: &S) -> CallState {
        self.states.get(slot).copied().unwrap_or_default()
    }

    pub fn loading(&self) -> &LoadingSet<S> {
        &self.loading
    }

    pub fn is_loading(&self) -> bool {
        !self.loading.is_empty()
    }

    /// Discards every later completion, including those already in flight.
    pub fn close(&mut self) {
        self.closed = true;
        self.loading.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
