//! Shared interaction store.
//!
//! One cloneable handle per session. Every screen that renders an entity
//! reads from the same store, so a write is seen everywhere without a
//! refetch.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::model::{EntityId, Entry, Field, FieldValue};
use crate::mvi::Reducer;
use crate::store::intent::{Origin, StoreIntent};
use crate::store::reducer::StoreReducer;
use crate::store::state::StoreState;

pub const DEFAULT_BROADCAST_CAPACITY: usize = 256;

/// A change broadcast to every mounted consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropagationEvent {
    Changed {
        id: EntityId,
        field: Field,
        value: FieldValue,
        origin: Origin,
    },
    /// The whole store was dropped; consumers should re-read.
    Cleared,
}

/// Thread-safe interaction store with change propagation.
///
/// Reads take a shared lock; writes are exclusive and publish their
/// events before the lock is released, so event order matches state order.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<StoreState>>,
    events: broadcast::Sender<PropagationEvent>,
}

impl SharedStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BROADCAST_CAPACITY)
    }

    /// Create a store whose propagation channel buffers `capacity` events
    /// per lagging consumer.
    pub fn with_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            inner: Arc::new(RwLock::new(StoreState::default())),
            events,
        }
    }

    /// Current value, or the field default if the entity was never seen.
    pub fn read(&self, id: &str, field: Field) -> FieldValue {
        self.inner.read().read(id, field)
    }

    pub fn get(&self, id: &str, field: Field) -> Option<FieldValue> {
        self.inner.read().get(id, field)
    }

    pub fn flag(&self, id: &str, field: Field) -> bool {
        self.read(id, field).as_flag().unwrap_or(false)
    }

    pub fn count(&self, id: &str, field: Field) -> u64 {
        self.read(id, field).as_count().unwrap_or(0)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.read().contains(id)
    }

    pub fn write(&self, entry: Entry, origin: Origin) {
        self.write_many(vec![entry], origin);
    }

    /// Apply a batch; readers never observe part of it.
    pub fn write_many(&self, entries: Vec<Entry>, origin: Origin) {
        let mut state = self.inner.write();
        self.apply_locked(&mut state, entries, origin);
    }

    /// Seed values only where the store has nothing yet.
    ///
    /// Used when a screen first renders an entity with the value it got
    /// from the server; an existing (possibly newer) value is kept.
    pub fn seed_missing(&self, entries: Vec<Entry>) {
        let mut state = self.inner.write();
        let missing: Vec<Entry> = entries
            .into_iter()
            .filter(|entry| state.get(entry.id.as_str(), entry.field).is_none())
            .collect();
        self.apply_locked(&mut state, missing, Origin::Seed);
    }

    /// Compute a batch from the current state and apply it under one lock.
    ///
    /// Returns the previous value of every written key, in write order.
    pub fn swap_with<F>(&self, origin: Origin, compute: F) -> Vec<Entry>
    where
        F: FnOnce(&StoreState) -> Vec<Entry>,
    {
        let mut state = self.inner.write();
        let entries = compute(&state);
        let previous = entries
            .iter()
            .map(|entry| {
                Entry::new(
                    entry.id.clone(),
                    entry.field,
                    state.read(entry.id.as_str(), entry.field),
                )
            })
            .collect();
        self.apply_locked(&mut state, entries, origin);
        previous
    }

    /// Drop everything (logout, profile switch).
    pub fn clear(&self) {
        let mut state = self.inner.write();
        let current = std::mem::take(&mut *state);
        let entities = current.entity_count();
        *state = StoreReducer::reduce(current, StoreIntent::Clear);
        self.publish(PropagationEvent::Cleared);
        tracing::info!(entities, "Interaction store cleared");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PropagationEvent> {
        self.events.subscribe()
    }

    /// Copy of the full state, for diagnostics and tests.
    pub fn state(&self) -> StoreState {
        self.inner.read().clone()
    }

    fn apply_locked(&self, state: &mut StoreState, entries: Vec<Entry>, origin: Origin) {
        if entries.is_empty() {
            return;
        }

        let changed: Vec<PropagationEvent> = entries
            .iter()
            .filter(|entry| state.get(entry.id.as_str(), entry.field) != Some(entry.value))
            .map(|entry| PropagationEvent::Changed {
                id: entry.id.clone(),
                field: entry.field,
                value: entry.value,
                origin,
            })
            .collect();

        let current = std::mem::take(state);
        *state = StoreReducer::reduce(current, StoreIntent::Write { entries, origin });

        for event in changed {
            self.publish(event);
        }
    }

    fn publish(&self, event: PropagationEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("No mounted consumers for propagation event");
        }
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new()
    }
}
