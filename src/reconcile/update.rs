//! A single optimistic mutation and its snapshot.

use uuid::Uuid;

use crate::model::{Entry, FieldValue};
use crate::reconcile::sequencer::Ticket;
use crate::store::{Origin, SharedStore, StoreState};

/// An optimistic write that has not been settled yet.
///
/// Holds the pre-mutation values of every key it wrote. The snapshot is
/// consumed by the first settle call (rollback, confirm or discard), so a
/// second rollback cannot reapply it.
///
/// Keys on the ticket's own entity are restored exactly. Counters on other
/// entities (the viewer's follow aggregates) are shared with toggles on
/// other keys, so their rollback reverses only this update's delta.
#[derive(Debug)]
pub struct PendingUpdate {
    id: Uuid,
    ticket: Ticket,
    optimistic: Vec<Entry>,
    snapshot: Option<Vec<Entry>>,
}

impl PendingUpdate {
    /// Compute the optimistic entries from the current store state, apply
    /// them, and keep what they replaced.
    pub fn begin<F>(store: &SharedStore, ticket: Ticket, compute: F) -> Self
    where
        F: FnOnce(&StoreState) -> Vec<Entry>,
    {
        let mut optimistic = Vec::new();
        let snapshot = store.swap_with(Origin::Optimistic, |state| {
            optimistic = compute(state);
            optimistic.clone()
        });

        Self {
            id: Uuid::new_v4(),
            ticket,
            optimistic,
            snapshot: Some(snapshot),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub fn optimistic(&self) -> &[Entry] {
        &self.optimistic
    }

    pub fn snapshot(&self) -> Option<&[Entry]> {
        self.snapshot.as_deref()
    }

    pub fn is_settled(&self) -> bool {
        self.snapshot.is_none()
    }

    /// Undo the optimistic write. Returns `false` if the update was already
    /// settled.
    pub fn rollback(&mut self, store: &SharedStore) -> bool {
        let Some(snapshot) = self.snapshot.take() else {
            return false;
        };
        let owner = &self.ticket.key.0;
        let optimistic = &self.optimistic;
        store.swap_with(Origin::Rollback, |state| {
            snapshot
                .into_iter()
                .zip(optimistic)
                .map(|(previous, applied)| {
                    if previous.id == *owner {
                        return previous;
                    }
                    match (previous.value, applied.value) {
                        (FieldValue::Count(before), FieldValue::Count(after)) => {
                            let current = state
                                .read(previous.id.as_str(), previous.field)
                                .as_count()
                                .unwrap_or(0);
                            let restored = if after >= before {
                                current.saturating_sub(after - before)
                            } else {
                                current.saturating_add(before - after)
                            };
                            Entry::new(previous.id, previous.field, restored)
                        }
                        _ => previous,
                    }
                })
                .collect()
        });
        true
    }

    /// Keep the optimistic values, overwriting any key the server reported
    /// authoritatively. Returns how many keys the server corrected.
    pub fn confirm(&mut self, store: &SharedStore, authoritative: Vec<Entry>) -> usize {
        if self.snapshot.take().is_none() {
            return 0;
        }

        let corrected = authoritative
            .iter()
            .filter(|entry| !self.optimistic.contains(entry))
            .count();
        store.write_many(authoritative, Origin::Confirmed);
        corrected
    }

    /// Drop the snapshot without touching the store.
    pub fn discard(&mut self) {
        self.snapshot = None;
    }
}
