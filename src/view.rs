//! Mounted consumers of the shared store.
//!
//! A screen mounts the ids it renders and keeps a local copy of their
//! values. `sync` folds pending propagation events into that copy; events
//! for ids the screen does not hold (or dropped) are ignored.

use std::collections::{HashMap, HashSet};

use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::cancel::{CancelGuard, CancelToken};
use crate::model::{EntityId, Field, FieldValue};
use crate::store::{PropagationEvent, SharedStore};

pub struct MountedView {
    store: SharedStore,
    events: broadcast::Receiver<PropagationEvent>,
    ids: HashSet<EntityId>,
    values: HashMap<(EntityId, Field), FieldValue>,
    guard: CancelGuard,
}

impl SharedStore {
    /// Mount a consumer for `ids`. Values already in the store are copied in.
    pub fn mount<I>(&self, ids: I) -> MountedView
    where
        I: IntoIterator,
        I::Item: Into<EntityId>,
    {
        // Subscribe before copying so no write falls between the two.
        let events = self.subscribe();
        let mut view = MountedView {
            store: self.clone(),
            events,
            ids: ids.into_iter().map(Into::into).collect(),
            values: HashMap::new(),
            guard: CancelToken::new().drop_guard(),
        };
        view.resync();
        view
    }
}

impl MountedView {
    /// Token for requests started by this view. Cancelled when the view is
    /// dropped.
    pub fn token(&self) -> CancelToken {
        self.guard.token()
    }

    pub fn ids(&self) -> impl Iterator<Item = &EntityId> {
        self.ids.iter()
    }

    pub fn holds(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Local value, or the field default if the view never received one.
    pub fn value(&self, id: &str, field: Field) -> FieldValue {
        self.values
            .get(&(EntityId::from(id), field))
            .copied()
            .unwrap_or_else(|| field.default_value())
    }

    pub fn flag(&self, id: &str, field: Field) -> bool {
        self.value(id, field).as_flag().unwrap_or(false)
    }

    pub fn count(&self, id: &str, field: Field) -> u64 {
        self.value(id, field).as_count().unwrap_or(0)
    }

    /// Add ids (next page loaded).
    pub fn extend<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<EntityId>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
        self.resync();
    }

    /// Drop an id (item removed from the list). Later events for it no-op.
    pub fn remove(&mut self, id: &str) {
        self.ids.remove(id);
        self.values.retain(|(entity, _), _| entity.as_str() != id);
    }

    /// Apply every pending event. Returns how many changed a local value.
    pub fn sync(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.events.try_recv() {
                Ok(PropagationEvent::Changed {
                    id, field, value, ..
                }) => {
                    if !self.ids.contains(&id) {
                        continue;
                    }
                    if self.values.insert((id, field), value) != Some(value) {
                        applied += 1;
                    }
                }
                Ok(PropagationEvent::Cleared) => {
                    applied += self.values.len();
                    self.values.clear();
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "View lagged behind store, resyncing");
                    applied += self.resync();
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
        applied
    }

    /// Replace local values with the store's. Returns how many differed.
    fn resync(&mut self) -> usize {
        let state = self.store.state();
        let mut fresh = HashMap::new();
        for id in &self.ids {
            for field in FIELDS {
                if let Some(value) = state.get(id.as_str(), field) {
                    fresh.insert((id.clone(), field), value);
                }
            }
        }
        let changed = fresh
            .iter()
            .filter(|(key, value)| self.values.get(*key) != Some(*value))
            .count()
            + self
                .values
                .keys()
                .filter(|key| !fresh.contains_key(*key))
                .count();
        self.values = fresh;
        changed
    }
}

const FIELDS: [Field; 7] = [
    Field::Liked,
    Field::LikeCount,
    Field::Saved,
    Field::Followed,
    Field::FollowersCount,
    Field::FollowingCount,
    Field::CommentCount,
];
