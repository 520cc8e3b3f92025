use std::collections::HashMap;

use crate::model::{EntityId, Entry, Field, FieldValue};
use crate::mvi::ModelState;

/// Interaction values keyed by entity, then field.
///
/// An entity appears here only after it was seeded or written; absent
/// entities read as the field default.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreState {
    entities: HashMap<EntityId, HashMap<Field, FieldValue>>,
}

impl ModelState for StoreState {}

impl StoreState {
    pub fn get(&self, id: &str, field: Field) -> Option<FieldValue> {
        self.entities.get(id).and_then(|fields| fields.get(&field)).copied()
    }

    pub fn read(&self, id: &str, field: Field) -> FieldValue {
        self.get(id, field).unwrap_or_else(|| field.default_value())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub(crate) fn set(&mut self, entry: Entry) {
        self.entities
            .entry(entry.id)
            .or_default()
            .insert(entry.field, entry.value);
    }
}
