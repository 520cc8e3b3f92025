//! Save is two-step: unsaving is immediate, saving waits for the user to
//! pick a collection.

use crate::actions::{ActionError, Dispatcher};
use crate::api::Endpoint;
use crate::cancel::CancelToken;
use crate::model::{EntityRef, Entry, Field, SaveState};
use crate::reconcile::{OptimisticToggle, Outcome};

/// Result of tapping the save button.
#[derive(Debug)]
pub enum SaveTap {
    /// The item was saved; it has been removed from its collection.
    Unsaved(Outcome),
    /// The item was not saved; show the collection picker. Nothing has been
    /// written yet.
    PickCollection(PendingSave),
}

/// Where the user chose to save the item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionChoice {
    Existing(String),
    /// A collection created from the picker. Creating it already added the
    /// item on the server.
    Created(String),
}

/// An open collection picker.
#[derive(Debug)]
#[must_use = "a pending save must be completed or cancelled"]
pub struct PendingSave {
    item: EntityRef,
}

impl PendingSave {
    pub fn item(&self) -> &EntityRef {
        &self.item
    }

    /// Close the picker without saving. The store is left untouched.
    pub fn cancel(self) {
        tracing::debug!(entity = %self.item, "Save picker dismissed");
    }
}

impl Dispatcher {
    pub async fn tap_save(
        &self,
        entity: &EntityRef,
        known: SaveState,
        cancel: &CancelToken,
    ) -> Result<SaveTap, ActionError> {
        self.member("save")?;
        if entity.kind.collection_item_type().is_none() {
            return Err(ActionError::Unsupported {
                action: "save",
                kind: entity.kind,
            });
        }

        self.store().seed_missing(known.entries(&entity.id));

        if !self.store().flag(entity.id.as_str(), Field::Saved) {
            return Ok(SaveTap::PickCollection(PendingSave {
                item: entity.clone(),
            }));
        }

        let id = entity.id.clone();
        let toggle = OptimisticToggle::new(
            (entity.id.clone(), Field::Saved),
            Endpoint::RemoveFromCollection(entity.id.clone()).request(),
        )
        .optimistic(move |_| SaveState::new(false).entries(&id));

        Ok(SaveTap::Unsaved(self.reconciler().run(toggle, cancel).await))
    }

    /// Finish a save the user confirmed in the picker.
    pub async fn save_to_collection(
        &self,
        pending: PendingSave,
        choice: CollectionChoice,
        cancel: &CancelToken,
    ) -> Outcome {
        let PendingSave { item } = pending;
        let key = (item.id.clone(), Field::Saved);

        match choice {
            CollectionChoice::Created(collection_id) => {
                tracing::debug!(entity = %item, collection_id, "Saved via new collection");
                self.reconciler()
                    .apply_local(key, SaveState::new(true).entries(&item.id));
                Outcome::Confirmed { overridden: 0 }
            }
            CollectionChoice::Existing(collection_id) => {
                let id = item.id.clone();
                let toggle = OptimisticToggle::new(
                    key,
                    Endpoint::AddToCollection {
                        collection_id,
                        item,
                    }
                    .request(),
                )
                .optimistic(move |_| vec![Entry::new(id, Field::Saved, true)]);

                self.reconciler().run(toggle, cancel).await
            }
        }
    }
}
