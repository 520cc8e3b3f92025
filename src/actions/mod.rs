//! Per-entity adapters over [`Reconciler`]: like, save, follow.
//!
//! Every action takes the value the caller currently renders. If the store
//! has never seen the entity that value is seeded first, so the snapshot a
//! rollback restores is always what the user saw.

mod error;
mod follow;
mod like;
pub mod policy;
mod save;

use std::sync::Arc;

use parking_lot::RwLock;

use crate::model::EntityId;
use crate::reconcile::Reconciler;
use crate::session::{AccountType, Session};
use crate::store::SharedStore;

pub use error::ActionError;
pub use policy::FollowContext;
pub use save::{CollectionChoice, PendingSave, SaveTap};

/// The logged-in user, as far as actions are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: EntityId,
    pub account_type: AccountType,
}

impl Viewer {
    pub fn new(user_id: impl Into<EntityId>, account_type: AccountType) -> Self {
        Self {
            user_id: user_id.into(),
            account_type,
        }
    }

    /// The viewer for a session, if someone is logged in.
    pub fn from_session(session: &Session) -> Option<Self> {
        if !session.is_logged_in() {
            return None;
        }
        session
            .user_id
            .clone()
            .map(|user_id| Self::new(user_id, session.account_type))
    }
}

/// Entry point for user gestures.
#[derive(Clone)]
pub struct Dispatcher {
    reconciler: Reconciler,
    viewer: Arc<RwLock<Option<Viewer>>>,
}

impl Dispatcher {
    pub fn new(reconciler: Reconciler, viewer: Option<Viewer>) -> Self {
        Self {
            reconciler,
            viewer: Arc::new(RwLock::new(viewer)),
        }
    }

    pub fn store(&self) -> &SharedStore {
        self.reconciler.store()
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    pub fn viewer(&self) -> Option<Viewer> {
        self.viewer.read().clone()
    }

    pub fn set_viewer(&self, viewer: Option<Viewer>) {
        *self.viewer.write() = viewer;
    }

    /// A logged-in, non-guest viewer, or `LoginRequired`.
    fn member(&self, action: &'static str) -> Result<Viewer, ActionError> {
        match self.viewer() {
            Some(viewer) if !viewer.account_type.is_guest() => Ok(viewer),
            _ => {
                tracing::debug!(action, "Action refused for guest session");
                Err(ActionError::LoginRequired { action })
            }
        }
    }
}
