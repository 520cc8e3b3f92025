//! Generic optimistic toggle and its reconciliation.

use std::sync::Arc;

use thiserror::Error;

use crate::api::{ApiError, ApiRequest, ApiResponse, Transport};
use crate::cancel::CancelToken;
use crate::model::Entry;
use crate::reconcile::sequencer::{SequenceKey, Sequencer};
use crate::reconcile::update::PendingUpdate;
use crate::store::{Origin, SharedStore, StoreState};

type Compute = Box<dyn FnOnce(&StoreState) -> Vec<Entry> + Send>;
type Extract = Box<dyn Fn(&ApiResponse) -> Vec<Entry> + Send + Sync>;

/// One optimistic mutation plus the request that confirms it.
///
/// `optimistic` computes the next values from the current store state. It
/// runs under the store's write lock, so it must not touch the store.
/// `authoritative` pulls server-provided values out of a successful
/// response; whatever it returns overwrites the optimistic guess.
pub struct OptimisticToggle {
    key: SequenceKey,
    request: ApiRequest,
    compute: Compute,
    extract: Extract,
}

impl OptimisticToggle {
    pub fn new(key: SequenceKey, request: ApiRequest) -> Self {
        Self {
            key,
            request,
            compute: Box::new(|_| Vec::new()),
            extract: Box::new(|_| Vec::new()),
        }
    }

    pub fn optimistic<F>(mut self, compute: F) -> Self
    where
        F: FnOnce(&StoreState) -> Vec<Entry> + Send + 'static,
    {
        self.compute = Box::new(compute);
        self
    }

    pub fn authoritative<F>(mut self, extract: F) -> Self
    where
        F: Fn(&ApiResponse) -> Vec<Entry> + Send + Sync + 'static,
    {
        self.extract = Box::new(extract);
        self
    }

    pub fn key(&self) -> &SequenceKey {
        &self.key
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }
}

/// Why a toggle was rolled back.
#[derive(Debug, Error)]
pub enum FailureReason {
    #[error("server rejected request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error(transparent)]
    Transport(#[from] ApiError),
}

/// How a toggle settled.
#[derive(Debug)]
pub enum Outcome {
    /// The server accepted the change. `overridden` counts the keys the
    /// server corrected away from the optimistic guess.
    Confirmed { overridden: usize },
    /// The server refused or the request failed; the snapshot was restored.
    RolledBack { reason: FailureReason },
    /// A newer request for the same key was issued; the response was ignored.
    Stale,
    /// The caller cancelled before the response arrived.
    Cancelled,
}

impl Outcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Outcome::Confirmed { .. })
    }

    pub fn is_rolled_back(&self) -> bool {
        matches!(self, Outcome::RolledBack { .. })
    }
}

/// Runs optimistic toggles against the shared store.
#[derive(Clone)]
pub struct Reconciler {
    store: SharedStore,
    transport: Arc<dyn Transport>,
    sequencer: Arc<Sequencer>,
}

impl Reconciler {
    pub fn new(store: SharedStore, transport: Arc<dyn Transport>, sequencer: Arc<Sequencer>) -> Self {
        Self {
            store,
            transport,
            sequencer,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn sequencer(&self) -> &Arc<Sequencer> {
        &self.sequencer
    }

    /// Apply the optimistic write, send the request, then confirm or roll
    /// back.
    ///
    /// The optimistic write is visible before the first `.await`.
    pub async fn run(&self, toggle: OptimisticToggle, cancel: &CancelToken) -> Outcome {
        let OptimisticToggle {
            key,
            request,
            compute,
            extract,
        } = toggle;

        let ticket = self.sequencer.issue(key);
        let mut update = PendingUpdate::begin(&self.store, ticket, compute);

        tracing::debug!(
            update_id = %update.id(),
            entity = %update.ticket().key.0,
            field = ?update.ticket().key.1,
            seq = update.ticket().seq,
            method = request.method.as_str(),
            path = %request.path,
            "Optimistic update applied"
        );

        if cancel.is_cancelled() {
            return self.settle_cancelled(&mut update);
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return self.settle_cancelled(&mut update),
            result = self.transport.send(request) => result,
        };

        if !self.sequencer.is_current(update.ticket()) {
            update.discard();
            tracing::debug!(
                entity = %update.ticket().key.0,
                field = ?update.ticket().key.1,
                seq = update.ticket().seq,
                "Superseded response ignored"
            );
            return Outcome::Stale;
        }

        match result {
            Ok(response) if response.is_success() => {
                let overridden = update.confirm(&self.store, extract(&response));
                if overridden > 0 {
                    tracing::info!(
                        entity = %update.ticket().key.0,
                        overridden,
                        "Server values overrode optimistic update"
                    );
                }
                Outcome::Confirmed { overridden }
            }
            Ok(response) => {
                let reason = FailureReason::Rejected {
                    status: response.status(),
                    message: response.message.clone(),
                };
                self.settle_failed(&mut update, reason)
            }
            Err(e) => self.settle_failed(&mut update, FailureReason::Transport(e)),
        }
    }

    /// Write values that need no server round-trip, superseding any request
    /// still in flight for `key`.
    pub fn apply_local(&self, key: SequenceKey, entries: Vec<Entry>) {
        let _ticket = self.sequencer.issue(key);
        self.store.write_many(entries, Origin::Confirmed);
    }

    fn settle_failed(&self, update: &mut PendingUpdate, reason: FailureReason) -> Outcome {
        update.rollback(&self.store);
        tracing::warn!(
            update_id = %update.id(),
            entity = %update.ticket().key.0,
            field = ?update.ticket().key.1,
            error = %reason,
            "Optimistic update rolled back"
        );
        Outcome::RolledBack { reason }
    }

    fn settle_cancelled(&self, update: &mut PendingUpdate) -> Outcome {
        // A newer request owns the value now; leave it alone.
        if self.sequencer.is_current(update.ticket()) {
            update.rollback(&self.store);
        } else {
            update.discard();
        }
        tracing::debug!(
            entity = %update.ticket().key.0,
            field = ?update.ticket().key.1,
            "Optimistic update cancelled"
        );
        Outcome::Cancelled
    }
}
