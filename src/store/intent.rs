use crate::model::Entry;
use crate::mvi::Intent;

/// Why a write reached the store. Carried on propagation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Initial values from a server list or detail response.
    Seed,
    /// Local guess applied before the request settles.
    Optimistic,
    /// Authoritative values from a successful response.
    Confirmed,
    /// Snapshot restored after a failed or cancelled request.
    Rollback,
}

#[derive(Debug, Clone)]
pub enum StoreIntent {
    /// Apply every entry; all of them become visible together.
    Write { entries: Vec<Entry>, origin: Origin },
    /// Drop all state (logout or profile switch).
    Clear,
}

impl Intent for StoreIntent {}
