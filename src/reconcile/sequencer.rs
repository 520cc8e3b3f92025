//! Per-(entity, field) request sequencing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::config::ResponseOrdering;
use crate::model::{EntityId, Field};

/// Identifies the request stream a toggle belongs to.
pub type SequenceKey = (EntityId, Field);

/// Issued when a request starts; checked when its response arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub key: SequenceKey,
    pub seq: u64,
    generation: u64,
}

/// Monotonic counter per key.
///
/// With [`ResponseOrdering::LastRequest`] a response only counts if no newer
/// request for the same key was issued after it. With
/// [`ResponseOrdering::LastResponse`] every response counts. In both modes
/// a response to a request issued before [`Sequencer::reset`] never counts.
pub struct Sequencer {
    ordering: ResponseOrdering,
    generation: AtomicU64,
    latest: Mutex<HashMap<SequenceKey, u64>>,
}

impl Sequencer {
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            generation: AtomicU64::new(0),
            latest: Mutex::new(HashMap::new()),
        }
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    pub fn issue(&self, key: SequenceKey) -> Ticket {
        let mut latest = self.latest.lock();
        let seq = latest.entry(key.clone()).or_insert(0);
        *seq += 1;
        Ticket {
            key,
            seq: *seq,
            generation: self.generation.load(Ordering::SeqCst),
        }
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        if ticket.generation != self.generation.load(Ordering::SeqCst) {
            return false;
        }
        match self.ordering {
            ResponseOrdering::LastResponse => true,
            ResponseOrdering::LastRequest => {
                self.latest.lock().get(&ticket.key).copied() == Some(ticket.seq)
            }
        }
    }

    /// Forget all counters (logout). Tickets issued before the reset are
    /// no longer current.
    pub fn reset(&self) {
        let mut latest = self.latest.lock();
        self.generation.fetch_add(1, Ordering::SeqCst);
        latest.clear();
    }
}
