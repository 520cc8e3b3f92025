//! Optimistic update, confirmation and rollback.

mod sequencer;
mod toggle;
mod update;

pub use sequencer::{SequenceKey, Sequencer, Ticket};
pub use toggle::{FailureReason, OptimisticToggle, Outcome, Reconciler};
pub use update::PendingUpdate;
