use thiserror::Error;

use crate::model::EntityKind;

/// Refusals raised before anything is written to the store.
///
/// Network failures are not errors at this layer; they come back as
/// [`Outcome::RolledBack`](crate::reconcile::Outcome::RolledBack).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Guest or logged-out session
    #[error("Login required to {action}")]
    LoginRequired { action: &'static str },

    #[error("Cannot {action} a {kind}")]
    Unsupported {
        action: &'static str,
        kind: EntityKind,
    },

    #[error("Cannot follow or remove yourself")]
    SelfFollow,
}
