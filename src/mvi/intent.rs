//! Base trait for intents in the MVI loop.

/// Marker trait for intent objects.
///
/// Intents describe a requested state change: server seeding, an
/// optimistic write from a gesture, or a reconciliation result.
pub trait Intent: Send + 'static {}
