//! Entities, interaction fields and values.

mod entity;
mod field;
mod interaction;

pub use entity::{EntityId, EntityKind, EntityRef};
pub use field::{Entry, Field, FieldValue};
pub use interaction::{FollowState, LikeState, SaveState};
