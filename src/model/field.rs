use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// An interaction field tracked per entity.
///
/// Boolean fields hold a [`FieldValue::Flag`], counters hold a
/// [`FieldValue::Count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Liked,
    LikeCount,
    Saved,
    Followed,
    FollowersCount,
    FollowingCount,
    CommentCount,
}

impl Field {
    pub fn is_counter(self) -> bool {
        matches!(
            self,
            Field::LikeCount | Field::FollowersCount | Field::FollowingCount | Field::CommentCount
        )
    }

    /// Value reported for an entity the store has never seen.
    pub fn default_value(self) -> FieldValue {
        if self.is_counter() {
            FieldValue::Count(0)
        } else {
            FieldValue::Flag(false)
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Liked => "liked",
            Field::LikeCount => "like_count",
            Field::Saved => "saved",
            Field::Followed => "followed",
            Field::FollowersCount => "followers_count",
            Field::FollowingCount => "following_count",
            Field::CommentCount => "comment_count",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Count(u64),
}

impl FieldValue {
    pub fn as_flag(self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(value),
            FieldValue::Count(_) => None,
        }
    }

    pub fn as_count(self) -> Option<u64> {
        match self {
            FieldValue::Count(value) => Some(value),
            FieldValue::Flag(_) => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Count(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Flag(value) => write!(f, "{}", value),
            FieldValue::Count(value) => write!(f, "{}", value),
        }
    }
}

/// One (entity, field) = value assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntityId,
    pub field: Field,
    pub value: FieldValue,
}

impl Entry {
    pub fn new(id: impl Into<EntityId>, field: Field, value: impl Into<FieldValue>) -> Self {
        Self {
            id: id.into(),
            field,
            value: value.into(),
        }
    }

    pub fn key(&self) -> (EntityId, Field) {
        (self.id.clone(), self.field)
    }
}
