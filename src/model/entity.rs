use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of content an interaction targets.
///
/// The kind selects the endpoint family (projects have their own like route)
/// and the collection item type used when saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Post,
    Project,
    Video,
    User,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Post => "post",
            EntityKind::Project => "project",
            EntityKind::Video => "video",
            EntityKind::User => "user",
        }
    }

    /// Item type sent to the collections API, if this kind can be saved.
    pub fn collection_item_type(self) -> Option<&'static str> {
        match self {
            EntityKind::Post => Some("photo"),
            EntityKind::Project => Some("project"),
            EntityKind::Video => Some("video"),
            EntityKind::User => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque server-side identifier of a post, project, video or user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entity id together with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub id: EntityId,
    pub kind: EntityKind,
}

impl EntityRef {
    pub fn new(id: impl Into<EntityId>, kind: EntityKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn post(id: impl Into<EntityId>) -> Self {
        Self::new(id, EntityKind::Post)
    }

    pub fn project(id: impl Into<EntityId>) -> Self {
        Self::new(id, EntityKind::Project)
    }

    pub fn video(id: impl Into<EntityId>) -> Self {
        Self::new(id, EntityKind::Video)
    }

    pub fn user(id: impl Into<EntityId>) -> Self {
        Self::new(id, EntityKind::User)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_item_type() {
        assert_eq!(EntityKind::Post.collection_item_type(), Some("photo"));
        assert_eq!(EntityKind::Project.collection_item_type(), Some("project"));
        assert_eq!(EntityKind::Video.collection_item_type(), Some("video"));
        assert_eq!(EntityKind::User.collection_item_type(), None);
    }

    #[test]
    fn test_entity_ref_display() {
        assert_eq!(EntityRef::project("p1").to_string(), "project:p1");
    }

    #[test]
    fn test_entity_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&EntityId::from("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
