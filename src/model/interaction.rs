//! Per-kind interaction records and their optimistic transitions.

use super::entity::EntityId;
use super::field::{Entry, Field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LikeState {
    pub is_liked: bool,
    pub like_count: u64,
}

impl LikeState {
    pub fn new(is_liked: bool, like_count: u64) -> Self {
        Self {
            is_liked,
            like_count,
        }
    }

    /// The state after one tap: flag inverted, count moved by one.
    ///
    /// The count saturates at zero so a stale `{liked, 0}` seed cannot underflow.
    pub fn toggled(self) -> Self {
        if self.is_liked {
            Self::new(false, self.like_count.saturating_sub(1))
        } else {
            Self::new(true, self.like_count + 1)
        }
    }

    pub fn entries(self, id: &EntityId) -> Vec<Entry> {
        vec![
            Entry::new(id.clone(), Field::Liked, self.is_liked),
            Entry::new(id.clone(), Field::LikeCount, self.like_count),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SaveState {
    pub is_saved: bool,
}

impl SaveState {
    pub fn new(is_saved: bool) -> Self {
        Self { is_saved }
    }

    pub fn entries(self, id: &EntityId) -> Vec<Entry> {
        vec![Entry::new(id.clone(), Field::Saved, self.is_saved)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowState {
    pub is_followed: bool,
}

impl FollowState {
    pub fn new(is_followed: bool) -> Self {
        Self { is_followed }
    }

    pub fn toggled(self) -> Self {
        Self::new(!self.is_followed)
    }

    pub fn entries(self, id: &EntityId) -> Vec<Entry> {
        vec![Entry::new(id.clone(), Field::Followed, self.is_followed)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;

    #[test]
    fn test_like_toggle_from_zero() {
        let next = LikeState::new(false, 0).toggled();
        assert_eq!(next, LikeState::new(true, 1));
    }

    #[test]
    fn test_unlike_decrements() {
        assert_eq!(LikeState::new(true, 6).toggled(), LikeState::new(false, 5));
    }

    #[test]
    fn test_unlike_saturates_at_zero() {
        assert_eq!(LikeState::new(true, 0).toggled(), LikeState::new(false, 0));
    }

    #[test]
    fn test_like_entries() {
        let id = EntityId::from("post_1");
        let entries = LikeState::new(true, 6).entries(&id);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].field, Field::Liked);
        assert_eq!(entries[0].value, FieldValue::Flag(true));
        assert_eq!(entries[1].field, Field::LikeCount);
        assert_eq!(entries[1].value, FieldValue::Count(6));
    }

    #[test]
    fn test_follow_toggle() {
        assert!(FollowState::new(false).toggled().is_followed);
        assert!(!FollowState::new(true).toggled().is_followed);
    }
}
