//! Seeding the store from paginated list responses.

use serde::Deserialize;
use serde_json::Value;

use crate::model::{EntityId, Entry, Field};
use crate::store::intent::Origin;
use crate::store::shared::SharedStore;

/// One item of a feed / profile tab page, as the server sends it.
///
/// Every interaction field is optional; absent fields are not seeded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    #[serde(rename = "_id")]
    pub id: EntityId,
    #[serde(default)]
    pub is_liked: Option<bool>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub is_saved: Option<bool>,
    #[serde(default)]
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub poster_details: Option<PosterDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterDetails {
    #[serde(default)]
    pub user_id: Option<EntityId>,
    #[serde(default)]
    pub is_followed: Option<bool>,
    #[serde(default)]
    pub followers_count: Option<u64>,
}

impl FeedItem {
    pub fn entries(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        if let Some(is_liked) = self.is_liked {
            entries.push(Entry::new(self.id.clone(), Field::Liked, is_liked));
        }
        if let Some(likes) = self.likes {
            entries.push(Entry::new(self.id.clone(), Field::LikeCount, likes));
        }
        if let Some(is_saved) = self.is_saved {
            entries.push(Entry::new(self.id.clone(), Field::Saved, is_saved));
        }
        if let Some(comments) = self.comment_count {
            entries.push(Entry::new(self.id.clone(), Field::CommentCount, comments));
        }
        if let Some(poster) = &self.poster_details {
            if let Some(user_id) = &poster.user_id {
                if let Some(is_followed) = poster.is_followed {
                    entries.push(Entry::new(user_id.clone(), Field::Followed, is_followed));
                }
                if let Some(followers) = poster.followers_count {
                    entries.push(Entry::new(user_id.clone(), Field::FollowersCount, followers));
                }
            }
        }
        entries
    }
}

/// Parse a page of list items, skipping any item that does not match the
/// expected shape.
pub fn parse_page(page: &Value) -> Vec<FeedItem> {
    let Some(items) = page.as_array() else {
        tracing::debug!("List response is not an array, nothing to seed");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match FeedItem::deserialize(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed list item");
                None
            }
        })
        .collect()
}

impl SharedStore {
    /// Bulk-seed from a page of list items. Returns the number of entries
    /// written.
    ///
    /// A fresh page is authoritative: values overwrite what the store holds.
    pub fn seed_page(&self, items: &[FeedItem]) -> usize {
        let entries: Vec<Entry> = items.iter().flat_map(FeedItem::entries).collect();
        let written = entries.len();
        self.write_many(entries, Origin::Seed);
        written
    }
}
