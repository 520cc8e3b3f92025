use serde_json::{json, Value};

use crate::model::{EntityId, EntityKind, EntityRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A request ready to be sent: method, path relative to the base URL, and
/// an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Interaction endpoints the reconciler drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    ToggleLike(EntityRef),
    AddToCollection {
        collection_id: String,
        item: EntityRef,
    },
    RemoveFromCollection(EntityId),
    ToggleFollow(EntityId),
    RemoveFollower(EntityId),
}

impl Endpoint {
    pub fn request(&self) -> ApiRequest {
        match self {
            Endpoint::ToggleLike(entity) => match entity.kind {
                EntityKind::Project => ApiRequest::post(
                    format!("project/toggle-like/?projectId={}", entity.id),
                    json!({}),
                ),
                _ => ApiRequest::post(format!("ugc/toggle-like/{}", entity.id), json!({})),
            },
            Endpoint::AddToCollection {
                collection_id,
                item,
            } => ApiRequest::post(
                format!("collections/add-item/{}", collection_id),
                json!({
                    "itemId": item.id.as_str(),
                    "itemType": item.kind.collection_item_type().unwrap_or("photo"),
                }),
            ),
            Endpoint::RemoveFromCollection(id) => {
                ApiRequest::delete(format!("collections/remove-item/{}", id))
            }
            Endpoint::ToggleFollow(user_id) => {
                ApiRequest::post(format!("user/toggle-follow/{}", user_id), json!({}))
            }
            Endpoint::RemoveFollower(user_id) => {
                ApiRequest::post(format!("user/remove-follower/{}", user_id), json!({}))
            }
        }
    }
}
