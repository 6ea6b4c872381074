//! Moderated-entity endpoints: users, posts, groups, pages.
//!
//! The four resources share listing, lookup, state-change and delete
//! shapes, differing only in path segment, so they are addressed through
//! one [`EntityKind`] enum rather than four near-identical API structs.

use serde::de::DeserializeOwned;
use serde_json::json;

use utezone_core::pagination::FetchRequest;
use utezone_core::types::EntityId;

use crate::http::{ApiClient, Envelope};
use crate::models::ListData;
use crate::ClientError;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Post,
    Group,
    Page,
}

impl EntityKind {
    fn segment(self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Post => "post",
            EntityKind::Group => "group",
            EntityKind::Page => "page",
        }
    }

    /// Posts use `/get/:id` for lookup; the others take the id directly.
    fn detail_path(self, id: &EntityId) -> String {
        match self {
            EntityKind::Post => format!("/v1/post/get/{id}"),
            kind => format!("/v1/{}/{id}", kind.segment()),
        }
    }
}

// ---------------------------------------------------------------------------
// EntityApi
// ---------------------------------------------------------------------------

pub struct EntityApi;

impl EntityApi {
    /// Fetch one page of a listing. The caller's pagination state builds
    /// the query (page, size, filters) and tags the request with a
    /// generation for stale-response discard.
    pub async fn list<T: DeserializeOwned>(
        api: &ApiClient,
        kind: EntityKind,
        request: &FetchRequest,
    ) -> Result<Envelope<ListData<T>>, ClientError> {
        api.get(&format!("/v1/{}/list", kind.segment()), &request.query)
            .await
    }

    pub async fn get_by_id<T: DeserializeOwned>(
        api: &ApiClient,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<Envelope<T>, ClientError> {
        api.get(&kind.detail_path(id), &[]).await
    }

    /// Move an entity to a new moderation status (approve, reject, ...).
    pub async fn change_state(
        api: &ApiClient,
        kind: EntityKind,
        id: &EntityId,
        status: i32,
    ) -> Result<Envelope<serde_json::Value>, ClientError> {
        api.put(
            &format!("/v1/{}/change-state", kind.segment()),
            &json!({ "id": id, "status": status }),
        )
        .await
    }

    pub async fn delete(
        api: &ApiClient,
        kind: EntityKind,
        id: &EntityId,
    ) -> Result<Envelope<serde_json::Value>, ClientError> {
        api.delete(&format!("/v1/{}/delete/{id}", kind.segment()))
            .await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
