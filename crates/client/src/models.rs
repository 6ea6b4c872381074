//! Wire models for server-owned records.
//!
//! These mirror the API's JSON shapes (camelCase, Mongo-style `_id`).
//! They are read-only view state: replaced wholesale on every fetch and
//! never persisted client-side.

use serde::{Deserialize, Serialize};

use utezone_core::types::EntityId;

// ---------------------------------------------------------------------------
// Paging wrapper
// ---------------------------------------------------------------------------

/// One page of a listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// The subset of a user record embedded in posts and pickers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// The authenticated admin's own profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<i32>,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub user: UserSummary,
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub kind: i32,
    pub status: i32,
    #[serde(default)]
    pub total_reactions: u64,
    #[serde(default)]
    pub total_comments: u64,
    /// 1 when the post has been edited since publication.
    #[serde(default)]
    pub is_updated: i32,
    /// Server-formatted display timestamp.
    #[serde(default)]
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Groups and pages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub kind: i32,
    pub status: i32,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub total_members: Option<u64>,
    #[serde(default)]
    pub total_posts: Option<u64>,
}

/// A fan/community page (distinct from a group: one owner, follower model).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitePage {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    pub kind: i32,
    pub status: i32,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub total_followers: Option<u64>,
}

// ---------------------------------------------------------------------------
// Chatbot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub icon: String,
    pub text: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_active: bool,
}

/// A knowledge document indexed for the chatbot. Unlike the rest of the
/// API this resource uses a plain `id` field and no envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotDocument {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub created_at: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
