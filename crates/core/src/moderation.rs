//! Per-entity and global auto-moderation settings.
//!
//! Moderation settings are server-owned records mirrored into local state
//! for display. Lookup is a linear scan over the currently loaded page of
//! settings — page sizes are small enough that an index is not worth it.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

// ---------------------------------------------------------------------------
// Entity type constants
// ---------------------------------------------------------------------------

/// Moderation settings attached to a group.
pub const ENTITY_TYPE_GROUP: i32 = 2;
/// Moderation settings attached to a page.
pub const ENTITY_TYPE_PAGE: i32 = 3;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A per-entity moderation settings record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModerationSetting {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub entity_type: i32,
    pub entity_id: EntityId,
    pub is_auto_moderation_enabled: bool,
    pub is_moderation_required: bool,
}

/// The global (platform-wide) moderation flags; also used as the request
/// body when updating per-entity settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModerationFlags {
    pub is_auto_moderation_enabled: bool,
    pub is_moderation_required: bool,
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// The currently loaded set of per-entity moderation settings.
#[derive(Debug, Clone, Default)]
pub struct ModerationSettings {
    settings: Vec<ModerationSetting>,
}

impl ModerationSettings {
    pub fn new(settings: Vec<ModerationSetting>) -> Self {
        Self { settings }
    }

    /// Replace the whole set with a fresh fetch.
    pub fn replace(&mut self, settings: Vec<ModerationSetting>) {
        self.settings = settings;
    }

    /// Whether auto-moderation is enabled for `entity_id`.
    ///
    /// Fails closed: entities with no matching record report `false`.
    pub fn status_for(&self, entity_id: &str) -> bool {
        self.settings
            .iter()
            .find(|s| s.entity_id == entity_id)
            .map(|s| s.is_auto_moderation_enabled)
            .unwrap_or(false)
    }

    /// Whether manual moderation is required for `entity_id`.
    /// Same fail-closed default as [`status_for`](Self::status_for).
    pub fn required_for(&self, entity_id: &str) -> bool {
        self.settings
            .iter()
            .find(|s| s.entity_id == entity_id)
            .map(|s| s.is_moderation_required)
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
