//! Notification records, snapshot diffing, and tab-title formatting.
//!
//! The poller in `utezone-console` refetches the full notification list on
//! a fixed interval. Everything it needs to decide what to announce lives
//! here as pure functions over two snapshots of the list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// The notification has not been read yet.
pub const STATUS_UNREAD: i32 = 1;
/// The notification has been read.
pub const STATUS_READ: i32 = 2;

/// Maximum message length shown in the tab title before truncation.
pub const TITLE_MESSAGE_LIMIT: usize = 30;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A server-owned notification record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id")]
    pub id: EntityId,
    pub message: String,
    pub status: i32,
    pub created_at: Timestamp,
}

impl Notification {
    pub fn is_unread(&self) -> bool {
        self.status == STATUS_UNREAD
    }
}

/// Panel tab selection: unread / read / all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Unread,
    Read,
    All,
}

/// The notifications visible under a tab, preserving list order.
pub fn filter_by_tab(notifications: &[Notification], tab: Tab) -> Vec<&Notification> {
    notifications
        .iter()
        .filter(|n| match tab {
            Tab::Unread => n.status == STATUS_UNREAD,
            Tab::Read => n.status == STATUS_READ,
            Tab::All => true,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Snapshot queries
// ---------------------------------------------------------------------------

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| n.is_unread()).count()
}

/// The most recent unread notification by `created_at`, if any.
pub fn latest_unread(notifications: &[Notification]) -> Option<&Notification> {
    notifications
        .iter()
        .filter(|n| n.is_unread())
        .max_by_key(|n| n.created_at)
}

/// Notifications in `next` whose id was absent from the `prev` snapshot.
///
/// Newness is decided by id presence alone — reordering or edits to an
/// already-seen notification never count as new.
pub fn diff_new<'a>(prev: &[Notification], next: &'a [Notification]) -> Vec<&'a Notification> {
    let seen: HashSet<&str> = prev.iter().map(|n| n.id.as_str()).collect();
    next.iter().filter(|n| !seen.contains(n.id.as_str())).collect()
}

// ---------------------------------------------------------------------------
// Title formatting
// ---------------------------------------------------------------------------

/// Truncate `message` to `limit` characters, appending `"..."` when cut.
///
/// Counted in characters rather than bytes; messages are routinely
/// non-ASCII and must not be split inside a code point.
pub fn truncate_message(message: &str, limit: usize) -> String {
    if message.chars().count() > limit {
        let cut: String = message.chars().take(limit).collect();
        format!("{cut}...")
    } else {
        message.to_string()
    }
}

/// The transient tab title for the current snapshot, or `None` when there
/// is nothing unread and the original title should be restored.
///
/// Format: `"(<unread count>) <truncated message> - <original title>"`.
pub fn tab_title(notifications: &[Notification], original_title: &str) -> Option<String> {
    let latest = latest_unread(notifications)?;
    let truncated = truncate_message(&latest.message, TITLE_MESSAGE_LIMIT);
    Some(format!(
        "({}) {} - {}",
        unread_count(notifications),
        truncated,
        original_title
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
