//! Shared entity constants and state validation.
//!
//! Posts, groups, and pages all use the same small integer vocabularies
//! for visibility kind and moderation status.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Visibility kind constants
// ---------------------------------------------------------------------------

/// Visible to everyone.
pub const KIND_PUBLIC: i32 = 1;
/// Visible to friends / members only.
pub const KIND_FRIENDS: i32 = 2;
/// Visible to the author only.
pub const KIND_PRIVATE: i32 = 3;

// ---------------------------------------------------------------------------
// Moderation status constants
// ---------------------------------------------------------------------------

/// Waiting for moderator review.
pub const STATUS_PENDING: i32 = 1;
/// Approved and published.
pub const STATUS_APPROVED: i32 = 2;
/// Rejected by a moderator.
pub const STATUS_REJECTED: i32 = 3;

/// All valid moderation statuses for change-state requests.
pub const VALID_STATUSES: &[i32] = &[STATUS_PENDING, STATUS_APPROVED, STATUS_REJECTED];

/// Validate a target status for a change-state request.
pub fn validate_status(status: i32) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown entity status: {status}. Valid statuses: 1 (pending), 2 (approved), 3 (rejected)"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
