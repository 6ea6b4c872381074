//! Confirmation and loading gates for destructive operations.
//!
//! A destructive action never fires directly: it first raises a
//! [`ConfirmationRequest`] on the gate, and only an explicit confirm
//! runs it. The gate never auto-dismisses; only confirm or cancel
//! resolve it.

use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Confirmation
// ---------------------------------------------------------------------------

/// Accent used when rendering the confirm button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogColor {
    /// Destructive (delete).
    Red,
    /// Approve.
    Green,
    /// Reject / lock.
    Yellow,
}

/// The prompt for one pending destructive action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub color: DialogColor,
}

/// Holds at most one pending confirmation.
///
/// Showing a new request while one is pending replaces it; the replaced
/// action is simply never run.
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<ConfirmationRequest>,
}

impl ConfirmationGate {
    pub fn show(&mut self, request: ConfirmationRequest) {
        self.pending = Some(request);
    }

    /// Dismiss the pending prompt. Called on cancel and after the
    /// confirmed operation settles, success or failure alike.
    pub fn hide(&mut self) {
        self.pending = None;
    }

    pub fn is_visible(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest> {
        self.pending.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Loading overlays
// ---------------------------------------------------------------------------

/// Named loading flags, one per in-flight operation.
///
/// Unlike the client's single transport flag, overlays stack: two
/// concurrent operations keep the screen busy until both settle.
#[derive(Debug, Default)]
pub struct LoadingOverlays {
    active: BTreeSet<String>,
}

impl LoadingOverlays {
    pub fn begin(&mut self, name: impl Into<String>) {
        self.active.insert(name.into());
    }

    pub fn end(&mut self, name: &str) {
        self.active.remove(name);
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains(name)
    }

    /// Whether anything at all is still in flight.
    pub fn any_active(&self) -> bool {
        !self.active.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
