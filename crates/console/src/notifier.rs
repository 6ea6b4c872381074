//! Attention-drawing side effects: window-title announcements and
//! desktop notifications.
//!
//! Both are behind traits: the poller only decides *when* to announce,
//! never how. The default implementations write the terminal title via
//! the OSC 2 escape and log desktop notes as structured events.

use std::io::Write;

/// Tag shared by every desktop note so repeats replace instead of stack.
pub const NOTIFICATION_TAG: &str = "utezone-notification";

// ---------------------------------------------------------------------------
// Title announcements
// ---------------------------------------------------------------------------

/// Shows a transient attention title, then restores the original.
pub trait Announcer: Send + Sync {
    fn announce(&self, title: &str);
    fn restore(&self);
}

/// Sets the terminal emulator title with the OSC 2 escape sequence.
pub struct TerminalAnnouncer {
    original_title: String,
}

impl TerminalAnnouncer {
    pub fn new(original_title: impl Into<String>) -> Self {
        Self {
            original_title: original_title.into(),
        }
    }

    fn set_title(title: &str) {
        let mut out = std::io::stdout();
        // Failure to write the escape is not worth surfacing.
        let _ = write!(out, "\x1b]2;{title}\x07");
        let _ = out.flush();
    }
}

impl Announcer for TerminalAnnouncer {
    fn announce(&self, title: &str) {
        Self::set_title(title);
    }

    fn restore(&self) {
        Self::set_title(&self.original_title);
    }
}

// ---------------------------------------------------------------------------
// Desktop notifications
// ---------------------------------------------------------------------------

/// Notification permission as granted by the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Not yet asked; a request may still succeed.
    Default,
    Granted,
    /// Denied; never ask again.
    Denied,
}

/// One desktop note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopNote {
    pub title: String,
    pub body: String,
    /// Notes sharing a tag replace each other instead of stacking.
    pub tag: String,
    /// Keep the note on screen until the user interacts with it.
    pub require_interaction: bool,
}

/// Environment capability for desktop notes.
pub trait DesktopNotifier: Send + Sync {
    /// Whether the environment can show desktop notes at all.
    fn supported(&self) -> bool;

    fn permission(&self) -> Permission;

    /// Ask for permission. Must only be called while the permission is
    /// [`Permission::Default`]; a denied permission is final.
    fn request_permission(&self) -> Permission;

    fn show(&self, note: &DesktopNote);
}

/// Notifier that logs notes as structured events.
pub struct LogNotifier;

impl DesktopNotifier for LogNotifier {
    fn supported(&self) -> bool {
        true
    }

    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn show(&self, note: &DesktopNote) {
        tracing::info!(
            target: "desktop_note",
            title = %note.title,
            body = %note.body,
            tag = %note.tag,
            "notification"
        );
    }
}

/// Notifier for environments with no notification support; every call
/// is a no-op.
pub struct UnsupportedNotifier;

impl DesktopNotifier for UnsupportedNotifier {
    fn supported(&self) -> bool {
        false
    }

    fn permission(&self) -> Permission {
        Permission::Denied
    }

    fn request_permission(&self) -> Permission {
        Permission::Denied
    }

    fn show(&self, _note: &DesktopNote) {}
}
