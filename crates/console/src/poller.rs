//! Background notification poller.
//!
//! Refetches the full notification list on a fixed interval and applies
//! the snapshot: desktop notes for ids not seen before, and a transient
//! attention title that reverts to the original after three seconds.
//! The very first snapshot only seeds the baseline — notifications that
//! existed before the console started are not "new".

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use utezone_client::notifications::NotificationApi;
use utezone_client::{ApiClient, GENERIC_FAILURE_MESSAGE};
use utezone_core::notifications::{diff_new, filter_by_tab, tab_title, Notification, Tab};
use utezone_core::types::EntityId;

use crate::notifier::{Announcer, DesktopNote, DesktopNotifier, Permission, NOTIFICATION_TAG};

/// How long the attention title stays up before reverting.
const TITLE_REVERT_AFTER: Duration = Duration::from_secs(3);

// ---------------------------------------------------------------------------
// Feed seam
// ---------------------------------------------------------------------------

/// Source of notification snapshots.
///
/// Every mutation returns the full updated list, so the panel can
/// replace its snapshot wholesale.
#[async_trait]
pub trait NotificationFeed: Send + Sync {
    async fn list(&self) -> Result<Vec<Notification>, String>;
    async fn mark_read(&self, id: &EntityId) -> Result<Vec<Notification>, String>;
    async fn mark_all_read(&self) -> Result<Vec<Notification>, String>;
    async fn delete(&self, id: &EntityId) -> Result<Vec<Notification>, String>;
    async fn delete_all(&self) -> Result<Vec<Notification>, String>;
}

/// Feed backed by the notification endpoints.
pub struct ApiNotificationFeed {
    api: Arc<ApiClient>,
}

impl ApiNotificationFeed {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NotificationFeed for ApiNotificationFeed {
    async fn list(&self) -> Result<Vec<Notification>, String> {
        match NotificationApi::list(&self.api).await {
            Ok(envelope) if envelope.result => Ok(envelope
                .data
                .map(|page| page.content)
                .unwrap_or_default()),
            Ok(envelope) => Err(envelope.surface_message().to_string()),
            Err(err) => {
                warn!(%err, "notification list request failed");
                Err(GENERIC_FAILURE_MESSAGE.to_string())
            }
        }
    }

    async fn mark_read(&self, id: &EntityId) -> Result<Vec<Notification>, String> {
        settle(NotificationApi::mark_read(&self.api, id).await)
    }

    async fn mark_all_read(&self) -> Result<Vec<Notification>, String> {
        settle(NotificationApi::mark_all_read(&self.api).await)
    }

    async fn delete(&self, id: &EntityId) -> Result<Vec<Notification>, String> {
        settle(NotificationApi::delete(&self.api, id).await)
    }

    async fn delete_all(&self) -> Result<Vec<Notification>, String> {
        settle(NotificationApi::delete_all(&self.api).await)
    }
}

fn settle(
    outcome: Result<utezone_client::Envelope<Vec<Notification>>, utezone_client::ClientError>,
) -> Result<Vec<Notification>, String> {
    match outcome {
        Ok(envelope) if envelope.result => Ok(envelope.data.unwrap_or_default()),
        Ok(envelope) => Err(envelope.surface_message().to_string()),
        Err(err) => {
            warn!(%err, "notification mutation failed");
            Err(GENERIC_FAILURE_MESSAGE.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// NotificationPanel
// ---------------------------------------------------------------------------

/// The notification snapshot plus its attention side effects.
pub struct NotificationPanel {
    feed: Arc<dyn NotificationFeed>,
    announcer: Arc<dyn Announcer>,
    desktop: Arc<dyn DesktopNotifier>,
    notifications: Vec<Notification>,
    tab: Tab,
    /// First poll seeds the baseline without desktop notes.
    baseline_seeded: bool,
    title_revert: Option<JoinHandle<()>>,
}

impl NotificationPanel {
    pub fn new(
        feed: Arc<dyn NotificationFeed>,
        announcer: Arc<dyn Announcer>,
        desktop: Arc<dyn DesktopNotifier>,
    ) -> Self {
        Self {
            feed,
            announcer,
            desktop,
            notifications: Vec::new(),
            tab: Tab::All,
            baseline_seeded: false,
            title_revert: None,
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// The notifications visible under the current tab.
    pub fn visible(&self) -> Vec<&Notification> {
        filter_by_tab(&self.notifications, self.tab)
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// One poll cycle. A failed fetch keeps the previous snapshot.
    pub async fn poll(&mut self) {
        match self.feed.list().await {
            Ok(next) => self.apply_snapshot(next),
            Err(message) => warn!(%message, "notification poll failed"),
        }
    }

    // ---- mutations ----

    pub async fn mark_read(&mut self, id: &EntityId) {
        let outcome = self.feed.mark_read(id).await;
        self.apply_mutation(outcome);
    }

    pub async fn mark_all_read(&mut self) {
        let outcome = self.feed.mark_all_read().await;
        self.apply_mutation(outcome);
    }

    pub async fn delete(&mut self, id: &EntityId) {
        let outcome = self.feed.delete(id).await;
        self.apply_mutation(outcome);
    }

    pub async fn delete_all(&mut self) {
        let outcome = self.feed.delete_all().await;
        self.apply_mutation(outcome);
    }

    /// Cancel the pending title revert and put the original title back.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.title_revert.take() {
            handle.abort();
        }
        self.announcer.restore();
    }

    // ---- snapshot application ----

    fn apply_mutation(&mut self, outcome: Result<Vec<Notification>, String>) {
        match outcome {
            Ok(next) => self.apply_snapshot(next),
            Err(message) => warn!(%message, "notification mutation failed"),
        }
    }

    /// Replace the snapshot and fire side effects.
    ///
    /// Desktop notes go out for ids absent from the previous snapshot,
    /// except on the very first snapshot which only seeds the baseline.
    /// Mutations can only shrink or re-status the id set, so applying
    /// their returned list through here never re-notifies.
    fn apply_snapshot(&mut self, next: Vec<Notification>) {
        if self.baseline_seeded {
            for fresh in diff_new(&self.notifications, &next) {
                // Only unread newcomers are worth a note.
                if fresh.is_unread() {
                    self.notify_desktop(fresh);
                }
            }
        } else {
            self.baseline_seeded = true;
        }
        self.notifications = next;
        self.refresh_title();
    }

    /// Announce the unread summary in the title for a few seconds, or
    /// restore the original title when nothing is unread.
    fn refresh_title(&mut self) {
        if let Some(handle) = self.title_revert.take() {
            handle.abort();
        }
        match tab_title(&self.notifications, original_title()) {
            Some(title) => {
                self.announcer.announce(&title);
                let announcer = Arc::clone(&self.announcer);
                self.title_revert = Some(tokio::spawn(async move {
                    tokio::time::sleep(TITLE_REVERT_AFTER).await;
                    announcer.restore();
                }));
            }
            None => self.announcer.restore(),
        }
    }

    /// Explicit opt-in for desktop notes; the only place a permission
    /// prompt is ever raised. Returns the resulting permission.
    pub fn request_desktop_permission(&self) -> Permission {
        if !self.desktop.supported() {
            return Permission::Denied;
        }
        match self.desktop.permission() {
            Permission::Default => self.desktop.request_permission(),
            decided => decided,
        }
    }

    fn notify_desktop(&self, notification: &Notification) {
        if !self.desktop.supported() {
            return;
        }
        // Prompting belongs to an explicit user action, never the poll
        // path: an undecided permission reads as "not granted" here.
        if self.desktop.permission() != Permission::Granted {
            debug!("desktop notifications not permitted, skipping");
            return;
        }
        self.desktop.show(&DesktopNote {
            title: original_title().to_string(),
            body: notification.message.clone(),
            tag: NOTIFICATION_TAG.to_string(),
            require_interaction: false,
        });
    }
}

/// The console's resting title.
fn original_title() -> &'static str {
    "UTE Zone Admin"
}

// ---------------------------------------------------------------------------
// Poll loop
// ---------------------------------------------------------------------------

/// Drive the panel until cancelled. The first tick fires immediately, so
/// the baseline is seeded as soon as the loop starts.
pub async fn run(mut panel: NotificationPanel, poll_interval: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(poll_interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => panel.poll().await,
            _ = cancel.cancelled() => {
                debug!("notification poller shutting down");
                panel.shutdown();
                break;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::TimeZone as _;

    use utezone_core::notifications::{STATUS_READ, STATUS_UNREAD};

    fn notif(id: &str, message: &str, status: i32, secs: i64) -> Notification {
        Notification {
            id: id.to_string(),
            message: message.to_string(),
            status,
            created_at: chrono::Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
        }
    }

    // -- fakes ---------------------------------------------------------------

    /// Feed returning queued snapshots in order; sticks on the last one.
    #[derive(Default)]
    struct ScriptedFeed {
        snapshots: Mutex<Vec<Vec<Notification>>>,
        mutation_reply: Mutex<Option<Vec<Notification>>>,
    }

    impl ScriptedFeed {
        fn with_snapshots(snapshots: Vec<Vec<Notification>>) -> Arc<Self> {
            Arc::new(Self {
                snapshots: Mutex::new(snapshots),
                mutation_reply: Mutex::new(None),
            })
        }

        fn next_snapshot(&self) -> Vec<Notification> {
            let mut snapshots = self.snapshots.lock().unwrap();
            if snapshots.len() > 1 {
                snapshots.remove(0)
            } else {
                snapshots.first().cloned().unwrap_or_default()
            }
        }
    }

    #[async_trait]
    impl NotificationFeed for ScriptedFeed {
        async fn list(&self) -> Result<Vec<Notification>, String> {
            Ok(self.next_snapshot())
        }

        async fn mark_read(&self, _id: &EntityId) -> Result<Vec<Notification>, String> {
            Ok(self.mutation_reply.lock().unwrap().clone().unwrap_or_default())
        }

        async fn mark_all_read(&self) -> Result<Vec<Notification>, String> {
            Ok(self.mutation_reply.lock().unwrap().clone().unwrap_or_default())
        }

        async fn delete(&self, _id: &EntityId) -> Result<Vec<Notification>, String> {
            Ok(self.mutation_reply.lock().unwrap().clone().unwrap_or_default())
        }

        async fn delete_all(&self) -> Result<Vec<Notification>, String> {
            Ok(Vec::new())
        }
    }

    #[derive(Default)]
    struct RecordingAnnouncer {
        calls: Mutex<Vec<String>>,
    }

    impl Announcer for RecordingAnnouncer {
        fn announce(&self, title: &str) {
            self.calls.lock().unwrap().push(format!("announce:{title}"));
        }

        fn restore(&self) {
            self.calls.lock().unwrap().push("restore".to_string());
        }
    }

    struct RecordingDesktop {
        permission: Mutex<Permission>,
        grant_on_request: bool,
        requests: Mutex<u32>,
        shown: Mutex<Vec<DesktopNote>>,
    }

    impl RecordingDesktop {
        fn with_permission(permission: Permission) -> Arc<Self> {
            Arc::new(Self {
                permission: Mutex::new(permission),
                grant_on_request: false,
                requests: Mutex::new(0),
                shown: Mutex::new(Vec::new()),
            })
        }

        fn granting_on_request() -> Arc<Self> {
            Arc::new(Self {
                permission: Mutex::new(Permission::Default),
                grant_on_request: true,
                requests: Mutex::new(0),
                shown: Mutex::new(Vec::new()),
            })
        }
    }

    impl DesktopNotifier for RecordingDesktop {
        fn supported(&self) -> bool {
            true
        }

        fn permission(&self) -> Permission {
            *self.permission.lock().unwrap()
        }

        fn request_permission(&self) -> Permission {
            *self.requests.lock().unwrap() += 1;
            if self.grant_on_request {
                *self.permission.lock().unwrap() = Permission::Granted;
            }
            *self.permission.lock().unwrap()
        }

        fn show(&self, note: &DesktopNote) {
            self.shown.lock().unwrap().push(note.clone());
        }
    }

    fn panel(
        feed: Arc<ScriptedFeed>,
        announcer: Arc<RecordingAnnouncer>,
        desktop: Arc<RecordingDesktop>,
    ) -> NotificationPanel {
        NotificationPanel::new(feed, announcer, desktop)
    }

    // -- baseline seeding ----------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn first_poll_seeds_baseline_without_desktop_notes() {
        let feed = ScriptedFeed::with_snapshots(vec![vec![
            notif("a", "existing", STATUS_UNREAD, 0),
        ]]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Granted);
        let mut panel = panel(feed, announcer, Arc::clone(&desktop));

        panel.poll().await;
        assert_eq!(panel.notifications().len(), 1);
        assert!(desktop.shown.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn second_poll_notifies_only_unseen_ids() {
        let feed = ScriptedFeed::with_snapshots(vec![
            vec![notif("a", "existing", STATUS_UNREAD, 0)],
            vec![
                notif("b", "fresh", STATUS_UNREAD, 10),
                notif("a", "existing", STATUS_UNREAD, 0),
            ],
        ]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Granted);
        let mut panel = panel(feed, announcer, Arc::clone(&desktop));

        panel.poll().await;
        panel.poll().await;

        let shown = desktop.shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].body, "fresh");
        assert_eq!(shown[0].tag, NOTIFICATION_TAG);
    }

    #[tokio::test(start_paused = true)]
    async fn new_but_already_read_id_is_not_announced() {
        let feed = ScriptedFeed::with_snapshots(vec![
            vec![],
            vec![notif("a", "read elsewhere", STATUS_READ, 0)],
        ]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Granted);
        let mut panel = panel(feed, announcer, Arc::clone(&desktop));

        panel.poll().await;
        panel.poll().await;
        assert!(desktop.shown.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reordered_snapshot_is_not_new() {
        let feed = ScriptedFeed::with_snapshots(vec![
            vec![
                notif("a", "x", STATUS_UNREAD, 0),
                notif("b", "y", STATUS_UNREAD, 1),
            ],
            vec![
                notif("b", "y", STATUS_UNREAD, 1),
                notif("a", "x", STATUS_UNREAD, 0),
            ],
        ]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Granted);
        let mut panel = panel(feed, announcer, Arc::clone(&desktop));

        panel.poll().await;
        panel.poll().await;
        assert!(desktop.shown.lock().unwrap().is_empty());
    }

    // -- permission gating ---------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn denied_permission_suppresses_notes_without_asking() {
        let feed = ScriptedFeed::with_snapshots(vec![
            vec![],
            vec![notif("a", "fresh", STATUS_UNREAD, 0)],
        ]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Denied);
        let mut panel = panel(feed, announcer, Arc::clone(&desktop));

        panel.poll().await;
        panel.poll().await;
        assert!(desktop.shown.lock().unwrap().is_empty());
        assert_eq!(*desktop.requests.lock().unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn undecided_permission_skips_notes_without_prompting() {
        let feed = ScriptedFeed::with_snapshots(vec![
            vec![],
            vec![notif("a", "fresh", STATUS_UNREAD, 0)],
        ]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Default);
        let mut panel = panel(feed, announcer, Arc::clone(&desktop));

        panel.poll().await;
        panel.poll().await;
        // The poll path never raises a permission prompt.
        assert_eq!(*desktop.requests.lock().unwrap(), 0);
        assert!(desktop.shown.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_opt_in_prompts_once_then_notes_flow() {
        let feed = ScriptedFeed::with_snapshots(vec![
            vec![],
            vec![notif("a", "fresh", STATUS_UNREAD, 0)],
        ]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::granting_on_request();
        let mut panel = panel(feed, announcer, Arc::clone(&desktop));

        panel.poll().await;
        assert_eq!(panel.request_desktop_permission(), Permission::Granted);
        assert_eq!(*desktop.requests.lock().unwrap(), 1);

        panel.poll().await;
        assert_eq!(desktop.shown.lock().unwrap().len(), 1);

        // A second opt-in on a decided permission does not re-prompt.
        panel.request_desktop_permission();
        assert_eq!(*desktop.requests.lock().unwrap(), 1);
    }

    // -- title announcements -------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn unread_snapshot_announces_then_reverts_title() {
        let feed = ScriptedFeed::with_snapshots(vec![vec![
            notif("a", "You have a new follower", STATUS_UNREAD, 0),
        ]]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Granted);
        let mut panel = panel(feed, Arc::clone(&announcer), desktop);

        panel.poll().await;
        {
            let calls = announcer.calls.lock().unwrap();
            assert_eq!(
                calls.as_slice(),
                ["announce:(1) You have a new follower - UTE Zone Admin"]
            );
        }

        // Paused clock: sleeping past the revert delay runs the spawned task.
        tokio::time::sleep(TITLE_REVERT_AFTER + Duration::from_secs(1)).await;
        let calls = announcer.calls.lock().unwrap();
        assert_eq!(calls.last().map(String::as_str), Some("restore"));
    }

    #[tokio::test(start_paused = true)]
    async fn all_read_snapshot_restores_title() {
        let feed = ScriptedFeed::with_snapshots(vec![vec![
            notif("a", "seen it", STATUS_READ, 0),
        ]]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Granted);
        let mut panel = panel(feed, Arc::clone(&announcer), desktop);

        panel.poll().await;
        let calls = announcer.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["restore"]);
    }

    // -- mutations -----------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn mutation_replaces_snapshot_wholesale_without_notes() {
        let feed = ScriptedFeed::with_snapshots(vec![vec![
            notif("a", "x", STATUS_UNREAD, 0),
            notif("b", "y", STATUS_UNREAD, 1),
        ]]);
        *feed.mutation_reply.lock().unwrap() = Some(vec![
            notif("a", "x", STATUS_READ, 0),
            notif("b", "y", STATUS_UNREAD, 1),
        ]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Granted);
        let mut panel = panel(Arc::clone(&feed), announcer, Arc::clone(&desktop));

        panel.poll().await;
        panel.mark_read(&"a".to_string()).await;

        assert_eq!(panel.notifications()[0].status, STATUS_READ);
        assert!(desktop.shown.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn delete_all_empties_snapshot_and_restores_title() {
        let feed = ScriptedFeed::with_snapshots(vec![vec![
            notif("a", "x", STATUS_UNREAD, 0),
        ]]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Granted);
        let mut panel = panel(feed, Arc::clone(&announcer), desktop);

        panel.poll().await;
        panel.delete_all().await;

        assert!(panel.notifications().is_empty());
        let calls = announcer.calls.lock().unwrap();
        assert_eq!(calls.last().map(String::as_str), Some("restore"));
    }

    // -- tabs ----------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn visible_follows_the_selected_tab() {
        let feed = ScriptedFeed::with_snapshots(vec![vec![
            notif("a", "x", STATUS_UNREAD, 0),
            notif("b", "y", STATUS_READ, 1),
        ]]);
        let announcer = Arc::new(RecordingAnnouncer::default());
        let desktop = RecordingDesktop::with_permission(Permission::Granted);
        let mut panel = panel(feed, announcer, desktop);

        panel.poll().await;
        panel.set_tab(Tab::Unread);
        assert_eq!(panel.visible().len(), 1);
        panel.set_tab(Tab::All);
        assert_eq!(panel.visible().len(), 2);
    }
}
