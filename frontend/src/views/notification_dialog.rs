//! Notification bell and dialog.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::debug;

use super::notification_store::NotificationStore;
use crate::domain::NotificationId;

/// One rendered notification row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationRow {
    /// Record identifier.
    pub id: NotificationId,
    /// Text shown to the user.
    pub message: String,
    /// Relative age such as `5m ago`.
    pub age: String,
    /// Only unread rows react to clicks.
    pub clickable: bool,
}

/// Dialog body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogBody {
    /// Nothing held yet and a fetch is in flight.
    Loading,
    /// Nothing held and nothing loading.
    Empty,
    /// One row per held record.
    Rows(Vec<NotificationRow>),
}

/// Bell badge plus dialog over a shared [`NotificationStore`].
pub struct NotificationDialog {
    store: Arc<NotificationStore>,
    clock: Arc<dyn Clock>,
    open: bool,
}

impl NotificationDialog {
    /// Build a closed dialog over a shared store.
    pub fn new(store: Arc<NotificationStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            open: false,
        }
    }

    /// Mount the bell; fetches only when the store holds nothing yet.
    ///
    /// Fetch failures are logged by the store and otherwise ignored here; the
    /// dialog keeps showing whatever it had.
    pub async fn mount(&self) {
        if self.store.select(|state| state.is_empty() && !state.loading) {
            if let Err(error) = self.store.fetch().await {
                debug!(error = %error, "mount fetch failed");
            }
        }
    }

    /// Show the dialog.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the dialog.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the dialog is showing.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Number of unread notifications, or `None` when nothing is unread.
    pub fn badge(&self) -> Option<usize> {
        let unread = self.store.select(|state| state.unread_count());
        (unread > 0).then_some(unread)
    }

    /// Render the dialog body from the current store state.
    pub fn body(&self) -> DialogBody {
        let now = self.clock.utc();
        self.store.select(|state| {
            if state.is_empty() {
                return if state.loading {
                    DialogBody::Loading
                } else {
                    DialogBody::Empty
                };
            }
            DialogBody::Rows(
                state
                    .notifications
                    .iter()
                    .map(|item| NotificationRow {
                        id: item.id.clone(),
                        message: item.message.clone(),
                        age: relative_age(item.timestamp, now),
                        clickable: !item.read,
                    })
                    .collect(),
            )
        })
    }

    /// Mark an unread row read. Returns whether anything changed.
    pub fn click(&self, id: &NotificationId) -> bool {
        let unread = self.store.select(|state| {
            state
                .notifications
                .iter()
                .any(|item| &item.id == id && !item.read)
        });
        if unread {
            self.store.mark_read(id);
        }
        unread
    }
}

fn relative_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(timestamp);
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        "just now".to_owned()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if elapsed.num_hours() < 24 {
        format!("{}h ago", elapsed.num_hours())
    } else {
        format!("{}d ago", elapsed.num_days())
    }
}

impl fmt::Display for NotificationDialog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.badge() {
            Some(unread) => writeln!(f, "Notifications ({unread} unread)")?,
            None => writeln!(f, "Notifications")?,
        }
        match self.body() {
            DialogBody::Loading => writeln!(f, "  loading..."),
            DialogBody::Empty => writeln!(f, "  No notifications yet."),
            DialogBody::Rows(rows) => {
                for row in rows {
                    let marker = if row.clickable { '*' } else { ' ' };
                    writeln!(f, "{marker} [{}] {} ({})", row.id, row.message, row.age)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{Local, TimeZone};
    use futures_util::FutureExt;
    use rstest::rstest;

    use super::*;
    use crate::domain::Notification;
    use crate::domain::ports::{MockNotificationService, NotificationService, ServiceError};
    use crate::views::notification_store::NotificationState;

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn notification(id: &str, minutes_ago: i64, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id).expect("valid id"),
            message: format!("message {id}"),
            timestamp: now() - chrono::TimeDelta::minutes(minutes_ago),
            read,
        }
    }

    fn dialog(service: MockNotificationService, seed: Vec<Notification>) -> NotificationDialog {
        let state = NotificationState {
            notifications: seed,
            loading: false,
        };
        let store = Arc::new(NotificationStore::with_state(Arc::new(service), state));
        NotificationDialog::new(store, Arc::new(FixtureClock { utc_now: now() }))
    }

    #[tokio::test]
    async fn mount_fetches_when_store_is_empty() {
        let mut service = MockNotificationService::new();
        service
            .expect_notifications()
            .times(1)
            .return_once(|| Ok(vec![notification("n1", 5, false)]));
        let dialog = dialog(service, Vec::new());

        dialog.mount().await;

        assert_eq!(dialog.badge(), Some(1));
    }

    #[tokio::test]
    async fn mount_skips_fetch_when_store_has_records() {
        let mut service = MockNotificationService::new();
        service.expect_notifications().times(0);
        let dialog = dialog(service, vec![notification("n1", 5, true)]);

        dialog.mount().await;

        assert_eq!(dialog.badge(), None);
    }

    #[tokio::test]
    async fn failed_mount_fetch_shows_empty_body() {
        let mut service = MockNotificationService::new();
        service
            .expect_notifications()
            .times(1)
            .return_once(|| Err(ServiceError::timeout("slow")));
        let dialog = dialog(service, Vec::new());

        dialog.mount().await;

        assert_eq!(dialog.body(), DialogBody::Empty);
    }

    /// Never answers its first call; later calls return an empty list.
    #[derive(Default)]
    struct StallsOnce {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NotificationService for StallsOnce {
        async fn notifications(&self) -> Result<Vec<Notification>, ServiceError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                std::future::pending::<()>().await;
            }
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn remount_after_abandoned_mount_refetches() {
        let service = Arc::new(StallsOnce::default());
        let store = Arc::new(NotificationStore::new(service.clone()));
        let clock: Arc<dyn Clock> = Arc::new(FixtureClock { utc_now: now() });
        let first = NotificationDialog::new(Arc::clone(&store), Arc::clone(&clock));
        let second = NotificationDialog::new(store, clock);

        assert!(first.mount().now_or_never().is_none());
        drop(first);
        second.mount().await;

        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
        assert_eq!(second.body(), DialogBody::Empty);
    }

    #[rstest]
    #[case::just_now(0, "just now")]
    #[case::minutes(5, "5m ago")]
    #[case::hours(150, "2h ago")]
    #[case::days(60 * 24 * 3, "3d ago")]
    fn renders_relative_ages(#[case] minutes_ago: i64, #[case] expected: &str) {
        let dialog = dialog(
            MockNotificationService::new(),
            vec![notification("n1", minutes_ago, false)],
        );
        let DialogBody::Rows(rows) = dialog.body() else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].age, expected);
    }

    #[test]
    fn click_marks_unread_rows_only() {
        let dialog = dialog(
            MockNotificationService::new(),
            vec![notification("a", 1, false), notification("b", 2, true)],
        );

        assert!(dialog.click(&NotificationId::new("a").expect("valid id")));
        assert!(!dialog.click(&NotificationId::new("b").expect("valid id")));
        assert_eq!(dialog.badge(), None);
    }

    #[test]
    fn open_and_close_toggle_visibility() {
        let mut dialog = dialog(MockNotificationService::new(), Vec::new());
        dialog.open();
        assert!(dialog.is_open());
        dialog.close();
        assert!(!dialog.is_open());
    }

    #[test]
    fn display_marks_unread_rows() {
        let dialog = dialog(
            MockNotificationService::new(),
            vec![notification("a", 5, false)],
        );
        assert_eq!(
            dialog.to_string(),
            "Notifications (1 unread)\n* [a] message a (5m ago)\n"
        );
    }
}
