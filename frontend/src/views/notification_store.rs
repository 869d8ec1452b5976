//! Session-scoped notification store.
//!
//! State lives in a `tokio::sync::watch` channel owned by one store instance.
//! Every mutation goes through [`reduce`], so the transition rules can be
//! tested without a runtime. Read state is client-side only; the API has no
//! acknowledgement call.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::ports::{NotificationService, ServiceError};
use crate::domain::{Notification, NotificationId};

/// Snapshot of the notification slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationState {
    /// Records in the order the last successful fetch returned them.
    pub notifications: Vec<Notification>,
    /// A fetch is in flight.
    pub loading: bool,
}

impl NotificationState {
    /// No records are held.
    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    /// Records not yet marked read.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|item| !item.read).count()
    }
}

/// Typed store actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationAction {
    /// A fetch went out.
    FetchStarted,
    /// The server's list arrived.
    Fetched(Vec<Notification>),
    /// The fetch errored or was abandoned.
    FetchFailed,
    /// Mark one record read.
    MarkRead(NotificationId),
}

/// Apply one action to a state snapshot.
///
/// `Fetched` replaces the list wholesale, with no merge against prior state.
/// `MarkRead` flips only the matching record and ignores unknown ids.
pub fn reduce(mut state: NotificationState, action: NotificationAction) -> NotificationState {
    match action {
        NotificationAction::FetchStarted => state.loading = true,
        NotificationAction::Fetched(notifications) => {
            state.notifications = notifications;
            state.loading = false;
        }
        NotificationAction::FetchFailed => state.loading = false,
        NotificationAction::MarkRead(id) => {
            if let Some(record) = state.notifications.iter_mut().find(|item| item.id == id) {
                record.read = true;
            }
        }
    }
    state
}

/// Injected notification store.
pub struct NotificationStore {
    service: Arc<dyn NotificationService>,
    state: watch::Sender<NotificationState>,
}

impl NotificationStore {
    /// Build an empty store over the given port.
    pub fn new(service: Arc<dyn NotificationService>) -> Self {
        Self::with_state(service, NotificationState::default())
    }

    /// Build a store seeded with an existing snapshot.
    pub fn with_state(service: Arc<dyn NotificationService>, initial: NotificationState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { service, state }
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<NotificationState> {
        self.state.subscribe()
    }

    /// Read a projection of the current state.
    pub fn select<R>(&self, selector: impl FnOnce(&NotificationState) -> R) -> R {
        selector(&self.state.borrow())
    }

    /// Clone the whole current state.
    pub fn snapshot(&self) -> NotificationState {
        self.select(Clone::clone)
    }

    /// Apply an action, notifying subscribers only when the state changed.
    pub fn dispatch(&self, action: NotificationAction) {
        self.state.send_if_modified(|state| {
            let next = reduce(state.clone(), action);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
    }

    /// Replace the list with the server's.
    ///
    /// Dropping the future mid-flight clears `loading` as a failure would.
    ///
    /// # Errors
    ///
    /// Returns the port error unchanged. The stored list is left untouched on
    /// failure.
    pub async fn fetch(&self) -> Result<(), ServiceError> {
        self.dispatch(NotificationAction::FetchStarted);
        let mut pending = PendingFetch {
            store: self,
            armed: true,
        };
        let outcome = self.service.notifications().await;
        pending.armed = false;
        match outcome {
            Ok(notifications) => {
                debug!(count = notifications.len(), "notifications fetched");
                self.dispatch(NotificationAction::Fetched(notifications));
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "notification fetch failed");
                self.dispatch(NotificationAction::FetchFailed);
                Err(error)
            }
        }
    }

    /// Mark one record read locally.
    pub fn mark_read(&self, id: &NotificationId) {
        self.dispatch(NotificationAction::MarkRead(id.clone()));
    }
}

/// Clears `loading` when a fetch future is dropped before the port answers.
struct PendingFetch<'a> {
    store: &'a NotificationStore,
    armed: bool,
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!("notification fetch abandoned");
            self.store.dispatch(NotificationAction::FetchFailed);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use futures_util::FutureExt;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::MockNotificationService;

    fn notification(id: &str, read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id).expect("valid id"),
            message: format!("message {id}"),
            timestamp: Utc
                .with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
                .single()
                .expect("valid timestamp"),
            read,
        }
    }

    #[fixture]
    fn seeded() -> NotificationState {
        NotificationState {
            notifications: vec![
                notification("a", false),
                notification("b", false),
                notification("c", true),
            ],
            loading: false,
        }
    }

    fn id(raw: &str) -> NotificationId {
        NotificationId::new(raw).expect("valid id")
    }

    #[rstest]
    fn mark_read_flips_only_the_target(seeded: NotificationState) {
        let next = reduce(seeded.clone(), NotificationAction::MarkRead(id("b")));

        assert!(next.notifications[1].read);
        assert_eq!(next.notifications[0], seeded.notifications[0]);
        assert_eq!(next.notifications[2], seeded.notifications[2]);
        assert_eq!(next.notifications[1].message, seeded.notifications[1].message);
    }

    #[rstest]
    fn mark_read_ignores_unknown_ids(seeded: NotificationState) {
        let next = reduce(seeded.clone(), NotificationAction::MarkRead(id("zzz")));
        assert_eq!(next, seeded);
    }

    #[rstest]
    fn fetched_replaces_without_merging(seeded: NotificationState) {
        let server = vec![notification("z", false), notification("a", true)];
        let next = reduce(seeded, NotificationAction::Fetched(server.clone()));
        assert_eq!(next.notifications, server);
        assert!(!next.loading);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_fetch_leaves_state_untouched(seeded: NotificationState) {
        let mut service = MockNotificationService::new();
        service
            .expect_notifications()
            .times(1)
            .return_once(|| Err(ServiceError::transport("connection reset")));
        let store = NotificationStore::with_state(Arc::new(service), seeded.clone());

        let result = store.fetch().await;

        assert_eq!(result, Err(ServiceError::transport("connection reset")));
        assert_eq!(store.snapshot(), seeded);
    }

    #[tokio::test]
    async fn successful_fetch_publishes_to_subscribers() {
        let server = vec![notification("n2", false), notification("n1", true)];
        let expected = server.clone();
        let mut service = MockNotificationService::new();
        service
            .expect_notifications()
            .times(1)
            .return_once(move || Ok(server));
        let store = NotificationStore::new(Arc::new(service));
        let mut receiver = store.subscribe();

        store.fetch().await.expect("fetch succeeds");

        assert!(receiver.has_changed().expect("sender alive"));
        assert_eq!(receiver.borrow_and_update().notifications, expected);
        assert_eq!(store.select(NotificationState::unread_count), 1);
    }

    #[rstest]
    fn no_op_mark_read_does_not_notify(seeded: NotificationState) {
        let store = NotificationStore::with_state(Arc::new(MockNotificationService::new()), seeded);
        let receiver = store.subscribe();

        store.mark_read(&id("c"));

        assert!(!receiver.has_changed().expect("sender alive"));
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

    #[test]
    fn dropped_fetch_clears_loading() {
        let store = NotificationStore::new(Arc::new(StallsOnce::default()));

        {
            let fetch = store.fetch();
            futures_util::pin_mut!(fetch);
            assert!(fetch.as_mut().now_or_never().is_none());
            assert!(store.select(|state| state.loading));
        }

        assert!(!store.select(|state| state.loading));
    }

    #[tokio::test]
    async fn fetch_after_abandoned_fetch_completes() {
        let service = Arc::new(StallsOnce::default());
        let store = NotificationStore::new(service.clone());

        assert!(store.fetch().now_or_never().is_none());
        store.fetch().await.expect("second fetch succeeds");

        assert_eq!(service.calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.snapshot(), NotificationState::default());
    }
}
