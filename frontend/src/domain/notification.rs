//! Notification records.

use chrono::{DateTime, Utc};

use super::NotificationId;

/// A server-issued message with read/unread state.
///
/// Records are created by the backend, fetched in bulk, and only ever moved
/// from unread to read on the client. They are never deleted client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Backend identifier.
    pub id: NotificationId,
    /// Text shown to the user.
    pub message: String,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Whether the user has seen it.
    pub read: bool,
}
