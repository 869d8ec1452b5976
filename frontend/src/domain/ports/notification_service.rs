//! Driven port for the current user's notifications.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::Notification;

/// Port for bulk notification fetches.
///
/// There is no read-acknowledgement call; read state is tracked client-side.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Fetch every notification for the current user, in server order.
    async fn notifications(&self) -> Result<Vec<Notification>, ServiceError>;
}
