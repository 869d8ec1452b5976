//! Notification feed adapter.

use async_trait::async_trait;

use super::ApiClient;
use super::dto::NotificationDto;
use crate::domain::Notification;
use crate::domain::ports::{NotificationService, ServiceError};

/// `NotificationService` over `/api/notifications`.
#[derive(Debug, Clone)]
pub struct HttpNotificationService {
    api: ApiClient,
}

impl HttpNotificationService {
    /// Build the adapter over a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl NotificationService for HttpNotificationService {
    async fn notifications(&self) -> Result<Vec<Notification>, ServiceError> {
        let dtos: Vec<NotificationDto> = self.api.get_json("/api/notifications", &[]).await?;
        Ok(dtos.into_iter().map(NotificationDto::into_domain).collect())
    }
}
