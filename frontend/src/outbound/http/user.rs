//! Profile and dashboard adapters.

use async_trait::async_trait;
use reqwest::Method;

use super::ApiClient;
use super::dto::{DashboardDto, ProfileUpdateBody, UserDto};
use crate::domain::ports::{DashboardService, ServiceError, UserService};
use crate::domain::{DashboardPeriod, DashboardSummary, ProfileUpdate, User};

const PROFILE_PATH: &str = "/api/user/profile";
const DASHBOARD_PATH: &str = "/api/dashboard/user";

/// `UserService` over `/api/user/profile`.
#[derive(Debug, Clone)]
pub struct HttpUserService {
    api: ApiClient,
}

impl HttpUserService {
    /// Wrap a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl UserService for HttpUserService {
    async fn current_profile(&self) -> Result<User, ServiceError> {
        let dto: UserDto = self.api.get_json(PROFILE_PATH, &[]).await?;
        dto.into_domain().map_err(ServiceError::decode)
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ServiceError> {
        let dto: UserDto = self
            .api
            .send_json(Method::PUT, PROFILE_PATH, &ProfileUpdateBody::from(update))
            .await?;
        dto.into_domain().map_err(ServiceError::decode)
    }
}

/// `DashboardService` over `/api/dashboard/user`.
#[derive(Debug, Clone)]
pub struct HttpDashboardService {
    api: ApiClient,
}

impl HttpDashboardService {
    /// Wrap a shared API client.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DashboardService for HttpDashboardService {
    async fn summary(&self, period: DashboardPeriod) -> Result<DashboardSummary, ServiceError> {
        let dto: DashboardDto = self
            .api
            .get_json(DASHBOARD_PATH, &[("period", period.as_str())])
            .await?;
        dto.into_domain(period).map_err(ServiceError::decode)
    }
}
