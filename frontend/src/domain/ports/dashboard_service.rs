//! Driven port for learner dashboard statistics.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{DashboardPeriod, DashboardSummary};

/// Port for fetching dashboard aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardService: Send + Sync {
    /// Fetch the summary for one reporting period.
    async fn summary(&self, period: DashboardPeriod) -> Result<DashboardSummary, ServiceError>;
}
