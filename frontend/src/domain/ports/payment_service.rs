//! Driven port for course payments.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{CheckoutSession, CourseId, Purchase};

/// Port for checkout creation and purchase history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Create a hosted checkout session for one course.
    async fn create_checkout_session(
        &self,
        course_id: &CourseId,
    ) -> Result<CheckoutSession, ServiceError>;

    /// Completed purchases of the current user, newest first as returned.
    async fn purchase_history(&self) -> Result<Vec<Purchase>, ServiceError>;
}
