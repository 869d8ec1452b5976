//! Driven port for mentor discovery and availability.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{Availability, Mentor, MentorId};

/// Port for mentor reads and the signed-in mentor's availability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MentorService: Send + Sync {
    /// Highlighted mentors for the home page.
    async fn top_mentors(&self) -> Result<Vec<Mentor>, ServiceError>;

    /// Look up one mentor.
    async fn mentor(&self, mentor_id: &MentorId) -> Result<Mentor, ServiceError>;

    /// Fetch the signed-in mentor's weekly availability.
    async fn availability(&self) -> Result<Availability, ServiceError>;

    /// Replace the signed-in mentor's availability and return the stored copy.
    async fn update_availability(
        &self,
        availability: &Availability,
    ) -> Result<Availability, ServiceError>;
}
