//! Driven port for administrative moderation.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{
    AccountStatus, ApplicationDecision, ApplicationId, Mentor, MentorApplication, MentorId, User,
    UserId,
};

/// Port for admin-only user, mentor, and application moderation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Every user on the platform.
    async fn all_users(&self) -> Result<Vec<User>, ServiceError>;

    /// Set a user's status and return the updated record.
    async fn set_user_status(
        &self,
        user_id: &UserId,
        status: AccountStatus,
    ) -> Result<User, ServiceError>;

    /// Every mentor on the platform.
    async fn all_mentors(&self) -> Result<Vec<Mentor>, ServiceError>;

    /// Set a mentor's status and return the updated record.
    async fn set_mentor_status(
        &self,
        mentor_id: &MentorId,
        status: AccountStatus,
    ) -> Result<Mentor, ServiceError>;

    /// Mentor applications awaiting or past review.
    async fn mentor_applications(&self) -> Result<Vec<MentorApplication>, ServiceError>;

    /// Approve or reject an application and return the updated record.
    async fn review_application(
        &self,
        application_id: &ApplicationId,
        decision: ApplicationDecision,
    ) -> Result<MentorApplication, ServiceError>;
}
