//! Driven port for the signed-in user's profile.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{ProfileUpdate, User};

/// Port for reading and updating the current user's profile.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch the profile bound to the current session.
    async fn current_profile(&self) -> Result<User, ServiceError>;

    /// Apply a partial profile update and return the stored profile.
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ServiceError>;
}
