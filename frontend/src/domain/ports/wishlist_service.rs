//! Driven port for the per-user wishlist.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{CourseId, Wishlist};

/// Port for wishlist reads and mutations.
///
/// Mutations return nothing; callers refetch the whole list afterwards.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Fetch the current user's wishlist. A missing wishlist surfaces as
    /// [`ServiceError::NotFound`].
    async fn wishlist(&self) -> Result<Wishlist, ServiceError>;

    /// Save a course to the wishlist.
    async fn add(&self, course_id: &CourseId) -> Result<(), ServiceError>;

    /// Remove a course from the wishlist.
    async fn remove(&self, course_id: &CourseId) -> Result<(), ServiceError>;
}
