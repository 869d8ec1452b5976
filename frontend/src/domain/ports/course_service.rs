//! Driven port for the course catalogue and enrolments.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{Course, CourseId, EnrolledCourse};

/// Port for catalogue reads and enrolment side effects.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseService: Send + Sync {
    /// Highlighted courses for the home page.
    async fn top_courses(&self) -> Result<Vec<Course>, ServiceError>;

    /// Courses the current user is enrolled in, with progress.
    async fn enrolled_courses(&self) -> Result<Vec<EnrolledCourse>, ServiceError>;

    /// Fetch one course.
    async fn course(&self, course_id: &CourseId) -> Result<Course, ServiceError>;

    /// Enrol the current user in a free course.
    async fn enroll(&self, course_id: &CourseId) -> Result<(), ServiceError>;
}
