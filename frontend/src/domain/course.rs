//! Catalogue and enrolment records.

use super::CourseId;

/// A catalogue course.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    /// Backend identifier.
    pub id: CourseId,
    /// Catalogue title.
    pub title: String,
    /// Long description.
    pub description: Option<String>,
    /// Instructor display name.
    pub instructor: Option<String>,
    /// Price in the catalogue currency; zero means free.
    pub price: f64,
    /// Average learner rating.
    pub rating: Option<f32>,
    /// Number of enrolled learners.
    pub enrolled_count: u64,
    /// Cover image URL.
    pub thumbnail: Option<String>,
}

impl Course {
    /// Return whether the course can be enrolled without checkout.
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }
}

/// A course the current user is enrolled in, with progress metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrolledCourse {
    /// The enrolled course.
    pub course: Course,
    /// Completion percentage clamped to `0..=100`.
    pub progress_percent: u8,
    /// Lessons finished so far.
    pub completed_lessons: u32,
    /// Lessons in the course.
    pub total_lessons: u32,
}

impl EnrolledCourse {
    /// Return whether every lesson has been completed.
    pub fn is_complete(&self) -> bool {
        self.progress_percent >= 100
    }
}
