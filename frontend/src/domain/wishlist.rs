//! Per-user saved-for-later course references.

use super::CourseId;

/// Ordered list of wishlisted course identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wishlist {
    /// Saved courses, in server order.
    pub course_ids: Vec<CourseId>,
}

impl Wishlist {
    /// An empty wishlist, used when the backend reports none exists.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return whether the course is saved.
    pub fn contains(&self, course_id: &CourseId) -> bool {
        self.course_ids.contains(course_id)
    }

    /// Return whether no course is saved.
    pub fn is_empty(&self) -> bool {
        self.course_ids.is_empty()
    }
}
