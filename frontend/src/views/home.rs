//! Landing page.

use std::fmt;
use std::sync::Arc;

use futures_util::future::join;

use super::load_state::LoadState;
use super::settle_reported;
use crate::domain::ports::{CourseService, MentorService, Toaster};
use crate::domain::{Course, Mentor};

const HERO: &str = "Codefolio: learn from industry mentors, one course at a time.";
const FEATURES: [&str; 3] = [
    "Project-based courses",
    "1:1 mentor sessions",
    "Track your progress",
];

/// Home page with independently loaded mentor and course sections.
pub struct HomePage {
    mentors_service: Arc<dyn MentorService>,
    courses_service: Arc<dyn CourseService>,
    toaster: Arc<dyn Toaster>,
    mentors: LoadState<Vec<Mentor>>,
    courses: LoadState<Vec<Course>>,
}

impl HomePage {
    /// Build the page with both sections idle.
    pub fn new(
        mentors_service: Arc<dyn MentorService>,
        courses_service: Arc<dyn CourseService>,
        toaster: Arc<dyn Toaster>,
    ) -> Self {
        Self {
            mentors_service,
            courses_service,
            toaster,
            mentors: LoadState::Idle,
            courses: LoadState::Idle,
        }
    }

    /// Top mentors section.
    pub fn mentors(&self) -> &LoadState<Vec<Mentor>> {
        &self.mentors
    }

    /// Top courses section.
    pub fn courses(&self) -> &LoadState<Vec<Course>> {
        &self.courses
    }

    /// Load both sections concurrently. One failing section does not affect
    /// the other.
    pub async fn load(&mut self) {
        self.mentors = LoadState::Loading;
        self.courses = LoadState::Loading;
        let (mentors, courses) = join(
            self.mentors_service.top_mentors(),
            self.courses_service.top_courses(),
        )
        .await;
        self.mentors = settle_reported(self.toaster.as_ref(), mentors);
        self.courses = settle_reported(self.toaster.as_ref(), courses);
    }
}

impl fmt::Display for HomePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{HERO}")?;
        writeln!(f, "{}", FEATURES.join(" · "))?;
        writeln!(f)?;
        writeln!(f, "Top mentors")?;
        match &self.mentors {
            LoadState::Idle | LoadState::Loading => writeln!(f, "  loading...")?,
            LoadState::Failed(error) => writeln!(f, "  Could not load mentors: {error}")?,
            LoadState::Loaded(mentors) if mentors.is_empty() => {
                writeln!(f, "  No mentors to show yet.")?;
            }
            LoadState::Loaded(mentors) => {
                for mentor in mentors {
                    writeln!(f, "  - {} [{}] {}", mentor.name, mentor.id, mentor.headline())?;
                }
            }
        }
        writeln!(f)?;
        writeln!(f, "Top courses")?;
        match &self.courses {
            LoadState::Idle | LoadState::Loading => writeln!(f, "  loading..."),
            LoadState::Failed(error) => writeln!(f, "  Could not load courses: {error}"),
            LoadState::Loaded(courses) if courses.is_empty() => {
                writeln!(f, "  No courses to show yet.")
            }
            LoadState::Loaded(courses) => {
                for course in courses {
                    let price = if course.is_free() {
                        "free".to_owned()
                    } else {
                        format!("${:.2}", course.price)
                    };
                    writeln!(f, "  - {} [{}] {price}", course.title, course.id)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockCourseService, MockMentorService, ServiceError};
    use crate::domain::{AccountStatus, CourseId, MentorId};
    use crate::views::ToastQueue;

    fn course() -> Course {
        Course {
            id: CourseId::new("c1").expect("valid id"),
            title: "Rust in Practice".to_owned(),
            description: None,
            instructor: None,
            price: 0.0,
            rating: None,
            enrolled_count: 12,
            thumbnail: None,
        }
    }

    #[tokio::test]
    async fn one_failing_section_leaves_the_other_loaded() {
        let mut mentors = MockMentorService::new();
        mentors
            .expect_top_mentors()
            .return_once(|| Err(ServiceError::server(502_u16, "bad gateway")));
        let mut courses = MockCourseService::new();
        courses.expect_top_courses().return_once(|| Ok(vec![course()]));
        let toasts = Arc::new(ToastQueue::new());
        let mut page = HomePage::new(Arc::new(mentors), Arc::new(courses), toasts.clone());

        page.load().await;

        assert!(page.mentors().error().is_some());
        assert_eq!(page.courses().loaded().map(Vec::len), Some(1));
        assert_eq!(toasts.len(), 1);
        let rendered = page.to_string();
        assert!(rendered.contains("Could not load mentors: bad gateway"));
        assert!(rendered.contains("- Rust in Practice [c1] free"));
    }

    #[tokio::test]
    async fn empty_sections_render_empty_messages() {
        let mut mentors = MockMentorService::new();
        mentors.expect_top_mentors().return_once(|| Ok(Vec::new()));
        let mut courses = MockCourseService::new();
        courses.expect_top_courses().return_once(|| Ok(Vec::new()));
        let mut page = HomePage::new(
            Arc::new(mentors),
            Arc::new(courses),
            Arc::new(ToastQueue::new()),
        );

        page.load().await;

        let rendered = page.to_string();
        assert!(rendered.contains("No mentors to show yet."));
        assert!(rendered.contains("No courses to show yet."));
    }

    #[test]
    fn mentor_rows_use_headline() {
        let mentor = Mentor {
            id: MentorId::new("m1").expect("valid id"),
            name: "Lin".to_owned(),
            email: None,
            avatar: None,
            experience_years: 8,
            company: Some("Ferrous".to_owned()),
            job_title: Some("Staff Engineer".to_owned()),
            skills: Vec::new(),
            rating: None,
            hourly_rate: None,
            status: AccountStatus::Active,
        };
        let mut page = HomePage::new(
            Arc::new(MockMentorService::new()),
            Arc::new(MockCourseService::new()),
            Arc::new(ToastQueue::new()),
        );
        page.mentors = LoadState::Loaded(vec![mentor]);
        assert!(page.to_string().contains("- Lin [m1] Staff Engineer at Ferrous"));
    }
}
