//! Profile tab panels.

use std::fmt;
use std::sync::Arc;

use crate::domain::ports::{
    BookingService, CourseService, DashboardService, PaymentService, Toast, Toaster, UserService,
};
use crate::domain::{
    DashboardPeriod, DashboardSummary, EnrolledCourse, Error, MentorId, ProfileUpdate, Purchase,
    User,
};
use crate::views::load_state::LoadState;
use crate::views::settle_reported;
use crate::views::toast::report;

fn write_pending<T>(f: &mut fmt::Formatter<'_>, state: &LoadState<T>, what: &str) -> fmt::Result {
    match state {
        LoadState::Idle | LoadState::Loading => writeln!(f, "  loading..."),
        LoadState::Failed(error) => writeln!(f, "  Could not load {what}: {error}"),
        LoadState::Loaded(_) => Ok(()),
    }
}

/// Learning statistics for one period.
pub struct DashboardPanel {
    service: Arc<dyn DashboardService>,
    toaster: Arc<dyn Toaster>,
    period: DashboardPeriod,
    state: LoadState<DashboardSummary>,
}

impl DashboardPanel {
    /// Build an idle panel on the default period.
    pub fn new(service: Arc<dyn DashboardService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            period: DashboardPeriod::default(),
            state: LoadState::Idle,
        }
    }

    /// Reporting window in use.
    pub fn period(&self) -> DashboardPeriod {
        self.period
    }

    /// Change the reporting window. The next `load` uses it.
    pub fn set_period(&mut self, period: DashboardPeriod) {
        if self.period != period {
            self.period = period;
            self.state = LoadState::Idle;
        }
    }

    /// Summary for the current period.
    pub fn state(&self) -> &LoadState<DashboardSummary> {
        &self.state
    }

    /// Fetch the summary for the current period.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = self.service.summary(self.period).await;
        self.state = settle_reported(self.toaster.as_ref(), result);
    }
}

impl fmt::Display for DashboardPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard ({})", self.period)?;
        write_pending(f, &self.state, "dashboard")?;
        if let Some(summary) = self.state.loaded() {
            writeln!(f, "  Enrolled courses:  {}", summary.enrolled_courses)?;
            writeln!(f, "  Completed courses: {}", summary.completed_courses)?;
            writeln!(f, "  Hours learned:     {:.1}", summary.hours_learned)?;
            writeln!(f, "  Sessions booked:   {}", summary.sessions_booked)?;
        }
        Ok(())
    }
}

/// Courses the user is enrolled in.
pub struct EnrolledCoursesPanel {
    service: Arc<dyn CourseService>,
    toaster: Arc<dyn Toaster>,
    state: LoadState<Vec<EnrolledCourse>>,
}

impl EnrolledCoursesPanel {
    /// Build an idle panel.
    pub fn new(service: Arc<dyn CourseService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            state: LoadState::Idle,
        }
    }

    /// Enrolled courses.
    pub fn state(&self) -> &LoadState<Vec<EnrolledCourse>> {
        &self.state
    }

    /// Fetch enrolments, toasting on failure.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = self.service.enrolled_courses().await;
        self.state = settle_reported(self.toaster.as_ref(), result);
    }
}

impl fmt::Display for EnrolledCoursesPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "My courses")?;
        write_pending(f, &self.state, "courses")?;
        match self.state.loaded() {
            Some(courses) if courses.is_empty() => {
                writeln!(f, "  You are not enrolled in any course yet.")
            }
            Some(courses) => {
                for enrolled in courses {
                    writeln!(
                        f,
                        "  - {} {:>3}% ({}/{} lessons)",
                        enrolled.course.title,
                        enrolled.progress_percent,
                        enrolled.completed_lessons,
                        enrolled.total_lessons
                    )?;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// A mentor the user has booked, with the number of sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedMentor {
    /// Booked mentor.
    pub mentor_id: MentorId,
    /// Name from the first booking listed.
    pub mentor_name: String,
    /// Bookings with this mentor.
    pub sessions: usize,
}

/// Mentors derived from the user's bookings.
pub struct TeachersPanel {
    service: Arc<dyn BookingService>,
    toaster: Arc<dyn Toaster>,
    state: LoadState<Vec<BookedMentor>>,
}

impl TeachersPanel {
    /// Build an idle panel.
    pub fn new(service: Arc<dyn BookingService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            state: LoadState::Idle,
        }
    }

    /// Mentors grouped from bookings.
    pub fn state(&self) -> &LoadState<Vec<BookedMentor>> {
        &self.state
    }

    /// Load bookings and collapse them to one row per mentor, in order of
    /// first appearance.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = self.service.my_bookings().await.map(|bookings| {
            let mut mentors: Vec<BookedMentor> = Vec::new();
            for booking in bookings {
                match mentors
                    .iter_mut()
                    .find(|known| known.mentor_id == booking.mentor_id)
                {
                    Some(known) => known.sessions += 1,
                    None => mentors.push(BookedMentor {
                        mentor_id: booking.mentor_id,
                        mentor_name: booking.mentor_name,
                        sessions: 1,
                    }),
                }
            }
            mentors
        });
        self.state = settle_reported(self.toaster.as_ref(), result);
    }
}

impl fmt::Display for TeachersPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "My teachers")?;
        write_pending(f, &self.state, "teachers")?;
        match self.state.loaded() {
            Some(mentors) if mentors.is_empty() => writeln!(f, "  No sessions booked yet."),
            Some(mentors) => {
                for mentor in mentors {
                    let plural = if mentor.sessions == 1 { "" } else { "s" };
                    writeln!(
                        f,
                        "  - {} [{}] {} session{plural}",
                        mentor.mentor_name, mentor.mentor_id, mentor.sessions
                    )?;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Messages tab. Messaging has no backend yet, so the panel is static.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagesPanel;

impl fmt::Display for MessagesPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Messages")?;
        writeln!(f, "  No messages yet.")
    }
}

/// Completed purchases.
pub struct PurchaseHistoryPanel {
    service: Arc<dyn PaymentService>,
    toaster: Arc<dyn Toaster>,
    state: LoadState<Vec<Purchase>>,
}

impl PurchaseHistoryPanel {
    /// Build an idle panel.
    pub fn new(service: Arc<dyn PaymentService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            state: LoadState::Idle,
        }
    }

    /// Purchases in server order.
    pub fn state(&self) -> &LoadState<Vec<Purchase>> {
        &self.state
    }

    /// Fetch purchase history, toasting on failure.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = self.service.purchase_history().await;
        self.state = settle_reported(self.toaster.as_ref(), result);
    }
}

impl fmt::Display for PurchaseHistoryPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Purchase history")?;
        write_pending(f, &self.state, "purchases")?;
        match self.state.loaded() {
            Some(purchases) if purchases.is_empty() => writeln!(f, "  No purchases yet."),
            Some(purchases) => {
                for purchase in purchases {
                    writeln!(
                        f,
                        "  - {} {:.2} {} on {}",
                        purchase.course_title,
                        purchase.amount,
                        purchase.currency.to_ascii_uppercase(),
                        purchase.purchased_at.format("%Y-%m-%d")
                    )?;
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// Profile settings form.
pub struct SettingsPanel {
    service: Arc<dyn UserService>,
    toaster: Arc<dyn Toaster>,
    profile: LoadState<User>,
    draft: ProfileUpdate,
}

impl SettingsPanel {
    /// Build the form with an empty draft.
    pub fn new(service: Arc<dyn UserService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            profile: LoadState::Idle,
            draft: ProfileUpdate::default(),
        }
    }

    /// Profile as last loaded or saved.
    pub fn profile(&self) -> &LoadState<User> {
        &self.profile
    }

    /// Pending edits, submitted by [`SettingsPanel::submit`].
    pub fn draft_mut(&mut self) -> &mut ProfileUpdate {
        &mut self.draft
    }

    /// Fetch the current profile.
    pub async fn load(&mut self) {
        self.profile = LoadState::Loading;
        let result = self.service.current_profile().await;
        self.profile = settle_reported(self.toaster.as_ref(), result);
    }

    /// Validate and submit the draft.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` without calling the API when the draft is
    /// empty or malformed, or the toasted port error when the update fails.
    /// The draft is kept on failure.
    pub async fn submit(&mut self) -> Result<&User, Error> {
        self.draft
            .validate()
            .map_err(|error| report(self.toaster.as_ref(), error))?;
        let user = self
            .service
            .update_profile(&self.draft)
            .await
            .map_err(|error| report(self.toaster.as_ref(), error.into()))?;
        self.draft = ProfileUpdate::default();
        self.toaster.show(Toast::success("Profile updated"));
        self.profile = LoadState::Loaded(user);
        self.profile
            .loaded()
            .ok_or_else(|| Error::internal("profile missing after update"))
    }
}

impl fmt::Display for SettingsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Settings")?;
        write_pending(f, &self.profile, "profile")?;
        if let Some(user) = self.profile.loaded() {
            writeln!(f, "  Name:   {}", user.name)?;
            writeln!(f, "  Email:  {}", user.email)?;
            writeln!(f, "  Role:   {}", user.role.as_str())?;
            writeln!(f, "  Bio:    {}", user.bio.as_deref().unwrap_or("-"))?;
            let skills = if user.skills.is_empty() {
                "-".to_owned()
            } else {
                user.skills.join(", ")
            };
            writeln!(f, "  Skills: {skills}")?;
        }
        Ok(())
    }
}
