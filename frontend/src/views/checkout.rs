//! Course checkout.

use std::sync::Arc;

use tracing::info;

use super::toast::report;
use crate::domain::ports::{CourseService, PaymentService, Toast, Toaster};
use crate::domain::{CheckoutSession, Course, CourseId, Error};

/// What happened when the user asked to buy a course.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Free course: enrolled directly, no payment.
    Enrolled {
        /// Course now enrolled in.
        course: Course,
    },
    /// Paid course: continue on the hosted payment page.
    Redirect {
        /// Course being bought.
        course: Course,
        /// Hosted checkout session to redirect to.
        session: CheckoutSession,
    },
}

impl CheckoutOutcome {
    /// Redirect target for paid courses.
    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Enrolled { .. } => None,
            Self::Redirect { session, .. } => Some(session.url.as_str()),
        }
    }
}

/// Buy-or-enrol flow for one course.
///
/// Unlike list views, a failed checkout is both toasted and returned so the
/// caller can stay on the course page.
pub struct CheckoutFlow {
    courses: Arc<dyn CourseService>,
    payments: Arc<dyn PaymentService>,
    toaster: Arc<dyn Toaster>,
}

impl CheckoutFlow {
    /// Build the flow over the course and payment ports.
    pub fn new(
        courses: Arc<dyn CourseService>,
        payments: Arc<dyn PaymentService>,
        toaster: Arc<dyn Toaster>,
    ) -> Self {
        Self {
            courses,
            payments,
            toaster,
        }
    }

    /// Start checkout for `course_id`.
    ///
    /// # Errors
    ///
    /// Returns the toasted error when the course lookup, enrolment, or session
    /// creation fails.
    pub async fn start(&self, course_id: &CourseId) -> Result<CheckoutOutcome, Error> {
        let toaster = self.toaster.as_ref();
        let course = self
            .courses
            .course(course_id)
            .await
            .map_err(|error| report(toaster, error.into()))?;

        if course.is_free() {
            self.courses
                .enroll(course_id)
                .await
                .map_err(|error| report(toaster, error.into()))?;
            toaster.show(Toast::success(format!("Enrolled in {}", course.title)));
            return Ok(CheckoutOutcome::Enrolled { course });
        }

        let session = self
            .payments
            .create_checkout_session(course_id)
            .await
            .map_err(|error| report(toaster, error.into()))?;
        info!(course_id = %course_id, session_id = %session.session_id, "checkout session created");
        Ok(CheckoutOutcome::Redirect { course, session })
    }
}
