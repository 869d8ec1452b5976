//! Mentor profile lookup and session booking.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::load_state::LoadState;
use super::toast::report;
use crate::domain::ports::{BookingService, MentorService, Toast, Toaster};
use crate::domain::{Booking, BookingRequest, Error, Mentor, MentorId};

/// Length of a booked session when the caller does not choose one.
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

/// One mentor's public profile.
///
/// A failed lookup is toasted and returned, matching checkout.
pub struct MentorProfileView {
    service: Arc<dyn MentorService>,
    toaster: Arc<dyn Toaster>,
    state: LoadState<Mentor>,
}

impl MentorProfileView {
    /// Build a view with nothing loaded.
    pub fn new(service: Arc<dyn MentorService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            state: LoadState::Idle,
        }
    }

    /// Loaded profile, if any.
    pub fn state(&self) -> &LoadState<Mentor> {
        &self.state
    }

    /// Load the mentor.
    ///
    /// # Errors
    ///
    /// Returns the toasted error; the view also settles as `Failed`.
    pub async fn load(&mut self, mentor_id: &MentorId) -> Result<&Mentor, Error> {
        self.state = LoadState::Loading;
        match self.service.mentor(mentor_id).await {
            Ok(mentor) => {
                self.state = LoadState::Loaded(mentor);
                self.state
                    .loaded()
                    .ok_or_else(|| Error::internal("mentor missing after load"))
            }
            Err(error) => {
                let error = report(self.toaster.as_ref(), error.into());
                self.state = LoadState::Failed(error.clone());
                Err(error)
            }
        }
    }
}

impl fmt::Display for MentorProfileView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            LoadState::Idle | LoadState::Loading => writeln!(f, "loading..."),
            LoadState::Failed(error) => writeln!(f, "Could not load mentor: {error}"),
            LoadState::Loaded(mentor) => {
                writeln!(f, "{} [{}]", mentor.name, mentor.id)?;
                writeln!(f, "  {}", mentor.headline())?;
                writeln!(f, "  Experience: {} years", mentor.experience_years)?;
                if !mentor.skills.is_empty() {
                    writeln!(f, "  Skills: {}", mentor.skills.join(", "))?;
                }
                if let Some(rate) = mentor.hourly_rate {
                    writeln!(f, "  Rate: ${rate:.2}/h")?;
                }
                if let Some(rating) = mentor.rating {
                    writeln!(f, "  Rating: {rating:.1}")?;
                }
                writeln!(f, "  Status: {}", mentor.status)
            }
        }
    }
}

/// Books one session with a mentor.
pub struct BookingFlow {
    service: Arc<dyn BookingService>,
    toaster: Arc<dyn Toaster>,
}

impl BookingFlow {
    /// Build the flow over the booking port.
    pub fn new(service: Arc<dyn BookingService>, toaster: Arc<dyn Toaster>) -> Self {
        Self { service, toaster }
    }

    /// Book a default-length session starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` for a start in the past relative to `now`, or
    /// the toasted port error.
    pub async fn book(
        &self,
        mentor_id: &MentorId,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Booking, Error> {
        if start <= now {
            return Err(report(
                self.toaster.as_ref(),
                Error::invalid_request("session start must be in the future"),
            ));
        }
        let request = BookingRequest {
            mentor_id: mentor_id.clone(),
            start,
            duration_minutes: DEFAULT_SESSION_MINUTES,
        };
        let booking = self
            .service
            .book(&request)
            .await
            .map_err(|error| report(self.toaster.as_ref(), error.into()))?;
        self.toaster.show(Toast::success(format!(
            "Session with {} booked for {}",
            booking.mentor_name,
            booking.start.format("%Y-%m-%d %H:%M UTC")
        )));
        Ok(booking)
    }
}
