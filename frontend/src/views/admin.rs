//! Admin moderation panels.
//!
//! Status toggles need explicit confirmation. A confirmed toggle PATCHes the
//! opposite status and replaces the listed record with the server's copy.

use std::fmt;
use std::sync::Arc;

use tracing::info;

use super::load_state::LoadState;
use super::settle_reported;
use super::toast::report;
use crate::domain::ports::{AdminService, Toast, Toaster};
use crate::domain::{
    AccountStatus, ApplicationDecision, ApplicationId, ApplicationStatus, Error, Mentor,
    MentorApplication, MentorId, User, UserId,
};

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Confirmation was not given; nothing was sent.
    Unconfirmed,
    /// The record now has this status.
    Updated(AccountStatus),
}

fn current_status<T>(
    state: &LoadState<Vec<T>>,
    matches: impl Fn(&T) -> bool,
    status: impl Fn(&T) -> AccountStatus,
    what: &str,
) -> Result<AccountStatus, Error> {
    let records = state
        .loaded()
        .ok_or_else(|| Error::invalid_request(format!("{what} list is not loaded")))?;
    records
        .iter()
        .find(|record| matches(record))
        .map(status)
        .ok_or_else(|| Error::not_found(format!("{what} is not in the list")))
}

fn replace_record<T>(state: &mut LoadState<Vec<T>>, updated: T, matches: impl Fn(&T) -> bool) {
    if let Some(slot) = state
        .loaded_mut()
        .and_then(|records| records.iter_mut().find(|record| matches(record)))
    {
        *slot = updated;
    }
}

/// All users, with status toggles.
pub struct UserModerationPanel {
    service: Arc<dyn AdminService>,
    toaster: Arc<dyn Toaster>,
    state: LoadState<Vec<User>>,
}

impl UserModerationPanel {
    /// Build an idle panel.
    pub fn new(service: Arc<dyn AdminService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            state: LoadState::Idle,
        }
    }

    /// Current user list.
    pub fn state(&self) -> &LoadState<Vec<User>> {
        &self.state
    }

    /// Fetch every user, toasting on failure.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = self.service.all_users().await;
        self.state = settle_reported(self.toaster.as_ref(), result);
    }

    /// Flip a user's status once `confirmed`.
    ///
    /// # Errors
    ///
    /// Returns the toasted error when the list is not loaded, the user is not
    /// listed, or the PATCH fails.
    pub async fn toggle_status(
        &mut self,
        user_id: &UserId,
        confirmed: bool,
    ) -> Result<ToggleOutcome, Error> {
        if !confirmed {
            return Ok(ToggleOutcome::Unconfirmed);
        }
        let toaster = self.toaster.as_ref();
        let target = current_status(
            &self.state,
            |user| &user.id == user_id,
            |user| user.status,
            "user",
        )
        .map_err(|error| report(toaster, error))?
        .toggled();
        let updated = self
            .service
            .set_user_status(user_id, target)
            .await
            .map_err(|error| report(toaster, error.into()))?;
        let status = updated.status;
        info!(user_id = %user_id, status = %status, "user status changed");
        toaster.show(Toast::success(format!("{} is now {status}", updated.name)));
        replace_record(&mut self.state, updated, |user| &user.id == user_id);
        Ok(ToggleOutcome::Updated(status))
    }
}

impl fmt::Display for UserModerationPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Users")?;
        match &self.state {
            LoadState::Idle | LoadState::Loading => writeln!(f, "  loading..."),
            LoadState::Failed(error) => writeln!(f, "  Could not load users: {error}"),
            LoadState::Loaded(users) if users.is_empty() => writeln!(f, "  No users."),
            LoadState::Loaded(users) => {
                for user in users {
                    writeln!(
                        f,
                        "  - {} <{}> [{}] {} {}",
                        user.name,
                        user.email,
                        user.id,
                        user.role.as_str(),
                        user.status
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// All mentors, with status toggles.
pub struct MentorModerationPanel {
    service: Arc<dyn AdminService>,
    toaster: Arc<dyn Toaster>,
    state: LoadState<Vec<Mentor>>,
}

impl MentorModerationPanel {
    /// Build an idle panel.
    pub fn new(service: Arc<dyn AdminService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            state: LoadState::Idle,
        }
    }

    /// Current mentor list.
    pub fn state(&self) -> &LoadState<Vec<Mentor>> {
        &self.state
    }

    /// Fetch every mentor, toasting on failure.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = self.service.all_mentors().await;
        self.state = settle_reported(self.toaster.as_ref(), result);
    }

    /// Flip a mentor's status once `confirmed`.
    ///
    /// # Errors
    ///
    /// Returns the toasted error when the list is not loaded, the mentor is
    /// not listed, or the PATCH fails.
    pub async fn toggle_status(
        &mut self,
        mentor_id: &MentorId,
        confirmed: bool,
    ) -> Result<ToggleOutcome, Error> {
        if !confirmed {
            return Ok(ToggleOutcome::Unconfirmed);
        }
        let toaster = self.toaster.as_ref();
        let target = current_status(
            &self.state,
            |mentor| &mentor.id == mentor_id,
            |mentor| mentor.status,
            "mentor",
        )
        .map_err(|error| report(toaster, error))?
        .toggled();
        let updated = self
            .service
            .set_mentor_status(mentor_id, target)
            .await
            .map_err(|error| report(toaster, error.into()))?;
        let status = updated.status;
        info!(mentor_id = %mentor_id, status = %status, "mentor status changed");
        toaster.show(Toast::success(format!("{} is now {status}", updated.name)));
        replace_record(&mut self.state, updated, |mentor| &mentor.id == mentor_id);
        Ok(ToggleOutcome::Updated(status))
    }
}

impl fmt::Display for MentorModerationPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mentors")?;
        match &self.state {
            LoadState::Idle | LoadState::Loading => writeln!(f, "  loading..."),
            LoadState::Failed(error) => writeln!(f, "  Could not load mentors: {error}"),
            LoadState::Loaded(mentors) if mentors.is_empty() => writeln!(f, "  No mentors."),
            LoadState::Loaded(mentors) => {
                for mentor in mentors {
                    writeln!(
                        f,
                        "  - {} [{}] {} {}",
                        mentor.name,
                        mentor.id,
                        mentor.headline(),
                        mentor.status
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Mentor applications with approve/reject.
pub struct ApplicationReviewPanel {
    service: Arc<dyn AdminService>,
    toaster: Arc<dyn Toaster>,
    state: LoadState<Vec<MentorApplication>>,
}

impl ApplicationReviewPanel {
    /// Build an idle panel.
    pub fn new(service: Arc<dyn AdminService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            state: LoadState::Idle,
        }
    }

    /// Current application list.
    pub fn state(&self) -> &LoadState<Vec<MentorApplication>> {
        &self.state
    }

    /// Fetch every application, toasting on failure.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = self.service.mentor_applications().await;
        self.state = settle_reported(self.toaster.as_ref(), result);
    }

    /// Apply a decision and replace the listed application.
    ///
    /// # Errors
    ///
    /// Returns the toasted port error.
    pub async fn review(
        &mut self,
        application_id: &ApplicationId,
        decision: ApplicationDecision,
    ) -> Result<ApplicationStatus, Error> {
        let toaster = self.toaster.as_ref();
        let updated = self
            .service
            .review_application(application_id, decision)
            .await
            .map_err(|error| report(toaster, error.into()))?;
        let status = updated.status;
        info!(application_id = %application_id, status = status.as_str(), "application reviewed");
        toaster.show(Toast::success(format!(
            "Application from {} {}",
            updated.applicant_name,
            status.as_str()
        )));
        replace_record(&mut self.state, updated, |application| {
            &application.id == application_id
        });
        Ok(status)
    }
}

impl fmt::Display for ApplicationReviewPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mentor applications")?;
        match &self.state {
            LoadState::Idle | LoadState::Loading => writeln!(f, "  loading..."),
            LoadState::Failed(error) => writeln!(f, "  Could not load applications: {error}"),
            LoadState::Loaded(applications) if applications.is_empty() => {
                writeln!(f, "  No applications.")
            }
            LoadState::Loaded(applications) => {
                for application in applications {
                    let expertise = if application.expertise.is_empty() {
                        "-".to_owned()
                    } else {
                        application.expertise.join(", ")
                    };
                    writeln!(
                        f,
                        "  - {} <{}> [{}] {} ({} yrs, {expertise})",
                        application.applicant_name,
                        application.email,
                        application.id,
                        application.status.as_str(),
                        application.experience_years
                    )?;
                }
                Ok(())
            }
        }
    }
}
