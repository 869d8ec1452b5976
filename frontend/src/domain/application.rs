//! Mentor applications reviewed by admins.

use chrono::{DateTime, Utc};

use super::ApplicationId;

/// Review status of a mentor application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    /// Awaiting review.
    Pending,
    /// Accepted; the applicant becomes a mentor.
    Approved,
    /// Declined.
    Rejected,
}

impl ApplicationStatus {
    /// Parse the API label, treating unknown values as pending.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }

    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Admin decision on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationDecision {
    /// Accept the application.
    Approve,
    /// Decline the application.
    Reject,
}

impl ApplicationDecision {
    /// Status the application moves to once the decision is applied.
    pub fn resulting_status(self) -> ApplicationStatus {
        match self {
            Self::Approve => ApplicationStatus::Approved,
            Self::Reject => ApplicationStatus::Rejected,
        }
    }
}

/// A request from a user to become a mentor.
#[derive(Debug, Clone, PartialEq)]
pub struct MentorApplication {
    /// Backend identifier.
    pub id: ApplicationId,
    /// Name the applicant registered with.
    pub applicant_name: String,
    /// Contact address, empty when the API omits it.
    pub email: String,
    /// Declared skills.
    pub expertise: Vec<String>,
    /// Years of professional experience.
    pub experience_years: u32,
    /// Current review status.
    pub status: ApplicationStatus,
    /// Submission time, when reported.
    pub submitted_at: Option<DateTime<Utc>>,
}
