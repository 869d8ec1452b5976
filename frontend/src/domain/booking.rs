//! Mentor session bookings.

use chrono::{DateTime, Utc};

use super::{BookingId, MentorId};

/// Lifecycle of a booked session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    /// Requested, not yet confirmed by the mentor.
    Pending,
    /// Accepted by the mentor.
    Confirmed,
    /// Called off by either side.
    Cancelled,
    /// The session took place.
    Completed,
}

impl BookingStatus {
    /// Parse the API label, treating unknown values as pending.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Self::Confirmed,
            "cancelled" | "canceled" => Self::Cancelled,
            "completed" => Self::Completed,
            _ => Self::Pending,
        }
    }

    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

/// A booked mentor session.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    /// Backend identifier.
    pub id: BookingId,
    /// Mentor running the session.
    pub mentor_id: MentorId,
    /// Mentor display name, empty when not populated.
    pub mentor_name: String,
    /// Session start.
    pub start: DateTime<Utc>,
    /// Session length in minutes.
    pub duration_minutes: u32,
    /// Lifecycle status.
    pub status: BookingStatus,
}

/// Request to book a mentor for a session starting at `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Mentor to book.
    pub mentor_id: MentorId,
    /// Requested start, strictly in the future.
    pub start: DateTime<Utc>,
    /// Session length in minutes.
    pub duration_minutes: u32,
}
