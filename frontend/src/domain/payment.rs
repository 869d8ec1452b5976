//! Checkout and purchase history records.

use chrono::{DateTime, Utc};

use super::CourseId;

/// Hosted checkout session created for one course purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Payment provider session identifier.
    pub session_id: String,
    /// Redirect target for the hosted payment page.
    pub url: String,
}

/// A completed course purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    /// Purchased course.
    pub course_id: CourseId,
    /// Course title at purchase time.
    pub course_title: String,
    /// Amount charged.
    pub amount: f64,
    /// ISO currency code, lowercase.
    pub currency: String,
    /// When the payment completed.
    pub purchased_at: DateTime<Utc>,
}
