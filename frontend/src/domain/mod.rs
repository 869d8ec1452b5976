//! Domain primitives and aggregates.
//!
//! Purpose: define the strongly typed records the front end receives from the
//! Codefolio API. Every identifier originates from a backend response; no
//! constructor here generates one.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error category.
//! - Entity records for users, mentors, courses, notifications, wishlists,
//!   bookings, payments, dashboards, and mentor applications.

pub mod application;
pub mod availability;
pub mod booking;
pub mod course;
pub mod dashboard;
pub mod error;
pub mod identifier;
pub mod mentor;
pub mod notification;
pub mod payment;
pub mod ports;
pub mod user;
pub mod wishlist;

pub use self::application::{ApplicationDecision, ApplicationStatus, MentorApplication};
pub use self::availability::{Availability, AvailabilitySlot, AvailabilityValidationError};
pub use self::booking::{Booking, BookingRequest, BookingStatus};
pub use self::course::{Course, EnrolledCourse};
pub use self::dashboard::{DashboardPeriod, DashboardSummary};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identifier::{
    ApplicationId, BookingId, CourseId, IdentifierValidationError, MentorId, NotificationId,
    UserId,
};
pub use self::mentor::Mentor;
pub use self::notification::Notification;
pub use self::payment::{CheckoutSession, Purchase};
pub use self::user::{AccountStatus, ProfileUpdate, User, UserRole};
pub use self::wishlist::Wishlist;

/// Convenient result alias for view-level operations.
///
/// # Examples
/// ```
/// use frontend::domain::{Error, ViewResult};
///
/// fn guard() -> ViewResult<()> {
///     Err(Error::forbidden("admins only"))
/// }
/// assert!(guard().is_err());
/// ```
pub type ViewResult<T> = Result<T, Error>;
