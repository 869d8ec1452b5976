//! Domain ports for the hexagonal boundary.
//!
//! Remote service ports mirror one Codefolio API resource each and share the
//! [`ServiceError`] contract. [`Toaster`] is the single feedback channel.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_service;
mod booking_service;
mod course_service;
mod dashboard_service;
mod mentor_service;
mod notification_service;
mod payment_service;
mod service_error;
mod toaster;
mod user_service;
mod wishlist_service;

pub use admin_service::AdminService;
#[cfg(test)]
pub use admin_service::MockAdminService;
pub use booking_service::BookingService;
#[cfg(test)]
pub use booking_service::MockBookingService;
pub use course_service::CourseService;
#[cfg(test)]
pub use course_service::MockCourseService;
pub use dashboard_service::DashboardService;
#[cfg(test)]
pub use dashboard_service::MockDashboardService;
pub use mentor_service::MentorService;
#[cfg(test)]
pub use mentor_service::MockMentorService;
#[cfg(test)]
pub use notification_service::MockNotificationService;
pub use notification_service::NotificationService;
#[cfg(test)]
pub use payment_service::MockPaymentService;
pub use payment_service::PaymentService;
pub use service_error::ServiceError;
#[cfg(test)]
pub use toaster::MockToaster;
pub use toaster::{Toast, ToastLevel, Toaster};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::UserService;
#[cfg(test)]
pub use wishlist_service::MockWishlistService;
pub use wishlist_service::WishlistService;
