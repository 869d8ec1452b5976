//! Reqwest adapters for the Codefolio REST API.
//!
//! Every adapter wraps one shared [`ApiClient`] and implements one domain
//! port. Adapters translate between DTOs and domain records; they contain no
//! view logic.

mod admin;
mod client;
mod course;
mod dto;
mod mentor;
mod notification;
mod payment;
#[cfg(test)]
mod test_server;
mod user;

pub use admin::HttpAdminService;
pub use client::ApiClient;
pub use course::{HttpCourseService, HttpWishlistService};
pub use mentor::{HttpBookingService, HttpMentorService};
pub use notification::HttpNotificationService;
pub use payment::HttpPaymentService;
pub use user::{HttpDashboardService, HttpUserService};

use crate::domain::ports::ServiceError;

/// Map a decoded DTO list into domain records, failing on the first bad one.
fn map_all<D, T>(
    items: Vec<D>,
    into_domain: impl Fn(D) -> Result<T, String>,
) -> Result<Vec<T>, ServiceError> {
    items
        .into_iter()
        .map(into_domain)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ServiceError::decode)
}

/// Percent-encode one path segment so user-typed identifiers cannot escape it.
fn encode_segment(raw: &str) -> String {
    raw.bytes().fold(String::with_capacity(raw.len()), |mut out, byte| {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
        out
    })
}
