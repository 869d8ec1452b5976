//! Driven port for mentor session bookings.

use async_trait::async_trait;

use super::ServiceError;
use crate::domain::{Booking, BookingRequest};

/// Port for creating and listing bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Book a session with a mentor.
    async fn book(&self, request: &BookingRequest) -> Result<Booking, ServiceError>;

    /// Bookings made by the current user.
    async fn my_bookings(&self) -> Result<Vec<Booking>, ServiceError>;
}
