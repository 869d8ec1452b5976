//! View-state layer.
//!
//! Each view owns its load states and talks to the API only through injected
//! ports. Failures reach the user through one [`Toaster`]; background
//! notification fetches are the exception and are only logged.

mod admin;
mod availability;
mod checkout;
mod home;
mod load_state;
mod mentor;
mod notification_dialog;
mod notification_store;
mod profile;
mod toast;
mod wishlist;

pub use admin::{ApplicationReviewPanel, MentorModerationPanel, ToggleOutcome, UserModerationPanel};
pub use availability::AvailabilityEditor;
pub use checkout::{CheckoutFlow, CheckoutOutcome};
pub use home::HomePage;
pub use load_state::LoadState;
pub use mentor::{BookingFlow, DEFAULT_SESSION_MINUTES, MentorProfileView};
pub use notification_dialog::{DialogBody, NotificationDialog, NotificationRow};
pub use notification_store::{NotificationAction, NotificationState, NotificationStore, reduce};
pub use profile::{
    BookedMentor, DashboardPanel, EnrolledCoursesPanel, MessagesPanel, ProfilePage, ProfilePanel,
    ProfileServices, ProfileTab, PurchaseHistoryPanel, SettingsPanel, TabTransition, TeachersPanel,
};
pub use toast::ToastQueue;
pub use wishlist::WishlistPanel;

use crate::domain::Error;
use crate::domain::ports::{ServiceError, Toaster};

/// Settle a port result, toasting the failure.
fn settle_reported<T>(toaster: &dyn Toaster, result: Result<T, ServiceError>) -> LoadState<T> {
    LoadState::settle(result.map_err(|error| toast::report(toaster, Error::from(error))))
}
