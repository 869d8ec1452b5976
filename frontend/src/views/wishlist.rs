//! Wishlist panel.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::load_state::LoadState;
use super::toast::report;
use crate::domain::ports::{Toast, Toaster, WishlistService};
use crate::domain::{CourseId, Error, Wishlist};

/// Saved-for-later courses of the current user.
///
/// A 404 from the API means the user has never saved anything and settles as
/// an empty wishlist. Any other failure settles as `Failed`. Mutations always
/// refetch the whole list rather than editing it locally.
pub struct WishlistPanel {
    service: Arc<dyn WishlistService>,
    toaster: Arc<dyn Toaster>,
    state: LoadState<Wishlist>,
}

impl WishlistPanel {
    /// Build an idle panel.
    pub fn new(service: Arc<dyn WishlistService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            state: LoadState::Idle,
        }
    }

    /// Current wishlist.
    pub fn state(&self) -> &LoadState<Wishlist> {
        &self.state
    }

    /// Fetch the wishlist; a 404 settles as empty.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        self.state = match self.service.wishlist().await {
            Ok(wishlist) => LoadState::Loaded(wishlist),
            Err(error) if error.is_not_found() => {
                debug!("no wishlist on record; treating as empty");
                LoadState::Loaded(Wishlist::empty())
            }
            Err(error) => LoadState::Failed(report(self.toaster.as_ref(), error.into())),
        };
    }

    /// Save a course, then refetch.
    ///
    /// # Errors
    ///
    /// Returns the toasted error when the add call fails; the list is not
    /// refetched in that case.
    pub async fn add(&mut self, course_id: &CourseId) -> Result<(), Error> {
        self.service
            .add(course_id)
            .await
            .map_err(|error| report(self.toaster.as_ref(), error.into()))?;
        self.toaster.show(Toast::success("Added to wishlist"));
        self.load().await;
        Ok(())
    }

    /// Remove a course, then refetch.
    ///
    /// # Errors
    ///
    /// Returns the toasted error when the delete call fails; the list is not
    /// refetched in that case.
    pub async fn remove(&mut self, course_id: &CourseId) -> Result<(), Error> {
        self.service
            .remove(course_id)
            .await
            .map_err(|error| report(self.toaster.as_ref(), error.into()))?;
        self.toaster.show(Toast::success("Removed from wishlist"));
        self.load().await;
        Ok(())
    }
}

impl fmt::Display for WishlistPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Wishlist")?;
        match &self.state {
            LoadState::Idle | LoadState::Loading => writeln!(f, "  loading..."),
            LoadState::Failed(error) => writeln!(f, "  Could not load wishlist: {error}"),
            LoadState::Loaded(wishlist) if wishlist.is_empty() => {
                writeln!(f, "  Your wishlist is empty.")
            }
            LoadState::Loaded(wishlist) => {
                for course_id in &wishlist.course_ids {
                    writeln!(f, "  - {course_id}")?;
                }
                Ok(())
            }
        }
    }
}
