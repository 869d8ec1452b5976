//! Availability editor for the signed-in mentor.

use std::fmt;
use std::sync::Arc;

use super::load_state::LoadState;
use super::settle_reported;
use super::toast::report;
use crate::domain::ports::{MentorService, Toast, Toaster};
use crate::domain::{Availability, AvailabilitySlot, Error};

/// Weekly availability with local edits and an explicit save.
///
/// Edits are applied to the loaded copy only. `save` sends the whole
/// availability and adopts the server's echo as the new local state.
pub struct AvailabilityEditor {
    service: Arc<dyn MentorService>,
    toaster: Arc<dyn Toaster>,
    state: LoadState<Availability>,
    dirty: bool,
}

impl AvailabilityEditor {
    /// Build an editor with nothing loaded.
    pub fn new(service: Arc<dyn MentorService>, toaster: Arc<dyn Toaster>) -> Self {
        Self {
            service,
            toaster,
            state: LoadState::Idle,
            dirty: false,
        }
    }

    /// Local availability, including unsaved edits.
    pub fn state(&self) -> &LoadState<Availability> {
        &self.state
    }

    /// Unsaved local edits exist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Fetch the server copy, discarding local edits.
    pub async fn load(&mut self) {
        self.state = LoadState::Loading;
        let result = self.service.availability().await;
        self.state = settle_reported(self.toaster.as_ref(), result);
        self.dirty = false;
    }

    fn editable(&mut self) -> Result<&mut Availability, Error> {
        self.state
            .loaded_mut()
            .ok_or_else(|| Error::invalid_request("availability is not loaded"))
    }

    /// Add a slot locally.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` when nothing is loaded or the slot overlaps an
    /// existing one on the same day.
    pub fn add_slot(&mut self, slot: AvailabilitySlot) -> Result<(), Error> {
        let outcome = self.editable().and_then(|availability| {
            availability
                .add_slot(slot)
                .map_err(|error| Error::invalid_request(error.to_string()))
        });
        self.finish_edit(outcome)
    }

    /// Remove the slot at `index` locally.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` when nothing is loaded or `index` is out of
    /// range.
    pub fn remove_slot(&mut self, index: usize) -> Result<AvailabilitySlot, Error> {
        let outcome = self.editable().and_then(|availability| {
            availability
                .remove_slot(index)
                .map_err(|error| Error::invalid_request(error.to_string()))
        });
        self.finish_edit(outcome)
    }

    /// Replace every slot locally, keeping the timezone.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` when nothing is loaded or the slots overlap.
    pub fn replace_slots(&mut self, slots: Vec<AvailabilitySlot>) -> Result<(), Error> {
        let outcome = self.editable().and_then(|availability| {
            let replacement = Availability::new(availability.timezone.clone(), slots)
                .map_err(|error| Error::invalid_request(error.to_string()))?;
            *availability = replacement;
            Ok(())
        });
        self.finish_edit(outcome)
    }

    fn finish_edit<T>(&mut self, outcome: Result<T, Error>) -> Result<T, Error> {
        match outcome {
            Ok(value) => {
                self.dirty = true;
                Ok(value)
            }
            Err(error) => Err(report(self.toaster.as_ref(), error)),
        }
    }

    /// Persist the local copy.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` when nothing is loaded, or the toasted port
    /// error. Local edits are kept on failure.
    pub async fn save(&mut self) -> Result<(), Error> {
        let Some(current) = self.state.loaded() else {
            return Err(report(
                self.toaster.as_ref(),
                Error::invalid_request("availability is not loaded"),
            ));
        };
        let saved = self
            .service
            .update_availability(current)
            .await
            .map_err(|error| report(self.toaster.as_ref(), error.into()))?;
        self.state = LoadState::Loaded(saved);
        self.dirty = false;
        self.toaster.show(Toast::success("Availability saved"));
        Ok(())
    }
}

impl fmt::Display for AvailabilityEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            LoadState::Idle | LoadState::Loading => writeln!(f, "Availability\n  loading..."),
            LoadState::Failed(error) => {
                writeln!(f, "Availability\n  Could not load availability: {error}")
            }
            LoadState::Loaded(availability) => {
                let marker = if self.dirty { " (unsaved)" } else { "" };
                writeln!(f, "Availability ({}){marker}", availability.timezone)?;
                if availability.slots().is_empty() {
                    return writeln!(f, "  No slots yet.");
                }
                for (index, slot) in availability.slots().iter().enumerate() {
                    writeln!(f, "  {index}. {slot}")?;
                }
                Ok(())
            }
        }
    }
}
