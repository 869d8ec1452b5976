//! Explicit load states shared by every data-backed view.

use crate::domain::Error;

/// Lifecycle of one remote load.
///
/// Empty collections are `Loaded(vec![])`, never `Failed`, so a view can
/// always tell "nothing here" apart from "could not load".
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    /// Not requested yet.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Settled with a value.
    Loaded(T),
    /// Settled with an error.
    Failed(Error),
}

impl<T> LoadState<T> {
    /// Build the settled state for a finished call.
    pub fn settle(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(error) => Self::Failed(error),
        }
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded value, if any.
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Mutable access to the loaded value.
    pub fn loaded_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Failure, if the load settled with one.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        assert_eq!(LoadState::<u8>::default(), LoadState::Idle);
    }

    #[test]
    fn settles_success_and_failure() {
        assert_eq!(LoadState::settle(Ok(3)).loaded(), Some(&3));
        let failed = LoadState::<u8>::settle(Err(Error::not_found("gone")));
        assert_eq!(failed.error().map(Error::message), Some("gone"));
        assert!(failed.loaded().is_none());
    }

    #[test]
    fn empty_collections_are_loaded_not_failed() {
        let state = LoadState::settle(Ok(Vec::<u8>::new()));
        assert!(state.error().is_none());
        assert_eq!(state.loaded().map(Vec::len), Some(0));
    }
}
