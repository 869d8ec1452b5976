//! Driven port for user-visible feedback.
//!
//! Every view reports failures through one [`Toaster`], so there is a single
//! channel deciding how errors reach the user.

use std::fmt;

use crate::domain::Error;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    /// Neutral information.
    Info,
    /// A completed action.
    Success,
    /// A failure the user should see.
    Error,
}

impl fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}

/// A short message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Severity.
    pub level: ToastLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Toast {
    /// Build an error toast from a domain error.
    pub fn from_error(error: &Error) -> Self {
        Self {
            level: ToastLevel::Error,
            message: error.message().to_owned(),
        }
    }

    /// Build a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.message)
    }
}

/// Sink for toasts.
#[cfg_attr(test, mockall::automock)]
pub trait Toaster: Send + Sync {
    /// Show one toast.
    fn show(&self, toast: Toast);
}
