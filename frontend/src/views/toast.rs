//! In-memory toast sink.

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::domain::Error;
use crate::domain::ports::{Toast, Toaster};

/// Drainable toast queue backing the terminal front end.
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued toast, oldest first.
    pub fn drain(&self) -> Vec<Toast> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }

    /// Number of queued toasts.
    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Toaster for ToastQueue {
    fn show(&self, toast: Toast) {
        info!(level = %toast.level, message = %toast.message, "toast");
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}

/// Report `error` through `toaster` and hand it back for propagation.
pub(crate) fn report(toaster: &dyn Toaster, error: Error) -> Error {
    toaster.show(Toast::from_error(&error));
    error
}
