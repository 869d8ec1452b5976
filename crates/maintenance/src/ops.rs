//! The three maintenance jobs and the report they print.

use std::fmt;

use tracing::{info, warn};

use crate::error::MaintenanceError;
use crate::store::DocumentStore;
use crate::target::{CollectionName, DocumentId, FieldPath, FieldValue};

/// Kind of job, named after its binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Delete every document in a collection.
    Purge,
    /// Delete one document by id.
    Delete,
    /// Set one field across a collection.
    SetField,
}

impl Action {
    /// Binary name used in reports and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purge => "purge-collection",
            Self::Delete => "delete-document",
            Self::SetField => "set-field",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validated maintenance job.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// Delete every document in `collection`.
    Purge {
        /// Target collection.
        collection: CollectionName,
    },
    /// Delete the document `id` from `collection`.
    Delete {
        /// Target collection.
        collection: CollectionName,
        /// `_id` of the document.
        id: DocumentId,
    },
    /// Set `field` to `value` across `collection`.
    SetField {
        /// Target collection.
        collection: CollectionName,
        /// Field written.
        field: FieldPath,
        /// Value written.
        value: FieldValue,
        /// Leave documents that already carry the field untouched.
        only_missing: bool,
    },
}

impl Job {
    /// Kind of this job.
    #[must_use]
    pub fn action(&self) -> Action {
        match self {
            Self::Purge { .. } => Action::Purge,
            Self::Delete { .. } => Action::Delete,
            Self::SetField { .. } => Action::SetField,
        }
    }

    /// Collection the job writes to.
    #[must_use]
    pub fn collection(&self) -> &CollectionName {
        match self {
            Self::Purge { collection }
            | Self::Delete { collection, .. }
            | Self::SetField { collection, .. } => collection,
        }
    }
}

/// Outcome of a job, printed as `action=… collection=… count=…`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Job kind.
    pub action: Action,
    /// Collection written.
    pub collection: CollectionName,
    /// Documents deleted or modified.
    pub count: u64,
}

impl Report {
    /// Assemble a report.
    #[must_use]
    pub fn new(action: Action, collection: CollectionName, count: u64) -> Self {
        Self {
            action,
            collection,
            count,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "action={} collection={} count={}",
            self.action, self.collection, self.count
        )
    }
}

/// Run `job` against `store`.
///
/// # Errors
///
/// Propagates the store's [`MaintenanceError`]. Nothing is rolled back; a
/// bulk write that fails part-way leaves earlier documents changed.
pub async fn run_job(store: &dyn DocumentStore, job: &Job) -> Result<Report, MaintenanceError> {
    let count = match job {
        Job::Purge { collection } => store.delete_all(collection).await?,
        Job::Delete { collection, id } => {
            let deleted = store.delete_by_id(collection, *id).await?;
            if deleted == 0 {
                warn!(collection = %collection, id = %id, "no document with that id");
            }
            deleted
        }
        Job::SetField {
            collection,
            field,
            value,
            only_missing,
        } => {
            store
                .set_field(collection, field, value, *only_missing)
                .await?
        }
    };
    let report = Report::new(job.action(), job.collection().clone(), count);
    info!(
        action = %report.action,
        collection = %report.collection,
        count = report.count,
        "maintenance job finished"
    );
    Ok(report)
}
