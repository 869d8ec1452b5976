//! One-shot MongoDB maintenance commands for the Codefolio database.
//!
//! Each command validates its arguments, opens one connection, performs a
//! single bulk delete or update through [`DocumentStore`], prints a one-line
//! report and closes the connection. Writes are not transactional: a failure
//! part-way through a bulk write leaves the documents already touched as
//! they are.
//!
//! # Example
//!
//! ```
//! use maintenance::{Action, CollectionName, Report};
//!
//! let collection: CollectionName = "courses".parse().expect("valid collection");
//! let report = Report::new(Action::Purge, collection, 3);
//! assert_eq!(report.to_string(), "action=purge-collection collection=courses count=3");
//! ```

pub mod cli;
mod error;
mod ops;
mod store;
mod target;

pub use error::MaintenanceError;
pub use ops::{Action, Job, Report, run_job};
#[cfg(test)]
pub use store::MockDocumentStore;
pub use store::{DEFAULT_DATABASE, DocumentStore, MongoDocumentStore};
pub use target::{CollectionName, DocumentId, FieldPath, FieldValue};
