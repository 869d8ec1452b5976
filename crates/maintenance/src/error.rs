//! Error type for the maintenance commands.

use thiserror::Error;

/// Errors raised while validating arguments or talking to MongoDB.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaintenanceError {
    /// The collection name cannot address a user collection.
    #[error("invalid collection name '{name}': {reason}")]
    InvalidCollection {
        /// Rejected input.
        name: String,
        /// Rule the input broke.
        reason: &'static str,
    },

    /// The document id is not a 24-character hex ObjectId.
    #[error("invalid document id '{value}': expected a 24-character hex ObjectId")]
    InvalidDocumentId {
        /// Rejected input.
        value: String,
    },

    /// The field path cannot be used in a `$set` update.
    #[error("invalid field path '{path}': {reason}")]
    InvalidFieldPath {
        /// Rejected input.
        path: String,
        /// Rule the input broke.
        reason: &'static str,
    },

    /// The value is not JSON or cannot be stored as BSON.
    #[error("invalid value: {message}")]
    InvalidValue {
        /// Parser or converter message.
        message: String,
    },

    /// No connection string was supplied.
    #[error("connection string missing: set --database-url or {env}")]
    MissingConnectionString {
        /// Environment variable consulted as a fallback.
        env: &'static str,
    },

    /// A connection string was supplied but is blank.
    #[error("{source_name} must not be empty")]
    EmptyConnectionString {
        /// Flag or environment variable holding the blank value.
        source_name: &'static str,
    },

    /// The database name is blank.
    #[error("database name must not be empty")]
    EmptyDatabaseName,

    /// The connection string could not be parsed or the client not built.
    #[error("failed to connect to MongoDB: {message}")]
    Connect {
        /// Driver message.
        message: String,
    },

    /// A store operation failed.
    #[error("{operation} on '{collection}' failed: {message}")]
    Store {
        /// Operation that failed.
        operation: &'static str,
        /// Collection addressed.
        collection: String,
        /// Driver message.
        message: String,
    },
}

impl MaintenanceError {
    /// Wrap a driver error raised by a store operation.
    pub(crate) fn store(
        operation: &'static str,
        collection: &str,
        error: &mongodb::error::Error,
    ) -> Self {
        Self::Store {
            operation,
            collection: collection.to_owned(),
            message: error.to_string(),
        }
    }
}
