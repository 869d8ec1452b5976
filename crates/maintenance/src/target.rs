//! Validated command arguments: collections, document ids, field paths and
//! values.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use mongodb::bson::{self, Bson};

use crate::error::MaintenanceError;

const COLLECTION_NAME_MAX: usize = 120;

/// Name of a user collection.
///
/// Non-empty, at most 120 bytes, free of `$` and NUL, and outside the
/// reserved `system.` namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionName(String);

impl CollectionName {
    /// Validate a collection name.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceError::InvalidCollection`] naming the broken rule.
    pub fn new(raw: impl Into<String>) -> Result<Self, MaintenanceError> {
        let name = raw.into();
        let reason = if name.trim().is_empty() {
            Some("must not be empty")
        } else if name.len() > COLLECTION_NAME_MAX {
            Some("must be at most 120 bytes")
        } else if name.contains('$') {
            Some("must not contain '$'")
        } else if name.contains('\0') {
            Some("must not contain NUL")
        } else if name.starts_with("system.") {
            Some("the system. namespace is reserved")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(MaintenanceError::InvalidCollection { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// Borrow the name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CollectionName {
    type Err = MaintenanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw)
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document `_id`, always an ObjectId.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    /// Wrapped ObjectId.
    #[must_use]
    pub fn object_id(self) -> ObjectId {
        self.0
    }
}

impl FromStr for DocumentId {
    type Err = MaintenanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(raw.trim())
            .map(Self)
            .map_err(|_| MaintenanceError::InvalidDocumentId {
                value: raw.to_owned(),
            })
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Dotted path of the field a `$set` writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(String);

impl FieldPath {
    /// Validate a dotted field path.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceError::InvalidFieldPath`] for empty segments,
    /// operator characters, or an attempt to rewrite `_id`.
    pub fn new(raw: impl Into<String>) -> Result<Self, MaintenanceError> {
        let path = raw.into();
        let reason = if path.is_empty() {
            Some("must not be empty")
        } else if path.split('.').any(str::is_empty) {
            Some("segments must not be empty")
        } else if path.contains('$') || path.contains('\0') {
            Some("must not contain '$' or NUL")
        } else if path.split('.').next() == Some("_id") {
            Some("_id cannot be rewritten")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(MaintenanceError::InvalidFieldPath { path, reason }),
            None => Ok(Self(path)),
        }
    }

    /// Borrow the path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for FieldPath {
    type Err = MaintenanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::new(raw)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value written by `set-field`, given on the command line as JSON.
///
/// Strings need their JSON quotes: `'"draft"'`, not `draft`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue(serde_json::Value);

impl FieldValue {
    /// Borrow the parsed JSON.
    #[must_use]
    pub fn json(&self) -> &serde_json::Value {
        &self.0
    }

    /// Convert to BSON for the update document.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceError::InvalidValue`] when the value has no BSON
    /// representation, such as an integer beyond `i64`.
    pub fn to_bson(&self) -> Result<Bson, MaintenanceError> {
        bson::to_bson(&self.0).map_err(|error| MaintenanceError::InvalidValue {
            message: error.to_string(),
        })
    }
}

impl FromStr for FieldValue {
    type Err = MaintenanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(raw)
            .map(Self)
            .map_err(|error| MaintenanceError::InvalidValue {
                message: format!("{error} (quote strings as JSON, e.g. '\"text\"')"),
            })
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
