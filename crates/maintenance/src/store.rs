//! Document store port and its MongoDB adapter.

use async_trait::async_trait;
use mongodb::bson::{Document, doc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::debug;

use crate::error::MaintenanceError;
use crate::target::{CollectionName, DocumentId, FieldPath, FieldValue};

/// Database used when neither `--database` nor the connection string name one.
pub const DEFAULT_DATABASE: &str = "codefolio";

/// Bulk writes the maintenance commands perform. Each returns the number of
/// documents affected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Delete every document in `collection`.
    async fn delete_all(&self, collection: &CollectionName) -> Result<u64, MaintenanceError>;

    /// Delete the document whose `_id` is `id`.
    async fn delete_by_id(
        &self,
        collection: &CollectionName,
        id: DocumentId,
    ) -> Result<u64, MaintenanceError>;

    /// `$set` `field` to `value` on every document, or only on documents
    /// lacking the field when `only_missing` is true.
    async fn set_field(
        &self,
        collection: &CollectionName,
        field: &FieldPath,
        value: &FieldValue,
        only_missing: bool,
    ) -> Result<u64, MaintenanceError>;
}

/// [`DocumentStore`] over one MongoDB client.
#[derive(Debug, Clone)]
pub struct MongoDocumentStore {
    client: Client,
    database: Database,
}

impl MongoDocumentStore {
    /// Build a client for `uri` and select the target database.
    ///
    /// The database is `database` when given, else the connection string's
    /// default database, else [`DEFAULT_DATABASE`]. The driver connects
    /// lazily, so an unreachable server surfaces on the first operation.
    ///
    /// # Errors
    ///
    /// Returns [`MaintenanceError::Connect`] when the connection string does
    /// not parse or the client cannot be built, and
    /// [`MaintenanceError::EmptyDatabaseName`] for a blank `database`.
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, MaintenanceError> {
        let options = ClientOptions::parse(uri)
            .await
            .map_err(|error| MaintenanceError::Connect {
                message: error.to_string(),
            })?;
        let name = select_database(database, options.default_database.as_deref())?;
        let client = Client::with_options(options).map_err(|error| MaintenanceError::Connect {
            message: error.to_string(),
        })?;
        debug!(database = %name, "mongodb client ready");
        let database = client.database(&name);
        Ok(Self { client, database })
    }

    /// Name of the selected database.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Shut the client down, waiting for pooled connections to close.
    pub async fn close(self) {
        self.client.shutdown().await;
    }

    fn collection(&self, name: &CollectionName) -> Collection<Document> {
        self.database.collection(name.as_str())
    }
}

fn select_database(
    explicit: Option<&str>,
    from_uri: Option<&str>,
) -> Result<String, MaintenanceError> {
    match explicit {
        Some(name) if name.trim().is_empty() => Err(MaintenanceError::EmptyDatabaseName),
        Some(name) => Ok(name.to_owned()),
        None => Ok(from_uri.unwrap_or(DEFAULT_DATABASE).to_owned()),
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn delete_all(&self, collection: &CollectionName) -> Result<u64, MaintenanceError> {
        let result = self
            .collection(collection)
            .delete_many(doc! {})
            .await
            .map_err(|error| MaintenanceError::store("delete_many", collection.as_str(), &error))?;
        Ok(result.deleted_count)
    }

    async fn delete_by_id(
        &self,
        collection: &CollectionName,
        id: DocumentId,
    ) -> Result<u64, MaintenanceError> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": id.object_id() })
            .await
            .map_err(|error| MaintenanceError::store("delete_one", collection.as_str(), &error))?;
        Ok(result.deleted_count)
    }

    async fn set_field(
        &self,
        collection: &CollectionName,
        field: &FieldPath,
        value: &FieldValue,
        only_missing: bool,
    ) -> Result<u64, MaintenanceError> {
        let mut filter = Document::new();
        if only_missing {
            filter.insert(field.as_str(), doc! { "$exists": false });
        }
        let mut assignment = Document::new();
        assignment.insert(field.as_str(), value.to_bson()?);
        let result = self
            .collection(collection)
            .update_many(filter, doc! { "$set": assignment })
            .await
            .map_err(|error| MaintenanceError::store("update_many", collection.as_str(), &error))?;
        Ok(result.modified_count)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::explicit_wins(Some("staging"), Some("prod"), "staging")]
    #[case::uri_default(None, Some("prod"), "prod")]
    #[case::fallback(None, None, DEFAULT_DATABASE)]
    fn database_selection_order(
        #[case] explicit: Option<&str>,
        #[case] from_uri: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(select_database(explicit, from_uri), Ok(expected.to_owned()));
    }

    #[rstest]
    fn blank_database_name_is_rejected() {
        assert_eq!(
            select_database(Some("  "), Some("prod")),
            Err(MaintenanceError::EmptyDatabaseName)
        );
    }

    #[tokio::test]
    async fn connect_uses_the_connection_string_database() {
        let store = MongoDocumentStore::connect("mongodb://localhost:27017/lms", None).await;
        assert_eq!(store.as_ref().map(MongoDocumentStore::database_name), Ok("lms"));
    }

    #[tokio::test]
    async fn connect_rejects_malformed_connection_strings() {
        let result = MongoDocumentStore::connect("postgres://localhost/db", None).await;
        assert!(matches!(result, Err(MaintenanceError::Connect { .. })));
    }
}
