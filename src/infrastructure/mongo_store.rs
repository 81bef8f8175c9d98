//! MongoDB-backed [`ItemStore`].
//!
//! Thin pass-through to the driver: one store call is one driver call, and
//! the atomicity guarantees of [`ItemStore::find_one_and_update`] come
//! straight from the server's single-document update.

use async_trait::async_trait;
use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::info;

use crate::config::DbConfig;
use crate::domain::store::ItemStore;
use crate::error::{Result, TodoError};

#[derive(Clone)]
pub struct MongoItemStore {
    client: Client,
    database: String,
}

impl MongoItemStore {
    /// Connects to the database named in `config` and verifies the server
    /// is reachable before returning.
    pub async fn connect(config: &DbConfig) -> Result<Self> {
        info!(url = %config.url, "connecting to document store");

        let client = Client::with_uri_str(with_bounded_timeouts(&config.url))
            .await
            .map_err(|e| TodoError::Connection(e.to_string()))?;

        client
            .database(&config.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| TodoError::Connection(format!("ping failed: {e}")))?;

        info!(database = %config.database, "connected");

        Ok(Self {
            client,
            database: config.database.clone(),
        })
    }

    fn database(&self) -> Database {
        self.client.database(&self.database)
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.database().collection(name)
    }

    /// The raw driver client, for operations outside the store contract.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Drops the whole database. Provisioning only.
    pub async fn reset_database(&self) -> Result<()> {
        self.database()
            .drop()
            .await
            .map_err(|e| TodoError::Query(format!("drop database: {e}")))
    }

    pub async fn create_collection(&self, name: &str) -> Result<()> {
        self.database()
            .create_collection(name)
            .await
            .map_err(|e| TodoError::Query(format!("create collection `{name}`: {e}")))
    }

    /// Puts a unique index on the `id` field so duplicate ids are rejected
    /// by the server even if the counter is ever tampered with.
    pub async fn ensure_id_index(&self, collection: &str) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection(collection)
            .create_indexes(vec![index])
            .await
            .map_err(|e| TodoError::Query(format!("create index on `{collection}`: {e}")))?;
        Ok(())
    }

    /// Closes all connections. The client is unusable afterwards.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl ItemStore for MongoItemStore {
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        projection: Option<Document>,
    ) -> Result<Vec<Document>> {
        let collection = self.collection(collection);
        let mut action = collection.find(filter);
        if let Some(projection) = projection {
            action = action.projection(projection);
        }
        let cursor = action.await.map_err(query_error)?;
        cursor.try_collect().await.map_err(query_error)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<u64> {
        self.collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| TodoError::Insert(e.to_string()))?;
        // Acknowledged inserts write exactly one document.
        Ok(1)
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>> {
        self.collection(collection)
            .find_one_and_update(filter, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(query_error)
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: Document,
        replacement: Document,
    ) -> Result<u64> {
        let result = self
            .collection(collection)
            .replace_one(filter, replacement)
            .await
            .map_err(query_error)?;
        Ok(result.modified_count)
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64> {
        let result = self
            .collection(collection)
            .delete_one(filter)
            .await
            .map_err(query_error)?;
        Ok(result.deleted_count)
    }
}

fn query_error(e: mongodb::error::Error) -> TodoError {
    TodoError::Query(e.to_string())
}

/// Appends server-selection and connect timeouts so an unreachable server
/// fails fast instead of hanging the caller.
fn with_bounded_timeouts(url: &str) -> String {
    if url.contains('?') {
        format!("{url}&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000")
    } else {
        format!("{url}?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000")
    }
}

#[cfg(test)]
mod tests {
    use super::with_bounded_timeouts;

    #[test]
    fn timeouts_start_the_query_string_when_absent() {
        assert_eq!(
            with_bounded_timeouts("mongodb://localhost:27017"),
            "mongodb://localhost:27017?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000"
        );
    }

    #[test]
    fn timeouts_extend_an_existing_query_string() {
        assert_eq!(
            with_bounded_timeouts("mongodb://localhost:27017/?replicaSet=rs0"),
            "mongodb://localhost:27017/?replicaSet=rs0&serverSelectionTimeoutMS=3000&connectTimeoutMS=3000"
        );
    }
}
