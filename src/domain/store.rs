//! The document-store capability consumed by the access object.

use async_trait::async_trait;
use bson::Document;

use crate::error::Result;

/// Collection-level operations a backing document store must provide.
///
/// Documents are BSON; filters are field-equality documents and the only
/// update shape issued by this crate is `$inc`. The store owns all
/// persisted state; implementations must not require callers to manage
/// connections, sessions, or transactions across calls.
#[async_trait]
pub trait ItemStore: Send + Sync + 'static {
    /// Returns every document matching `filter`, with `projection` applied
    /// when given. A missing collection reads as empty.
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        projection: Option<Document>,
    ) -> Result<Vec<Document>>;

    /// Persists one document and returns the inserted count.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<u64>;

    /// Atomically applies `update` to the first document matching `filter`
    /// and returns the post-update document, or `None` when nothing
    /// matched.
    ///
    /// The atomicity of this single-document read-modify-write is what the
    /// id-generation contract rests on: no two concurrent callers may
    /// observe the same post-update value.
    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>>;

    /// Replaces the first document matching `filter` wholesale and returns
    /// the modified count. A replacement identical to the stored document
    /// counts as unmodified.
    async fn replace_one(
        &self,
        collection: &str,
        filter: Document,
        replacement: Document,
    ) -> Result<u64>;

    /// Deletes at most one document matching `filter` and returns the
    /// deleted count.
    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64>;
}
