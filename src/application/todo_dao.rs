//! Access object for the to-do item collection.
//!
//! Every operation is one stateless round trip to the store; there is no
//! session, cache, or retry. Concurrency correctness is delegated to the
//! store's atomic single-document update (see [`ItemStore`]).

use bson::{Document, doc};

use crate::config::DbConfig;
use crate::domain::sequence::{Sequence, TODO_ITEM_SEQUENCE};
use crate::domain::store::ItemStore;
use crate::domain::todo::TodoItem;
use crate::error::{Result, TodoError};

/// Mediates all reads and writes of to-do items on behalf of callers.
///
/// Generic over the store capability so the same logic runs against the
/// real database and the in-memory backend.
#[derive(Clone)]
pub struct TodoItemDao<S: ItemStore> {
    store: S,
    items: String,
    sequences: String,
}

impl<S: ItemStore> TodoItemDao<S> {
    /// Uses the default collection names from [`DbConfig::default`].
    pub fn new(store: S) -> Self {
        Self::with_config(store, &DbConfig::default())
    }

    pub fn with_config(store: S, config: &DbConfig) -> Self {
        Self {
            store,
            items: config.items_collection.clone(),
            sequences: config.sequences_collection.clone(),
        }
    }

    /// Returns a fresh unique id from the persisted counter.
    ///
    /// Single atomic increment-and-read: the value returned is the
    /// post-increment state and reflects exactly one observed increment per
    /// call, so concurrent callers never see the same id. A missing or
    /// malformed sequence record is [`TodoError::IdGeneration`]; store
    /// failures propagate unchanged. Either way, the insertion that asked
    /// for the id must abort.
    async fn next_id(&self) -> Result<i64> {
        let updated = self
            .store
            .find_one_and_update(
                &self.sequences,
                doc! { "name": TODO_ITEM_SEQUENCE },
                doc! { "$inc": { "value": 1_i64 } },
            )
            .await?;

        let Some(document) = updated else {
            return Err(TodoError::IdGeneration(format!(
                "no sequence record named `{TODO_ITEM_SEQUENCE}`"
            )));
        };

        let sequence: Sequence = bson::from_document(document)
            .map_err(|e| TodoError::IdGeneration(format!("malformed sequence record: {e}")))?;
        Ok(sequence.value)
    }

    /// Inserts a new item and returns its assigned id.
    ///
    /// The generated id is written into the caller's item (any id already
    /// set is overwritten; `0` is expected). Nothing is persisted when id
    /// generation fails. If the store rejects the write afterwards, the
    /// generated id is skipped permanently: ids stay unique and increasing
    /// but need not be contiguous.
    pub async fn insert(&self, item: &mut TodoItem) -> Result<i64> {
        item.id = self.next_id().await?;

        let document =
            bson::to_document(&*item).map_err(|e| TodoError::Insert(e.to_string()))?;
        let inserted = self.store.insert_one(&self.items, document).await?;
        if inserted == 0 {
            return Err(TodoError::Insert(
                "store reported zero inserted documents".to_string(),
            ));
        }

        Ok(item.id)
    }

    /// Returns every stored item. Order is unspecified; the store's
    /// internal identity field never appears in the result.
    pub async fn list_all(&self) -> Result<Vec<TodoItem>> {
        let documents = self
            .store
            .find(&self.items, doc! {}, Some(doc! { "_id": 0 }))
            .await?;
        documents.into_iter().map(decode_item).collect()
    }

    /// Returns the item with the given id, or [`TodoError::NotFound`] when
    /// no document matches.
    pub async fn find_by_id(&self, id: i64) -> Result<TodoItem> {
        let documents = self
            .store
            .find(&self.items, doc! { "id": id }, Some(doc! { "_id": 0 }))
            .await?;
        match documents.into_iter().next() {
            Some(document) => decode_item(document),
            None => Err(TodoError::NotFound(id)),
        }
    }

    /// Replaces the stored document matched by `item.id` wholesale; partial
    /// updates are not supported.
    ///
    /// Returns `false` both when no document matches the id and when the
    /// replacement is identical to what is already stored; the store
    /// reports both as zero modified documents. Callers must not take
    /// `false` to imply absence.
    pub async fn update(&self, item: &TodoItem) -> Result<bool> {
        let replacement =
            bson::to_document(item).map_err(|e| TodoError::Query(e.to_string()))?;
        let modified = self
            .store
            .replace_one(&self.items, doc! { "id": item.id }, replacement)
            .await?;
        Ok(modified > 0)
    }

    /// Deletes at most one document with the given id. Returns `false` when
    /// nothing matched; "no match" is not an error here.
    pub async fn remove_by_id(&self, id: i64) -> Result<bool> {
        let deleted = self.store.delete_one(&self.items, doc! { "id": id }).await?;
        Ok(deleted > 0)
    }
}

fn decode_item(document: Document) -> Result<TodoItem> {
    bson::from_document(document)
        .map_err(|e| TodoError::Query(format!("malformed item document: {e}")))
}
