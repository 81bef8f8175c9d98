//! In-memory [`ItemStore`] for tests and local development.
//!
//! Documents live in a per-collection `Vec<Document>` behind an async
//! read-write lock. The operator surface is deliberately small: top-level
//! equality filters, exclusion projections, and `$inc` updates, which is
//! everything the access object issues. Anything else is a [`TodoError::Query`]
//! rather than a silent wrong answer.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bson::{Bson, Document};
use tokio::sync::RwLock;

use crate::domain::store::ItemStore;
use crate::error::{Result, TodoError};

#[derive(Clone, Default)]
pub struct MemoryItemStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn find(
        &self,
        collection: &str,
        filter: Document,
        projection: Option<Document>,
    ) -> Result<Vec<Document>> {
        if let Some(projection) = &projection {
            if projection.iter().any(|(_, value)| !is_excluding(value)) {
                return Err(TodoError::Query(
                    "only exclusion projections are supported".to_string(),
                ));
            }
        }

        let collections = self.collections.read().await;
        let documents = match collections.get(collection) {
            Some(documents) => documents,
            None => return Ok(Vec::new()),
        };
        Ok(documents
            .iter()
            .filter(|document| matches_filter(document, &filter))
            .map(|document| project(document.clone(), projection.as_ref()))
            .collect())
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<u64> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(1)
    }

    async fn find_one_and_update(
        &self,
        collection: &str,
        filter: Document,
        update: Document,
    ) -> Result<Option<Document>> {
        // The write lock spans the whole read-modify-write, so concurrent
        // callers observe distinct post-update states.
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(document) = documents
            .iter_mut()
            .find(|document| matches_filter(document, &filter))
        else {
            return Ok(None);
        };
        apply_update(document, &update)?;
        Ok(Some(document.clone()))
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: Document,
        replacement: Document,
    ) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match documents
            .iter_mut()
            .find(|document| matches_filter(document, &filter))
        {
            // An identical replacement counts as unmodified.
            Some(stored) if *stored == replacement => Ok(0),
            Some(stored) => {
                *stored = replacement;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match documents
            .iter()
            .position(|document| matches_filter(document, &filter))
        {
            Some(at) => {
                documents.remove(at);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Top-level equality match for every field in `filter`.
fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| {
        document
            .get(key)
            .is_some_and(|actual| bson_eq(actual, expected))
    })
}

/// Equality with numeric coercion, so an `Int32` stored value matches an
/// `Int64` filter value the way the server matches them. Integer pairs
/// compare exactly; only comparisons involving a `Double` go through `f64`.
fn bson_eq(a: &Bson, b: &Bson) -> bool {
    if let (Some(x), Some(y)) = (integer(a), integer(b)) {
        return x == y;
    }
    match (numeric(a), numeric(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn numeric(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

fn is_excluding(value: &Bson) -> bool {
    matches!(numeric(value), Some(v) if v == 0.0)
}

fn project(mut document: Document, projection: Option<&Document>) -> Document {
    if let Some(projection) = projection {
        for (key, _) in projection.iter() {
            document.remove(key);
        }
    }
    document
}

fn apply_update(document: &mut Document, update: &Document) -> Result<()> {
    for (operator, arguments) in update {
        match operator.as_str() {
            "$inc" => {
                let arguments = arguments.as_document().ok_or_else(|| {
                    TodoError::Query("$inc takes a document of amounts".to_string())
                })?;
                for (field, amount) in arguments {
                    increment(document, field, amount)?;
                }
            }
            other => {
                return Err(TodoError::Query(format!(
                    "unsupported update operator `{other}`"
                )));
            }
        }
    }
    Ok(())
}

fn increment(document: &mut Document, field: &str, amount: &Bson) -> Result<()> {
    let amount = integer(amount).ok_or_else(|| {
        TodoError::Query(format!("non-integer $inc amount for `{field}`"))
    })?;
    let current = match document.get(field) {
        Some(value) => integer(value).ok_or_else(|| {
            TodoError::Query(format!("cannot $inc non-integer field `{field}`"))
        })?,
        None => 0,
    };
    document.insert(field, Bson::Int64(current + amount));
    Ok(())
}

fn integer(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        _ => None,
    }
}
