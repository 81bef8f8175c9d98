//! Failure taxonomy of the data-access layer.
//!
//! Every operation reports failures as structured values; nothing is
//! retried or swallowed here. Logging is the caller's concern.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TodoError {
    /// The store is unreachable or the connection could not be established.
    #[error("store connection failed: {0}")]
    Connection(String),

    /// The atomic counter update matched no sequence record, or the record
    /// it returned was malformed. The insertion that requested the id is
    /// aborted before any document write.
    #[error("id generation failed: {0}")]
    IdGeneration(String),

    /// A document write was rejected, or the store reported zero inserted
    /// documents.
    #[error("insert failed: {0}")]
    Insert(String),

    /// A store round trip failed, or a persisted document did not decode.
    #[error("store query failed: {0}")]
    Query(String),

    /// Lookup by id matched no document. Distinct from an empty result set.
    #[error("no item with id {0}")]
    NotFound(i64),
}

pub type Result<T> = std::result::Result<T, TodoError>;
