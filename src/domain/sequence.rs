//! Persisted sequence counter backing id generation.
//!
//! One document per named sequence; only [`TODO_ITEM_SEQUENCE`] exists in
//! this system. Provisioning creates it once; the running system only ever
//! increments it, one atomic step per successful insertion.

use serde::{Deserialize, Serialize};

/// Name of the sequence that hands out to-do item ids.
pub const TODO_ITEM_SEQUENCE: &str = "todo-item-id";

/// The counter record as stored in the sequences collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
    pub value: i64,
}

impl Sequence {
    /// The record as written by provisioning. Callers receive
    /// post-increment values, so the first id handed out is `value + 1`.
    pub fn initial(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 1,
        }
    }
}
