//! To-do item domain model.
//!
//! Invariants:
//! - `id` is unique across stored items once assigned; `0` means unassigned.
//! - `description` is non-empty; enforced at construction.
//! - Equality compares `deadline` by parsed value, never by raw string.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected construction of an item without a description.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("description must not be empty")]
pub struct EmptyDescription;

/// A single to-do entry as persisted in the item collection.
///
/// `tags` and `deadline` default when missing from a stored document;
/// provisioning seeds omit them for some items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    /// Sequential id handed out by the persisted counter. `0` until
    /// [`insert`](crate::application::todo_dao::TodoItemDao::insert)
    /// assigns one.
    pub id: i64,
    pub description: String,
    /// Ordered labels; order matters for equality.
    #[serde(default)]
    pub tags: Vec<String>,
    /// RFC 2822 UTC timestamp, e.g. `Mon, 01 Jan 2001 00:00:00 GMT`.
    /// Empty string when the item has no deadline.
    #[serde(default)]
    pub deadline: String,
}

impl TodoItem {
    /// Sentinel id of an item that has not been inserted yet.
    pub const UNASSIGNED_ID: i64 = 0;

    /// Creates an unassigned item with no tags and no deadline.
    pub fn new(description: impl Into<String>) -> Result<Self, EmptyDescription> {
        let description = description.into();
        if description.is_empty() {
            return Err(EmptyDescription);
        }
        Ok(Self {
            id: Self::UNASSIGNED_ID,
            description,
            tags: Vec::new(),
            deadline: String::new(),
        })
    }

    /// Validity rule: the description has at least one character.
    pub fn is_valid(&self) -> bool {
        !self.description.is_empty()
    }

    /// The deadline as a point in time. `None` for the empty string or any
    /// value that does not parse as RFC 2822.
    pub fn parsed_deadline(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc2822(&self.deadline).ok()
    }
}

/// Items are equal iff `id`, `description`, parsed `deadline`, and `tags`
/// (order-sensitive) all match. Two items without a parseable deadline are
/// equal on that component.
impl PartialEq for TodoItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.description == other.description
            && self.parsed_deadline() == other.parsed_deadline()
            && self.tags == other.tags
    }
}

impl Eq for TodoItem {}
