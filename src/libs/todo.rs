//! Todo record and status types.
//!
//! A [`Todo`] is the unit persisted by the store: an immutable `id` assigned
//! on creation, free-form `content`, and a [`TodoStatus`] drawn from a closed
//! set. Both types serialize to the JSON shape exposed over HTTP and written
//! to the backing file:
//!
//! ```json
//! {"id": 1, "content": "buy milk", "status": "active"}
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    /// Newly created, not yet done. Every todo starts here.
    #[default]
    Active,
    /// Marked as done.
    Completed,
}

impl TodoStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TodoStatus::Active => "active",
            TodoStatus::Completed => "completed",
        }
    }

    /// Parses a status value, returning `None` for anything outside the legal set.
    ///
    /// Matching is exact: `"Active"` or `" active"` are not legal values.
    pub fn parse(value: &str) -> Option<TodoStatus> {
        value.parse().ok()
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(TodoStatus::Active),
            "completed" => Ok(TodoStatus::Completed),
            _ => Err(()),
        }
    }
}

/// A single persisted todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub content: String,
    pub status: TodoStatus,
}

impl Todo {
    pub fn new(id: i64, content: &str) -> Self {
        Todo {
            id,
            content: content.to_string(),
            status: TodoStatus::default(),
        }
    }
}

/// Returns `true` when `content` is empty or whitespace only.
pub fn is_blank(content: &str) -> bool {
    content.trim().is_empty()
}
