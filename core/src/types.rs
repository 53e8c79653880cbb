//! Records exchanged with the remote todo/user service.
//!
//! Field names follow the service's camelCase JSON (`userId`). Unknown fields
//! are ignored, so the richer user objects the public service returns decode
//! into the two fields this client needs.

use serde::{Deserialize, Serialize};

pub type TodoId = u64;
pub type UserId = u64;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub title: String,
    pub completed: bool,
}

/// A named owner of todos. Read-only for this client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// Request payload for creating a new todo. The service assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoDraft {
    pub user_id: UserId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl TodoDraft {
    /// A draft as submitted from the form: never completed.
    pub fn new(user_id: UserId, title: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Partial-update payload; only the completion flag is ever patched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionPatch {
    pub completed: bool,
}
