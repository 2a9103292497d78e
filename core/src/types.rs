//! Wire DTOs for the todo API.

use serde::{Deserialize, Serialize};

/// A single todo item as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

/// Body of `POST /api/todo`. The server trims `text`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

/// Body of `PATCH /api/todo/{id}/`. Completion is the only mutable field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodo {
    pub done: bool,
}
