//! Persistence for todo items.
//!
//! # Design
//! Handlers never touch a backend directly; they receive an
//! `Arc<dyn TodoStore>` through `AppState`. Two backends implement the
//! trait: `MemoryStore` (process-local, used by tests and `memory` config)
//! and `SqliteStore` (one `todo` table). Both assign ids in strictly
//! increasing order and return items in insertion order.
//!
//! Each method is a single atomic operation, so callers never observe a
//! partially applied change.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::StoreBackend;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Maximum number of characters kept in `Todo::text`.
pub const TEXT_MAX_CHARS: usize = 200;

/// A stored todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub is_done: bool,
    /// Persisted but not read or written by any request handler.
    pub is_archived: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(i64),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Persist a new item with `is_done` and `is_archived` unset. Text longer
    /// than `TEXT_MAX_CHARS` is truncated.
    async fn create(&self, text: &str) -> Result<Todo, StoreError>;

    /// Every item, oldest first.
    async fn list_all(&self) -> Result<Vec<Todo>, StoreError>;

    async fn get(&self, id: i64) -> Result<Todo, StoreError>;

    async fn update_done(&self, id: i64, done: bool) -> Result<Todo, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

/// Clamp `text` to the storage column width.
pub(crate) fn cap_text(text: &str) -> String {
    match text.char_indices().nth(TEXT_MAX_CHARS) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}

/// Open the backend selected by configuration.
pub async fn open(backend: &StoreBackend) -> Result<Arc<dyn TodoStore>, StoreError> {
    match backend {
        StoreBackend::Memory => {
            info!("using in-memory todo store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Sqlite(url) => {
            let store = SqliteStore::connect(url).await?;
            info!(%url, "connected to sqlite todo store");
            Ok(Arc::new(store))
        }
    }
}
