use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{cap_text, StoreError, Todo, TodoStore};

/// Process-local store. Cloning shares the same underlying items.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: i64,
    todos: BTreeMap<i64, Todo>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn create(&self, text: &str) -> Result<Todo, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let todo = Todo {
            id: inner.last_id,
            text: cap_text(text),
            is_done: false,
            is_archived: false,
        };
        inner.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.todos.values().cloned().collect())
    }

    async fn get(&self, id: i64) -> Result<Todo, StoreError> {
        let inner = self.inner.read().await;
        inner.todos.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn update_done(&self, id: i64, done: bool) -> Result<Todo, StoreError> {
        let mut inner = self.inner.write().await;
        let todo = inner.todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        todo.is_done = done;
        Ok(todo.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .todos
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
