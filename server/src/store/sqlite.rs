use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;

use super::{cap_text, StoreError, Todo, TodoStore};

const CREATE_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS todo (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    text VARCHAR(200) NOT NULL,
    is_done BOOLEAN NOT NULL DEFAULT 0,
    is_archived BOOLEAN NOT NULL DEFAULT 0
)";

const COLUMNS: &str = "id, text, is_done, is_archived";

/// Store backed by a single SQLite table named `todo`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `url` (e.g. `sqlite://todo.db` or `sqlite::memory:`),
    /// creating the database file and the `todo` table when missing.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // Every connection to an in-memory database sees its own empty
        // database, so the pool must hold exactly one that never expires.
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the `todo` table when missing.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }
}

fn todo_from_row(row: &SqliteRow) -> Result<Todo, sqlx::Error> {
    Ok(Todo {
        id: row.try_get("id")?,
        text: row.try_get("text")?,
        is_done: row.try_get("is_done")?,
        is_archived: row.try_get("is_archived")?,
    })
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn create(&self, text: &str) -> Result<Todo, StoreError> {
        let sql = format!(
            "INSERT INTO todo (text, is_done, is_archived) VALUES (?, 0, 0) RETURNING {COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(cap_text(text))
            .fetch_one(&self.pool)
            .await?;
        Ok(todo_from_row(&row)?)
    }

    async fn list_all(&self) -> Result<Vec<Todo>, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM todo ORDER BY id");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|row| todo_from_row(row).map_err(StoreError::from))
            .collect()
    }

    async fn get(&self, id: i64) -> Result<Todo, StoreError> {
        let sql = format!("SELECT {COLUMNS} FROM todo WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))?;
        Ok(todo_from_row(&row)?)
    }

    async fn update_done(&self, id: i64, done: bool) -> Result<Todo, StoreError> {
        let sql = format!("UPDATE todo SET is_done = ? WHERE id = ? RETURNING {COLUMNS}");
        let row = sqlx::query(&sql)
            .bind(done)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))?;
        Ok(todo_from_row(&row)?)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
