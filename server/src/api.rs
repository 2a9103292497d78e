//! Request handlers for the list page and the JSON API.
//!
//! # Design
//! Bodies are taken as raw bytes and decoded here rather than through
//! axum's `Json` extractor: the contract is a bare 400 for any unusable body
//! regardless of `Content-Type`, whereas the extractor answers 415 or 422.
//! Item ids arrive as strings so a malformed id is indistinguishable from
//! an unknown route (404), not a 400 from the path extractor.

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Html,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::page;
use crate::store::Todo;
use crate::AppState;

pub const COLLECTION_ALLOW: &str = "GET, POST";
pub const ITEM_ALLOW: &str = "PATCH, DELETE";

/// External shape of a todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoView {
    pub id: i64,
    pub text: String,
    pub done: bool,
}

impl From<Todo> for TodoView {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            text: todo.text,
            done: todo.is_done,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(deserialize_with = "string_from_any")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub done: bool,
}

/// Accept any JSON value: strings as-is, everything else as compact JSON.
fn string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Decode a request body that must be a JSON object.
fn parse_body<T: DeserializeOwned>(body: &[u8]) -> ApiResult<T> {
    let object: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    serde_json::from_value(Value::Object(object)).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Ids are plain decimal digits; anything else does not name an item.
fn parse_id(raw: &str) -> ApiResult<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::NotFound);
    }
    raw.parse().map_err(|_| ApiError::NotFound)
}

async fn all_views(state: &AppState) -> ApiResult<Vec<TodoView>> {
    let todos = state.store().list_all().await?;
    Ok(todos.into_iter().map(TodoView::from).collect())
}

pub async fn index(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let todos = all_views(&state).await?;
    Ok(Html(page::render_index(&todos)?))
}

pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<TodoView>>> {
    Ok(Json(all_views(&state).await?))
}

pub async fn create_todo(State(state): State<AppState>, body: Bytes) -> ApiResult<Json<TodoView>> {
    let input: CreateTodoRequest = parse_body(&body)?;
    let todo = state.store().create(input.text.trim()).await?;
    debug!(id = todo.id, "created todo");
    Ok(Json(todo.into()))
}

pub async fn update_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<TodoView>> {
    let id = parse_id(&raw_id)?;
    state.store().get(id).await?;

    let input: UpdateTodoRequest = parse_body(&body)?;
    let todo = state.store().update_done(id, input.done).await?;
    debug!(id, done = input.done, "updated todo");
    Ok(Json(todo.into()))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ApiResult<Json<Map<String, Value>>> {
    let id = parse_id(&raw_id)?;
    state.store().delete(id).await?;
    debug!(id, "deleted todo");
    Ok(Json(Map::new()))
}

pub async fn collection_method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed {
        allow: COLLECTION_ALLOW,
    }
}

pub async fn item_method_not_allowed(Path(raw_id): Path<String>) -> ApiError {
    match parse_id(&raw_id) {
        Ok(_) => ApiError::MethodNotAllowed { allow: ITEM_ALLOW },
        Err(err) => err,
    }
}
