//! HTTP service for a single-table todo list.
//!
//! # Overview
//! Serves an HTML list page at `/` and a JSON API under `/api/todo`:
//! list and create on the collection, toggle completion and delete on
//! `/api/todo/{id}/`. All state lives behind the `TodoStore` handed in
//! through `AppState`; handlers keep nothing between requests.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod api;
pub mod config;
pub mod csrf;
pub mod error;
pub mod page;
pub mod store;

pub use api::TodoView;
pub use config::Config;
pub use csrf::CsrfConfig;
pub use error::ApiError;
pub use store::{MemoryStore, SqliteStore, StoreError, Todo, TodoStore};

/// Shared, cheaply cloneable handle passed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TodoStore>,
    csrf: CsrfConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, csrf: CsrfConfig) -> Self {
        Self { store, csrf }
    }

    /// State over a fresh `MemoryStore` with default CSRF settings.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), CsrfConfig::default())
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }
}

pub fn app(state: AppState) -> Router {
    let page = Router::new().route("/", get(api::index)).route_layer(
        middleware::from_fn_with_state(state.csrf.clone(), csrf::issue_cookie),
    );

    Router::new()
        .merge(page)
        .route(
            "/api/todo",
            get(api::list_todos)
                .post(api::create_todo)
                .head(api::collection_method_not_allowed)
                .fallback(api::collection_method_not_allowed),
        )
        .route(
            "/api/todo/{id}/",
            patch(api::update_todo)
                .delete(api::delete_todo)
                .fallback(api::item_method_not_allowed),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl-C.
pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(err) => {
            warn!(error = %err, "cannot listen for ctrl-c; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
