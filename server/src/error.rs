//! Request-level errors and their HTTP mapping.
//!
//! Every error response has an empty body; the status code (and `Allow`
//! for 405) is the whole contract. Details go to the log instead.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body was not JSON, not an object, or lacked a required field.
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed { allow: &'static str },

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("failed to render response: {0}")]
    Render(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(reason) => {
                debug!(%reason, "rejected request body");
                StatusCode::BAD_REQUEST.into_response()
            }
            ApiError::NotFound | ApiError::Storage(StoreError::NotFound(_)) => {
                StatusCode::NOT_FOUND.into_response()
            }
            ApiError::MethodNotAllowed { allow } => {
                (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, allow)]).into_response()
            }
            ApiError::Storage(err @ StoreError::Unavailable(_)) => {
                error!(error = %err, "store call failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            ApiError::Render(err) => {
                error!(error = %err, "response rendering failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
