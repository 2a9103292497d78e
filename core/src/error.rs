//! Error types for the todo API client.
//!
//! # Design
//! 404 and 400 get dedicated variants because the server uses them for
//! "no such item" and "request body rejected", and its error bodies are
//! empty. All other unexpected statuses land in `HttpError` with the raw
//! status code and body for debugging.

/// Errors returned by `TodoClient` build and parse methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400: the request body was rejected.
    #[error("request rejected by server")]
    BadRequest,

    /// The server returned an unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
