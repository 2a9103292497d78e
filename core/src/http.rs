//! Plain-data HTTP messages exchanged with the todo API.
//!
//! The client never performs I/O. It hands the host an `HttpRequest` and
//! later receives the matching `HttpResponse`:
//!
//! | Operation | Method   | Path               | Body               |
//! |-----------|----------|--------------------|--------------------|
//! | list      | `GET`    | `/api/todo`        | none               |
//! | create    | `POST`   | `/api/todo`        | `{"text": ...}`    |
//! | update    | `PATCH`  | `/api/todo/{id}/`  | `{"done": ...}`    |
//! | delete    | `DELETE` | `/api/todo/{id}/`  | none               |
//!
//! Every success is a 200. Error responses carry an empty body, so the
//! status alone decides the `ApiError` variant.

/// The four methods the API answers. Anything else gets a 405.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// Request for the host to execute. `path` is absolute (base URL included);
/// `body` is JSON and comes with a `content-type` header when present.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// What the host got back. Headers are informational; parsing reads only
/// `status` and `body`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
