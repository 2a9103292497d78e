//! CSRF cookie issuance for the HTML list page.
//!
//! The page's scripts read the `csrftoken` cookie and echo it back on
//! unsafe requests. This layer only hands the cookie out; the JSON API does
//! not validate it.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::warn;
use uuid::Uuid;

/// 52 weeks.
const DEFAULT_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 7 * 52;

#[derive(Debug, Clone)]
pub struct CsrfConfig {
    pub cookie_name: String,
    pub max_age_secs: u64,
    /// Add the `Secure` attribute (HTTPS-only deployments).
    pub secure: bool,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            cookie_name: "csrftoken".to_string(),
            max_age_secs: DEFAULT_MAX_AGE_SECS,
            secure: false,
        }
    }
}

impl CsrfConfig {
    fn set_cookie_value(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={token}; Max-Age={}; Path=/; SameSite=Lax",
            self.cookie_name, self.max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

pub fn generate_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Find `name` among the request's `Cookie` headers.
fn request_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// Axum middleware: run the handler, then attach a fresh CSRF cookie unless
/// the client already holds one.
pub async fn issue_cookie(
    State(config): State<CsrfConfig>,
    request: Request,
    next: Next,
) -> Response {
    let has_token = request_cookie(request.headers(), &config.cookie_name)
        .is_some_and(|token| !token.is_empty());

    let mut response = next.run(request).await;
    if has_token {
        return response;
    }

    match HeaderValue::from_str(&config.set_cookie_value(&generate_token())) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(err) => warn!(error = %err, cookie = %config.cookie_name, "invalid csrf cookie"),
    }
    response
}
