//! Runtime configuration read from environment variables.
//!
//! | Variable            | Default                      |
//! |---------------------|------------------------------|
//! | `HOST`              | `127.0.0.1`                  |
//! | `PORT`              | `3000`                       |
//! | `TODO_DATABASE_URL` | `sqlite://todo.db?mode=rwc`  |
//! | `TODO_CSRF_SECURE`  | `false`                      |
//!
//! `TODO_DATABASE_URL=memory` selects the in-memory store.

use crate::csrf::CsrfConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db?mode=rwc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub csrf_secure: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid { key: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let store = match get("TODO_DATABASE_URL") {
            Some(url) if url.eq_ignore_ascii_case("memory") => StoreBackend::Memory,
            Some(url) if url.starts_with("sqlite:") => StoreBackend::Sqlite(url),
            Some(url) => {
                return Err(ConfigError::Invalid {
                    key: "TODO_DATABASE_URL",
                    value: url,
                })
            }
            None => StoreBackend::Sqlite(DEFAULT_DATABASE_URL.to_string()),
        };

        let csrf_secure = match get("TODO_CSRF_SECURE") {
            Some(raw) => parse_flag(&raw).ok_or(ConfigError::Invalid {
                key: "TODO_CSRF_SECURE",
                value: raw,
            })?,
            None => false,
        };

        Ok(Self {
            host,
            port,
            store,
            csrf_secure,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn csrf(&self) -> CsrfConfig {
        CsrfConfig {
            secure: self.csrf_secure,
            ..CsrfConfig::default()
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
