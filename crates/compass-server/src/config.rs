//! Server configuration
//!
//! Collected once from the environment at startup and injected everywhere
//! needed; nothing reads env vars after boot.

use anyhow::{Context, Result};

/// Default OpenAI model when COMPASS_OPENAI_MODEL is unset
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default bind address when COMPASS_BIND_ADDR is unset
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string
    pub database_url: String,
    /// Socket address the server listens on
    pub bind_addr: String,
    /// OpenAI API key; generation endpoints are disabled when absent
    pub openai_api_key: Option<String>,
    /// Chat model used for all generation operations
    pub openai_model: String,
    /// Secret for signing bearer tokens
    pub auth_secret: String,
    /// Password accepted by the development login; login is disabled when
    /// absent
    pub mock_password: Option<String>,
}

impl Config {
    /// Load configuration from the environment (after `dotenvy` has run).
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let bind_addr = std::env::var("COMPASS_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty());
        let openai_model = std::env::var("COMPASS_OPENAI_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let auth_secret =
            std::env::var("COMPASS_AUTH_SECRET").context("COMPASS_AUTH_SECRET must be set")?;
        let mock_password = std::env::var("COMPASS_MOCK_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        Ok(Self {
            database_url,
            bind_addr,
            openai_api_key,
            openai_model,
            auth_secret,
            mock_password,
        })
    }
}
