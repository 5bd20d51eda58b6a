// Server configuration loaded from environment variables
// Decision: Leaving DATABASE_URL unset selects the in-memory store (dev mode)

use axum::http::HeaderValue;

use crate::auth::AuthConfig;

/// Default listen address
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";

/// Default log filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "eventhub_control_plane=debug,tower_http=debug";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// PostgreSQL connection string; None runs on the in-memory store
    pub database_url: Option<String>,
    pub bind_addr: String,
    /// Prefix for all API routes, e.g. "/api" gives /api/v1/events
    pub api_prefix: String,
    /// Origins allowed to call the API cross-origin. Empty disables CORS.
    pub cors_origins: Vec<HeaderValue>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty());

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let api_prefix = std::env::var("API_PREFIX").unwrap_or_default();

        let cors_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_default();

        Self {
            database_url,
            bind_addr,
            api_prefix,
            cors_origins,
            auth: AuthConfig::from_env(),
        }
    }
}

/// Parse a comma-separated origin list, skipping blanks and invalid values
fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}
