use std::time::Duration;

use tfe_core::rate_limit::{RateBudget, RateBudgets};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session token verification.
    pub jwt: JwtConfig,
    /// Per-caller budgets for the throttled admin mutations.
    pub rate_limits: RateLimitConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3001`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`RateLimitConfig::from_env`] for the
    /// nested sections.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            rate_limits: RateLimitConfig::from_env(),
        }
    }
}

/// Fixed-window budgets for draft upserts, CSV imports and publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub window_secs: u64,
    pub upsert_draft: u32,
    pub import_csv: u32,
    pub publish: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            upsert_draft: 50,
            import_csv: 5,
            publish: 2,
        }
    }
}

impl RateLimitConfig {
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `RATE_LIMIT_WINDOW_SECS`  | `60`    |
    /// | `RATE_LIMIT_UPSERT_DRAFT` | `50`    |
    /// | `RATE_LIMIT_IMPORT_CSV`   | `5`     |
    /// | `RATE_LIMIT_PUBLISH`      | `2`     |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let window_secs: u64 = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| defaults.window_secs.to_string())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid u64");
        assert!(window_secs > 0, "RATE_LIMIT_WINDOW_SECS must be positive");

        let upsert_draft: u32 = std::env::var("RATE_LIMIT_UPSERT_DRAFT")
            .unwrap_or_else(|_| defaults.upsert_draft.to_string())
            .parse()
            .expect("RATE_LIMIT_UPSERT_DRAFT must be a valid u32");

        let import_csv: u32 = std::env::var("RATE_LIMIT_IMPORT_CSV")
            .unwrap_or_else(|_| defaults.import_csv.to_string())
            .parse()
            .expect("RATE_LIMIT_IMPORT_CSV must be a valid u32");

        let publish: u32 = std::env::var("RATE_LIMIT_PUBLISH")
            .unwrap_or_else(|_| defaults.publish.to_string())
            .parse()
            .expect("RATE_LIMIT_PUBLISH must be a valid u32");

        Self {
            window_secs,
            upsert_draft,
            import_csv,
            publish,
        }
    }

    pub fn budgets(&self) -> RateBudgets {
        let window = Duration::from_secs(self.window_secs);
        RateBudgets {
            upsert_draft: RateBudget::per_window(self.upsert_draft, window),
            import_csv: RateBudget::per_window(self.import_csv, window),
            publish: RateBudget::per_window(self.publish, window),
        }
    }
}
