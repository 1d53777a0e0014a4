// config.rs
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{AppError, Result};
use crate::services::request_cache::CachePolicy;

const DEFAULT_DATABASE_NAME: &str = "fa_stats";
const DEFAULT_RANKING_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub host: String,
    pub port: u16,
    /// Ready cache entries older than this are refetched. Unset means never.
    pub cache_ttl: Option<Duration>,
    /// Upper bound on ready entries per cache. Unset means unbounded.
    pub cache_max_entries: Option<usize>,
    pub ranking_default_limit: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::configuration("DATABASE_URL must be set"))?;

        let config = AppConfig {
            database_url,
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT")?.unwrap_or(10000),
            cache_ttl: parse_var::<u64>("CACHE_TTL_SECS")?.map(Duration::from_secs),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")?,
            ranking_default_limit: parse_var("RANKING_DEFAULT_LIMIT")?
                .unwrap_or(DEFAULT_RANKING_LIMIT),
        };

        tracing::info!(
            "Config loaded: db={} ttl={:?} max_entries={:?}",
            config.database_name,
            config.cache_ttl,
            config.cache_max_entries
        );

        Ok(config)
    }

    /// Defaults suitable for tests and local runs without an environment.
    pub fn local(database_url: impl Into<String>) -> Self {
        AppConfig {
            database_url: database_url.into(),
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            host: "127.0.0.1".to_string(),
            port: 10000,
            cache_ttl: None,
            cache_max_entries: None,
            ranking_default_limit: DEFAULT_RANKING_LIMIT,
        }
    }

    pub fn cache_policy(&self) -> CachePolicy {
        CachePolicy {
            ttl: self.cache_ttl,
            max_entries: self.cache_max_entries,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AppError::configuration(format!("{} must be a number, got '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}
