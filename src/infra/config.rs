//! Centralized configuration (environment variables + defaults).

use anyhow::{anyhow, Context};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_LOG_FILTER: &str = "info";

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub storage: StorageBackend,
    /// Required for [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    /// Deadline applied to every request's library call.
    pub request_timeout: Duration,
    /// `EnvFilter` directive, e.g. `info` or `game_library_api=debug`.
    pub log_filter: String,
}

impl AppConfig {
    /// Reads `.env` (if present) and then the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = match var("STORAGE_BACKEND").as_deref().map(str::trim) {
            None | Some("postgres") => StorageBackend::Postgres,
            Some("memory") => StorageBackend::Memory,
            Some(other) => {
                return Err(anyhow!(
                    "STORAGE_BACKEND must be 'postgres' or 'memory', got '{}'",
                    other
                ))
            }
        };

        let database_url = var("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set"));
        }

        let db_max_connections = match var("DB_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .context("DB_MAX_CONNECTIONS must be a valid u32")?
                .max(1),
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let host: IpAddr = var("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .trim()
            .parse()
            .context("HOST must be an IP address")?;
        let port = match var("PORT") {
            Some(v) => v.trim().parse::<u16>().context("PORT must be a valid port")?,
            None => DEFAULT_PORT,
        };

        let request_timeout_secs = match var("REQUEST_TIMEOUT_SECS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a valid u64")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if request_timeout_secs == 0 {
            return Err(anyhow!("REQUEST_TIMEOUT_SECS must be greater than zero"));
        }

        Ok(Self {
            storage,
            database_url,
            db_max_connections,
            bind_addr: SocketAddr::new(host, port),
            request_timeout: Duration::from_secs(request_timeout_secs),
            log_filter: var("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_for_postgres() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/games")]).unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn memory_backend_needs_no_database() {
        let config = config_from(&[
            ("STORAGE_BACKEND", "memory"),
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
        ])
        .unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("STORAGE_BACKEND", "mongo")]).is_err());
        assert!(config_from(&[("STORAGE_BACKEND", "memory"), ("PORT", "eighty")]).is_err());
        assert!(
            config_from(&[("STORAGE_BACKEND", "memory"), ("REQUEST_TIMEOUT_SECS", "0")]).is_err()
        );
    }
}
