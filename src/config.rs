// src/config.rs
use crate::errors::ServerError;
use std::env;
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite file holding projects, tiers, sales and saved reports.
    pub db_path: String,
    /// Schema applied on start-up.
    pub schema_path: String,
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: "sales.sqlite3".to_string(),
            schema_path: "sql/schema.sql".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `SALES_*` environment variables.
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(path) = lookup("SALES_DB_PATH") {
            cfg.db_path = path;
        }
        if let Some(path) = lookup("SALES_SCHEMA_PATH") {
            cfg.schema_path = path;
        }
        if let Some(addr) = lookup("SALES_BIND_ADDR") {
            cfg.bind_addr = addr
                .parse()
                .map_err(|e| ServerError::Validation(format!("SALES_BIND_ADDR '{addr}': {e}")))?;
        }
        if let Some(workers) = lookup("SALES_MAX_WORKERS") {
            cfg.max_workers = match workers.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ServerError::Validation(format!(
                        "SALES_MAX_WORKERS must be a positive integer, got '{workers}'"
                    )))
                }
            };
        }

        Ok(cfg)
    }
}
