//! Store configuration.

use std::env;

/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";
/// Environment variable overriding the pool size.
pub const POOL_SIZE_ENV: &str = "MOVIES_POOL_SIZE";
/// Environment variable overriding the table name.
pub const TABLE_ENV: &str = "MOVIES_TABLE";

pub const DEFAULT_POOL_SIZE: usize = 16;
pub const DEFAULT_TABLE: &str = "movies";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Connection and table settings for the movie store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub max_pool_size: usize,
    /// Table holding movie rows.
    pub table: String,
}

impl StoreConfig {
    /// Create a configuration with defaults for everything but the URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: DEFAULT_POOL_SIZE,
            table: DEFAULT_TABLE.to_string(),
        }
    }

    /// Set the maximum pool size.
    pub fn max_pool_size(mut self, size: usize) -> Self {
        self.max_pool_size = size;
        self
    }

    /// Set the table name. It must be a plain identifier.
    pub fn table(mut self, table: impl Into<String>) -> Result<Self, ConfigError> {
        let table = table.into();
        if !is_plain_identifier(&table) {
            return Err(ConfigError::Invalid {
                name: TABLE_ENV,
                message: format!("'{table}' is not a plain SQL identifier"),
            });
        }
        self.table = table;
        Ok(self)
    }

    /// Read `DATABASE_URL`, `MOVIES_POOL_SIZE` and `MOVIES_TABLE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup(DATABASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_ENV))?;
        let mut config = Self::new(database_url);

        if let Some(raw) = lookup(POOL_SIZE_ENV) {
            let size = raw.trim().parse::<usize>().map_err(|e| ConfigError::Invalid {
                name: POOL_SIZE_ENV,
                message: e.to_string(),
            })?;
            if size == 0 {
                return Err(ConfigError::Invalid {
                    name: POOL_SIZE_ENV,
                    message: "must be at least 1".to_string(),
                });
            }
            config.max_pool_size = size;
        }

        if let Some(table) = lookup(TABLE_ENV) {
            config = config.table(table)?;
        }

        Ok(config)
    }
}

/// Table names are spliced into SQL text, so only `[A-Za-z_][A-Za-z0-9_]*`
/// is accepted.
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
