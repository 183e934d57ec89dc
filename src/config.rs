//! Layered runtime configuration.
//!
//! Values are read, lowest precedence first, from the embedded
//! `config/default.toml`, an optional TOML file named by
//! `TASKMARKET_CONFIG_FILE`, and `TASKMARKET__<SECTION>__<KEY>` environment
//! variables. `DATABASE_URL`, when set, replaces the database URL.

use config::{Config, Environment, File, FileFormat};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

const DEFAULTS: &str = include_str!("../config/default.toml");

/// Environment variable naming an optional configuration file.
pub const CONFIG_FILE_VAR: &str = "TASKMARKET_CONFIG_FILE";

/// Prefix of structured environment overrides.
pub const ENV_PREFIX: &str = "TASKMARKET";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// `PostgreSQL` connection pool built from [`DatabaseConfig`].
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Errors raised while loading configuration or building the pool.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A loaded value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// The connection pool could not be created.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout_secs: u64,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output.
    Pretty,
    /// One JSON object per event.
    Json,
    /// Single-line human-readable output.
    Compact,
}

impl MarketConfig {
    /// Loads configuration from the defaults, the optional file, and the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when a source is malformed and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(File::from_str(DEFAULTS, FileFormat::Toml));
        if let Ok(path) = env::var(CONFIG_FILE_VAR) {
            builder = builder.add_source(
                File::with_name(&path)
                    .required(false)
                    .format(FileFormat::Toml),
            );
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut loaded: Self = builder.build()?.try_deserialize()?;
        if let Ok(url) = env::var("DATABASE_URL") {
            loaded.database.url = url;
        }
        loaded.validate()?;
        Ok(loaded)
    }

    /// Loads the defaults overlaid with `overrides`, a TOML document.
    ///
    /// The process environment is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when `overrides` is malformed and
    /// [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_toml_str(overrides: &str) -> Result<Self, ConfigError> {
        let loaded: Self = Config::builder()
            .add_source(File::from_str(DEFAULTS, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".to_owned()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".to_owned(),
            ));
        }
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "logging.level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout_secs)
    }

    /// Builds a connection pool for the configured database.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the initial connections cannot be
    /// established.
    pub fn build_pool(&self) -> Result<PgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.url.as_str());
        let pool = Pool::builder()
            .max_size(self.max_connections)
            .connection_timeout(self.connection_timeout())
            .build(manager)?;
        Ok(pool)
    }
}
