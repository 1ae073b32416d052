//! Store configuration.
//!
//! A [`Config`] value says where the database lives and how the connection
//! pool behaves. It is read once by the binary and handed to
//! [`Db::new`](crate::db::db::Db::new); nothing in the crate keeps global
//! configuration state.
//!
//! ## Sources
//!
//! Values are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. `config.json` in the platform data directory ([`Config::read`])
//! 3. `TASKDECK_*` environment variables ([`Config::with_env`]); the binary
//!    loads a `.env` file into the environment first
//!
//! ```rust,no_run
//! use taskdeck::libs::config::Config;
//!
//! let config = Config::read()?.with_env()?;
//! println!("pool size: {}", config.pool_size);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Default database file name inside the data directory.
pub const DB_FILE_NAME: &str = "taskdeck.db";

/// `db_path` value selecting a private in-memory database.
pub const MEMORY_DB_PATH: &str = ":memory:";

pub const ENV_DB_PATH: &str = "TASKDECK_DB_PATH";
pub const ENV_POOL_SIZE: &str = "TASKDECK_POOL_SIZE";
pub const ENV_BUSY_TIMEOUT_MS: &str = "TASKDECK_BUSY_TIMEOUT_MS";
pub const ENV_CONNECTION_TIMEOUT_MS: &str = "TASKDECK_CONNECTION_TIMEOUT_MS";

/// Where the database lives once the configuration is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Database file. `None` uses `taskdeck.db` in the data directory;
    /// `":memory:"` selects an in-memory database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// Maximum number of pooled connections. Forced to 1 for in-memory
    /// databases, which are private to their connection.
    pub pool_size: u32,

    /// How long a statement waits on a locked database before failing.
    pub busy_timeout_ms: u32,

    /// How long a caller waits to check a connection out of the pool.
    pub connection_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: None,
            pool_size: 8,
            busy_timeout_ms: 5_000,
            connection_timeout_ms: 5_000,
        }
    }
}

impl Config {
    /// Configuration for a throwaway in-memory store.
    pub fn in_memory() -> Self {
        Config {
            db_path: Some(PathBuf::from(MEMORY_DB_PATH)),
            pool_size: 1,
            ..Config::default()
        }
    }

    /// Configuration for a database file at `path`.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Config {
            db_path: Some(path.into()),
            ..Config::default()
        }
    }

    /// Reads `config.json` from the data directory, or the defaults when
    /// the file does not exist.
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::file_path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_str).with_context(|| format!("failed to parse {}", path.display()))?;
        config.validate().with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Writes the configuration to `config.json` in the data directory and
    /// returns the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Overlays `TASKDECK_*` environment variables.
    pub fn with_env(self) -> Result<Config> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Overlays values from `lookup`, keyed by the `TASKDECK_*` names.
    /// Empty values are ignored; unparsable numbers are an error.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_of = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = value_of(ENV_DB_PATH) {
            self.db_path = Some(PathBuf::from(path));
        }
        if let Some(value) = value_of(ENV_POOL_SIZE) {
            self.pool_size = parse_number(ENV_POOL_SIZE, &value)?;
        }
        if let Some(value) = value_of(ENV_BUSY_TIMEOUT_MS) {
            self.busy_timeout_ms = parse_number(ENV_BUSY_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = value_of(ENV_CONNECTION_TIMEOUT_MS) {
            self.connection_timeout_ms = parse_number(ENV_CONNECTION_TIMEOUT_MS, &value)?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Rejects values the connection pool cannot be built with.
    pub fn validate(&self) -> Result<()> {
        if self.connection_timeout_ms == 0 {
            bail!("connection_timeout_ms must be greater than zero");
        }
        Ok(())
    }

    /// Resolves `db_path` into a concrete location.
    pub fn location(&self) -> std::io::Result<StoreLocation> {
        match &self.db_path {
            Some(path) if path.as_os_str() == MEMORY_DB_PATH => Ok(StoreLocation::Memory),
            Some(path) => Ok(StoreLocation::File(path.clone())),
            None => Ok(StoreLocation::File(DataStorage::new().get_path(DB_FILE_NAME)?)),
        }
    }

    fn file_path() -> Result<PathBuf> {
        Ok(DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }
}

fn parse_number<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse::<T>().with_context(|| format!("{} must be a non-negative integer, got '{}'", key, value))
}
