//! Environment configuration for the store and the hosting service.
//!
//! Sources, highest priority first:
//! 1. Process environment (`DB_*` for the store, `SERVER_*` for the
//!    listener)
//! 2. A `.env` file, when loaded through [`WorkLogConfig::load_with_dotenv`]
//! 3. Built-in defaults

mod database;
mod error;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;

use figment::providers::{Env, Serialized};
use std::collections::BTreeMap;
use tracing::debug;

/// Reads `keys` under `prefix` exactly as set.
///
/// [`Env`] parses values, so `0123` becomes the integer 123 and `true` a
/// boolean. Merging this after the parsed provider keeps text fields
/// verbatim.
fn verbatim_env(prefix: &str, keys: &[&str]) -> Serialized<BTreeMap<String, String>> {
    let values = Env::prefixed(prefix)
        .only(keys)
        .iter()
        .map(|(key, value)| (key.as_str().to_owned(), value))
        .collect();
    Serialized::defaults(values)
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkLogConfig {
    /// Store settings.
    pub database: DatabaseConfig,
    /// Listener settings.
    pub server: ServerConfig,
}

impl WorkLogConfig {
    /// Loads both sections from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value fails to parse or validate.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            database: DatabaseConfig::load()?,
            server: ServerConfig::load()?,
        })
    }

    /// Loads `.env` from the working directory, then the environment.
    ///
    /// Existing process variables win over `.env` entries. A missing file
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value fails to parse or validate.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "loaded .env"),
            Err(err) => debug!(error = %err, "no .env loaded"),
        }
        Self::load()
    }
}
