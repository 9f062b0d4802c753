//! Listener settings read from `SERVER_*` variables.

use super::{ConfigError, verbatim_env};
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Listener and CORS settings for the hosting router.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Comma-separated CORS allow-list.
    pub allowed_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            allowed_origins: "http://localhost:4173,http://localhost:5173".to_owned(),
        }
    }
}

impl ServerConfig {
    /// Provider chain: defaults overlaid by `SERVER_*` variables.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("SERVER_").ignore(&["allowed_origins"]))
            .merge(verbatim_env("SERVER_", &["allowed_origins"]))
    }

    /// Extracts and validates settings from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or the port is 0.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        if config.port == 0 {
            return Err(ConfigError::invalid("port", "must be between 1 and 65535"));
        }
        Ok(config)
    }

    /// Loads settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or the port is 0.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Allowed origins, trimmed, blanks skipped.
    pub fn allowed_origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }

    /// Whether `origin` exactly matches an allow-listed origin.
    #[must_use]
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins().any(|allowed| allowed == origin)
    }
}
