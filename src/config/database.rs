//! Store connection settings read from `DB_*` variables.

use super::{ConfigError, verbatim_env};
use crate::worklog::adapters::postgres::WorkLogPgPool;
use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Postgres connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Role to connect as.
    pub username: String,
    /// Role password; may be empty.
    pub password: String,
    /// Database name.
    pub name: String,
    /// libpq `sslmode` value.
    pub sslmode: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 5432,
            username: "postgres".to_owned(),
            password: String::new(),
            name: "worklog".to_owned(),
            sslmode: "disable".to_owned(),
            max_connections: 10,
        }
    }
}

/// Fields kept as text even when the value looks numeric.
const TEXT_FIELDS: [&str; 5] = ["host", "username", "password", "name", "sslmode"];

/// Quotes a libpq keyword value.
fn quoted(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

impl DatabaseConfig {
    /// Provider chain: defaults overlaid by `DB_*` variables.
    ///
    /// Text fields are read verbatim, so `DB_PASSWORD=0123` yields the
    /// password `"0123"`.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("DB_").ignore(&TEXT_FIELDS))
            .merge(verbatim_env("DB_", &TEXT_FIELDS))
    }

    /// Extracts and validates settings from `figment`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Rejects settings that cannot produce a working connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid("host", "must not be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::invalid("port", "must be between 1 and 65535"));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("name", "must not be empty"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::invalid("max_connections", "must be at least 1"));
        }
        Ok(())
    }

    /// libpq keyword/value connection string with quoted values.
    #[must_use]
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            quoted(&self.host),
            self.port,
            quoted(&self.username),
            quoted(&self.password),
            quoted(&self.name),
            quoted(&self.sslmode),
        )
    }

    /// Builds a connection pool sized by `max_connections`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pool`] when the pool cannot open its initial
    /// connections.
    pub fn build_pool(&self) -> Result<WorkLogPgPool, ConfigError> {
        let manager = ConnectionManager::<PgConnection>::new(self.connection_string());
        let pool = Pool::builder()
            .max_size(self.max_connections)
            .build(manager)?;
        Ok(pool)
    }
}
