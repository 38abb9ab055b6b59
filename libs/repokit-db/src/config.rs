//! Database configuration: pool knobs and figment-based loading.

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};

use crate::Result;

/// Connection pool knobs. Durations deserialize from humantime strings
/// ("30s", "5m").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolCfg {
    pub max_conns: Option<u32>,
    pub min_conns: Option<u32>,
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub idle_timeout: Option<Duration>,
    #[serde(with = "humantime_serde")]
    pub max_lifetime: Option<Duration>,
    pub sqlx_logging: bool,
}

impl Default for PoolCfg {
    fn default() -> Self {
        Self {
            max_conns: Some(10),
            min_conns: None,
            acquire_timeout: Some(Duration::from_secs(30)),
            idle_timeout: None,
            max_lifetime: None,
            sqlx_logging: false,
        }
    }
}

/// Top-level database configuration, read from the `database` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbConfig {
    pub dsn: String,
    #[serde(default)]
    pub pool: PoolCfg,
}

impl DbConfig {
    /// Standard figment for this config: a YAML file overlaid with
    /// `REPOKIT_DB_*` environment variables (`__` as the level separator).
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("REPOKIT_DB_").split("__"))
    }

    /// Extract the configuration from a prepared figment.
    ///
    /// # Errors
    /// Returns `DbError::Config` if the `database` section is missing
    /// or malformed.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        Ok(figment.extract_inner::<Self>("database")?)
    }
}
