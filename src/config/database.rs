//! PostgreSQL pool settings
//!
//! The section is optional. Without it the built-in catalog is served and
//! answers only reach the log.

use serde::Deserialize;
use std::time::Duration;

use super::error::InvalidSetting;

const MAX_POOL_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,

    /// Apply `migrations/` before serving.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: 1,
            max_connections: 10,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 600,
            run_migrations: false,
        }
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), InvalidSetting> {
        if self.url.is_empty() {
            return Err(InvalidSetting::Missing("database.url"));
        }
        if !["postgres://", "postgresql://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
        {
            return Err(InvalidSetting::DatabaseScheme);
        }

        let (min, max) = (self.min_connections, self.max_connections);
        if max == 0 || min > max || max > MAX_POOL_SIZE {
            return Err(InvalidSetting::PoolSize { min, max });
        }
        Ok(())
    }
}
