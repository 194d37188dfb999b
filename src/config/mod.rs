//! Runtime configuration
//!
//! Read from the environment (and `.env` when present) with the
//! `INSURANCE_QUALIFIER` prefix; `__` separates nesting levels:
//!
//! - `INSURANCE_QUALIFIER__SERVER__PORT=3000`
//! - `INSURANCE_QUALIFIER__DATABASE__URL=postgresql://...`
//! - `INSURANCE_QUALIFIER__CATALOG__SOURCE=postgres`
//! - `INSURANCE_QUALIFIER__CATALOG__COMMON_QUESTIONS_PATH=/etc/qualifier/common.yaml`
//! - `INSURANCE_QUALIFIER__SESSION__IDLE_TIMEOUT_SECS=900`
//!
//! Loading only parses. Call [`AppConfig::validate`] before using the values.

mod catalog;
mod database;
mod error;
mod server;
mod session;

pub use catalog::{CatalogConfig, CatalogSourceKind};
pub use database::DatabaseConfig;
pub use error::{ConfigError, InvalidSetting};
pub use server::{Environment, ServerConfig};
pub use session::SessionConfig;

use serde::Deserialize;

const ENV_PREFIX: &str = "INSURANCE_QUALIFIER";

/// An empty environment gives a server on port 8080 serving the built-in
/// catalog with no database.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: Option<DatabaseConfig>,
    pub catalog: CatalogConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let loaded = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;
        Ok(loaded)
    }

    /// Checks each section, then the cross-section rule that a Postgres
    /// catalog needs a database.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        if let Some(database) = &self.database {
            database.validate()?;
        }
        self.catalog.validate()?;
        self.session.validate()?;

        if self.catalog.source == CatalogSourceKind::Postgres && self.database.is_none() {
            return Err(InvalidSetting::Missing("database.url").into());
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
