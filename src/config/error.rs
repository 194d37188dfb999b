//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

/// Loading or checking the configuration failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] InvalidSetting),
}

/// A setting that parsed but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSetting {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("server.port must not be 0")]
    Port,

    #[error("server.host '{0}' is not an IP address")]
    Host(String),

    #[error("server.request_timeout_secs must be between 1 and {max}, got {actual}")]
    RequestTimeout { actual: u64, max: u64 },

    #[error("database.url must start with postgres:// or postgresql://")]
    DatabaseScheme,

    #[error("database pool of {min}..{max} connections is not allowed")]
    PoolSize { min: u32, max: u32 },

    #[error("catalog.common_questions_path {} is not a file", .0.display())]
    CommonQuestionsFile(PathBuf),

    #[error("session.{0} must be greater than zero")]
    ZeroDuration(&'static str),
}
