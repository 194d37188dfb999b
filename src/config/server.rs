//! HTTP listener settings

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use super::error::InvalidSetting;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Deployment environment. Production switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub log_level: String,

    pub request_timeout_secs: u64,

    /// Comma-separated allowed origins. Empty allows any origin.
    pub cors_origins: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,insurance_qualifier=debug,sqlx=warn".into(),
            request_timeout_secs: 30,
            cors_origins: String::new(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, InvalidSetting> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| InvalidSetting::Host(self.host.clone()))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn cors_origins(&self) -> impl Iterator<Item = &str> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }

    pub fn validate(&self) -> Result<(), InvalidSetting> {
        if self.port == 0 {
            return Err(InvalidSetting::Port);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(InvalidSetting::RequestTimeout {
                actual: self.request_timeout_secs,
                max: MAX_REQUEST_TIMEOUT_SECS,
            });
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces_on_8080() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.is_production());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn hostnames_are_not_resolved() {
        let config = ServerConfig {
            host: "localhost".into(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(InvalidSetting::Host("localhost".into()))
        );
    }

    #[test]
    fn cors_origins_skip_blanks() {
        let config = ServerConfig {
            cors_origins: "http://localhost:5173, ,http://localhost:3000,".into(),
            ..Default::default()
        };
        let origins: Vec<_> = config.cors_origins().collect();
        assert_eq!(origins, ["http://localhost:5173", "http://localhost:3000"]);
        assert_eq!(ServerConfig::default().cors_origins().count(), 0);
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(InvalidSetting::Port));
    }

    #[test]
    fn request_timeout_must_be_in_range() {
        for secs in [0, 301] {
            let config = ServerConfig {
                request_timeout_secs: secs,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(InvalidSetting::RequestTimeout { .. })
            ));
        }
    }
}
