//! In-memory session retention

use serde::Deserialize;
use std::time::Duration;

use super::error::InvalidSetting;

/// Sessions untouched for `idle_timeout_secs` are dropped by a background
/// sweep every `eviction_interval_secs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,
    pub eviction_interval_secs: u64,

    /// How long a request waits on the recorder before responding. Slower
    /// writes finish in the background and are not reported. 0 never waits.
    pub recorder_wait_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 30 * 60,
            eviction_interval_secs: 60,
            recorder_wait_ms: 250,
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn eviction_interval(&self) -> Duration {
        Duration::from_secs(self.eviction_interval_secs)
    }

    pub fn recorder_wait(&self) -> Duration {
        Duration::from_millis(self.recorder_wait_ms)
    }

    pub fn validate(&self) -> Result<(), InvalidSetting> {
        if self.idle_timeout_secs == 0 {
            return Err(InvalidSetting::ZeroDuration("idle_timeout_secs"));
        }
        if self.eviction_interval_secs == 0 {
            return Err(InvalidSetting::ZeroDuration("eviction_interval_secs"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_sessions_for_half_an_hour() {
        let config = SessionConfig::default();
        assert_eq!(config.idle_timeout(), Duration::from_secs(1800));
        assert_eq!(config.eviction_interval(), Duration::from_secs(60));
        assert_eq!(config.recorder_wait(), Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_durations_are_rejected() {
        let idle = SessionConfig {
            idle_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(
            idle.validate(),
            Err(InvalidSetting::ZeroDuration("idle_timeout_secs"))
        );

        let sweep = SessionConfig {
            eviction_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(
            sweep.validate(),
            Err(InvalidSetting::ZeroDuration("eviction_interval_secs"))
        );
    }
}
