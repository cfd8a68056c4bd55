//! Configuration module for Connection Hub.
//!
//! Flat, unprefixed environment variables — one `CONNECTION_HUB_*` var
//! per setting, read directly via `std::env::var` (see `DESIGN.md` for
//! why a flat loader was chosen over a nested JSON-merge one).

pub mod logging;

pub use logging::{LogFormat, LoggingConfig};

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub nats_url: String,
    pub realtime_url: String,
    pub realtime_api_key: String,
    pub lock_expires_in_secs: u64,
    pub entity_ttl_secs: u64,
    pub presence_grace_secs: u64,
    pub reconnect_budget_secs: u64,
    pub logging: LoggingConfig,
}

impl Config {
    #[must_use]
    pub fn lock_ttl(&self) -> Duration {
        Duration::from_secs(self.lock_expires_in_secs)
    }

    #[must_use]
    pub fn entity_ttl(&self) -> Duration {
        Duration::from_secs(self.entity_ttl_secs)
    }

    #[must_use]
    pub fn presence_grace(&self) -> Duration {
        Duration::from_secs(self.presence_grace_secs)
    }

    #[must_use]
    pub fn reconnect_budget(&self) -> Duration {
        Duration::from_secs(self.reconnect_budget_secs)
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads configuration from the process environment, falling back to
/// the documented defaults for everything but the realtime client's
/// URL and API key, which have none (see `validate`).
#[must_use]
pub fn load() -> Config {
    Config {
        redis_url: env_string("CONNECTION_HUB_REDIS_URL", "redis://localhost:6379"),
        nats_url: env_string("CONNECTION_HUB_NATS_URL", "nats://localhost:4222"),
        realtime_url: env_string("CONNECTION_HUB_REALTIME_URL", ""),
        realtime_api_key: env_string("CONNECTION_HUB_REALTIME_API_KEY", ""),
        lock_expires_in_secs: env_u64("CONNECTION_HUB_LOCK_EXPIRES_IN_SECS", 5),
        entity_ttl_secs: env_u64("CONNECTION_HUB_ENTITY_TTL_SECS", 86_400),
        presence_grace_secs: env_u64("CONNECTION_HUB_PRESENCE_GRACE_SECS", 15),
        reconnect_budget_secs: env_u64("CONNECTION_HUB_RECONNECT_BUDGET_SECS", 40),
        logging: LoggingConfig {
            level: std::env::var("CONNECTION_HUB_LOG_LEVEL").ok(),
            format: LogFormat::from_env_str(&env_string("CONNECTION_HUB_LOG_FORMAT", "text")),
        },
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),
}

/// Everything `load` cannot default: the realtime client has no
/// sensible built-in endpoint or credential.
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.realtime_url.is_empty() {
        return Err(ConfigError::MissingRequired("CONNECTION_HUB_REALTIME_URL"));
    }
    if cfg.realtime_api_key.is_empty() {
        return Err(ConfigError::MissingRequired("CONNECTION_HUB_REALTIME_API_KEY"));
    }
    Ok(())
}
