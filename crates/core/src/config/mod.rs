//! Cache tuning with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SNAPBACK_*)
//! 2. TOML config file (if SNAPBACK_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The defaults reproduce the stock behavior: ten cached pages, a fifteen
//! minute validity window, a 500 ms capture settle delay.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Cache tuning settings with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SNAPBACK_*)
/// 2. TOML config file (if SNAPBACK_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of snapshots kept per namespace.
    ///
    /// Set via SNAPBACK_MAX_ENTRIES environment variable.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Snapshot validity window in milliseconds.
    ///
    /// Set via SNAPBACK_TTL_MS environment variable.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: i64,

    /// Delay before capture, in milliseconds, letting CSS transitions and
    /// animations settle so the fragment is not caught mid-flight.
    ///
    /// Set via SNAPBACK_SETTLE_MS environment variable.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Deferral before the scroll restore, in milliseconds.
    ///
    /// Set via SNAPBACK_SCROLL_DEFER_MS environment variable.
    #[serde(default = "default_scroll_defer_ms")]
    pub scroll_defer_ms: u64,
}

fn default_max_entries() -> usize {
    10
}

fn default_ttl_ms() -> i64 {
    900_000 // 15 minutes
}

fn default_settle_ms() -> u64 {
    500
}

fn default_scroll_defer_ms() -> u64 {
    1
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ttl_ms: default_ttl_ms(),
            settle_ms: default_settle_ms(),
            scroll_defer_ms: default_scroll_defer_ms(),
        }
    }
}

impl CacheSettings {
    /// Settle delay as a Duration for use with tokio timers.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Scroll deferral as a Duration for use with tokio timers.
    pub fn scroll_defer(&self) -> Duration {
        Duration::from_millis(self.scroll_defer_ms)
    }

    /// Load settings from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SNAPBACK_`
    /// 2. TOML file from `SNAPBACK_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SNAPBACK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::prefixed("SNAPBACK_").map(|key| key.as_str().to_lowercase().into()));

        let settings: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        settings.validate()?;

        Ok(settings)
    }
}
