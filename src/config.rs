//! Configuration module
//!
//! Loads a TOML file (default `~/.config/roomrate/config.toml`,
//! overridable with `ROOMRATE_CONFIG`). Every section has defaults so a
//! missing file still yields a runnable dev configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::application::scheduler::SchedulerConfig;
use crate::infrastructure::holiday::HolidayApiConfig;
use crate::shared::types::InfraError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub holiday: HolidaySection,
    pub scheduler: SchedulerSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./roomrate.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HolidaySection {
    pub base_url: String,
    pub country_code: String,
    pub timeout_secs: u64,
    pub retry_max_attempts: u32,
}

impl Default for HolidaySection {
    fn default() -> Self {
        let api = HolidayApiConfig::default();
        Self {
            base_url: api.base_url,
            country_code: api.country_code,
            timeout_secs: api.timeout_secs,
            retry_max_attempts: 3,
        }
    }
}

impl HolidaySection {
    pub fn api_config(&self) -> HolidayApiConfig {
        HolidayApiConfig {
            base_url: self.base_url.clone(),
            country_code: self.country_code.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerSection {
    pub full_resync_interval_secs: u64,
    pub incremental_resync_interval_secs: u64,
    pub purge_interval_secs: u64,
    pub full_resync_window_months: u32,
    pub incremental_window_days: i64,
    pub purge_retention_hours: i64,
}

impl Default for SchedulerSection {
    fn default() -> Self {
        let cfg = SchedulerConfig::default();
        Self {
            full_resync_interval_secs: cfg.full_resync_interval_secs,
            incremental_resync_interval_secs: cfg.incremental_resync_interval_secs,
            purge_interval_secs: cfg.purge_interval_secs,
            full_resync_window_months: cfg.full_resync_window_months,
            incremental_window_days: cfg.incremental_window_days,
            purge_retention_hours: cfg.purge_retention_hours,
        }
    }
}

impl SchedulerSection {
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            full_resync_interval_secs: self.full_resync_interval_secs,
            incremental_resync_interval_secs: self.incremental_resync_interval_secs,
            purge_interval_secs: self.purge_interval_secs,
            full_resync_window_months: self.full_resync_window_months,
            incremental_window_days: self.incremental_window_days,
            purge_retention_hours: self.purge_retention_hours,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| InfraError::Config(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&raw).map_err(|e| InfraError::Config(format!("{}: {}", path.display(), e)))
    }
}

/// `~/.config/roomrate/config.toml`, falling back to the working directory
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("roomrate").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

// ── Tests ──────────────────────────────────────────────────────
