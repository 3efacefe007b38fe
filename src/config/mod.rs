// Persisted shell settings, stored as JSON in the user's config directory

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ShellError;
use crate::session::credentials::Credentials;
use crate::session::DEFAULT_TRIAL_MS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Trial length before the desktop locks
    #[serde(default = "default_trial_ms")]
    pub trial_duration_ms: u64,

    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    #[serde(default = "default_admin_secret")]
    pub admin_secret: String,

    /// Host loop tick: clock refresh and gate poll
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Temperature readout refresh
    #[serde(default = "default_temperature_ms")]
    pub temperature_interval_ms: u64,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_trial_ms() -> u64 {
    DEFAULT_TRIAL_MS
}

fn default_admin_username() -> String {
    Credentials::default().username
}

fn default_admin_secret() -> String {
    Credentials::default().secret
}

fn default_tick_ms() -> u64 {
    1000
}

fn default_temperature_ms() -> u64 {
    1500
}

fn default_log_filter() -> String {
    "zenuxos_lib=info".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            trial_duration_ms: default_trial_ms(),
            admin_username: default_admin_username(),
            admin_secret: default_admin_secret(),
            tick_ms: default_tick_ms(),
            temperature_interval_ms: default_temperature_ms(),
            log_filter: default_log_filter(),
        }
    }
}

impl ShellConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.admin_username.clone(), self.admin_secret.clone())
    }
}

/// Loads and saves `config.json` under `<config_dir>/zenuxOS`
pub struct ConfigService {
    file_path: PathBuf,
}

impl ConfigService {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::at(base.join("zenuxOS").join("config.json"))
    }

    pub fn at(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the config, logging and falling back to the defaults on error.
    pub fn load(&self) -> ShellConfig {
        self.try_load().unwrap_or_else(|e| {
            warn!("[CONFIG] {} unusable, using defaults: {}", self.file_path.display(), e);
            ShellConfig::default()
        })
    }

    /// Read the config. A missing file yields the defaults; an unreadable or
    /// malformed one is an error the caller reports once logging is up.
    pub fn try_load(&self) -> Result<ShellConfig, ShellError> {
        if !self.file_path.exists() {
            return Ok(ShellConfig::default());
        }
        let content = fs::read_to_string(&self.file_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, config: &ShellConfig) -> Result<(), ShellError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        fs::write(&self.file_path, json)?;
        info!("[CONFIG] saved {}", self.file_path.display());
        Ok(())
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
