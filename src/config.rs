use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::background::DEFAULT_NOTIFICATION_ICON;
use crate::utils::paths::get_config_path;

/// Default port for the bridge server
pub const DEFAULT_BRIDGE_PORT: u16 = 48373;

/// Host-side configuration read from `~/.autocopy/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_notification_icon")]
    pub notification_icon: String,

    /// Overrides the settings database location.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

fn default_port() -> u16 {
    DEFAULT_BRIDGE_PORT
}

fn default_notification_icon() -> String {
    DEFAULT_NOTIFICATION_ICON.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            notification_icon: default_notification_icon(),
            database_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        Ok(config)
    }
}
