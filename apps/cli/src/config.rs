//! Client configuration.
//!
//! Stored as JSON:
//! - Linux: `~/.config/skydrop/config.json`
//! - Windows: `%APPDATA%/skydrop/config.json`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Base URL of the SkyDrop server.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Retention period used when none is given.
    #[serde(default = "default_hours")]
    pub default_hours: u32,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.into()
}

fn default_hours() -> u32 {
    1
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            default_hours: default_hours(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration from the default location.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads the configuration from `path`. A missing file yields defaults;
    /// an unparseable one is logged and also yields defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<CliConfig>(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "configuration loaded");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Ok(Self::default())
            }
        }
    }

    /// Server URL to use: the flag (or `SKYDROP_SERVER`) wins over the file.
    pub fn server_url(&self, flag: Option<&str>) -> String {
        flag.map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.server_url)
            .to_string()
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("skydrop")
            .join("config.json"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("skydrop").join("config.json"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(PathBuf::from("/tmp/skydrop/config.json"))
    }
}
