//! src/config/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Manages all user-editable settings for the tree navigator. Loads and saves
//! settings as TOML from the proper cross-platform config path using the
//! [`directories`](https://docs.rs/directories) crate.
//!
//! ## Features
//! - XDG-compliant config discovery and writing (Linux, macOS, Windows)
//! - Robust defaulting if no config file exists
//! - Async load/save for smooth integration with Tokio

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Main configuration struct for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Include dot-prefixed entries when enumerating folders.
    pub show_hidden: bool,

    /// Extension appended to a new file name that contains no `.`.
    pub default_extension: String,

    /// Command used to open files. Falls back to the platform opener.
    pub open_cmd: Option<String>,

    /// How long status/info messages stay in the status bar.
    #[serde(with = "humantime_serde")]
    pub status_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            show_hidden: false,
            default_extension: "md".to_string(),
            open_cmd: None,
            status_timeout: Duration::from_secs(4),
        }
    }
}

impl Config {
    /// Loads config from the TOML file at the XDG-compliant app config dir,
    /// or returns defaults when no file exists.
    ///
    /// The config is expected at `$XDG_CONFIG_HOME/treenav/config.toml`
    /// (Linux), or equivalent on Windows/macOS.
    pub async fn load() -> Result<Self, AppError> {
        let path: PathBuf = Self::config_path()?;
        if path.exists() {
            let text: String = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| AppError::ConfigIo {
                    path: path.clone(),
                    source,
                })?;
            let cfg: Config = toml::from_str(&text)?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Saves config to the TOML file at the XDG-compliant app config dir.
    pub async fn save(&self) -> Result<(), AppError> {
        let path: PathBuf = Self::config_path()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let toml_str: String = toml::to_string_pretty(self)?;
        tokio::fs::write(&path, toml_str).await?;
        Ok(())
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> Result<PathBuf, AppError> {
        let proj_dirs: ProjectDirs = ProjectDirs::from("org", "treenav", "treenav")
            .ok_or_else(|| AppError::Other("Could not determine config directory.".to_string()))?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert!(!cfg.show_hidden);
        assert_eq!(cfg.default_extension, "md");
        assert!(cfg.open_cmd.is_none());
        assert_eq!(cfg.status_timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_parse_partial_toml() {
        let cfg: Config = toml::from_str("show_hidden = true\ndefault_extension = \"txt\"")
            .expect("partial config should parse");
        assert!(cfg.show_hidden);
        assert_eq!(cfg.default_extension, "txt");
        // unspecified fields fall back to defaults
        assert_eq!(cfg.status_timeout, Duration::from_secs(4));
    }

    #[test]
    fn test_parse_humantime_duration() {
        let cfg: Config = toml::from_str("status_timeout = \"2s 500ms\"").unwrap();
        assert_eq!(cfg.status_timeout, Duration::from_millis(2500));
    }
}
