// SPDX-License-Identifier: MPL-2.0
//! Loading and saving of `settings.toml`.
//!
//! # Configuration Sections
//!
//! - `[general]` - Build mode (`development` or `production`)
//! - `[i18n]` - Settling delay and an optional on-disk locale directory
//!
//! The remembered language is not part of this file; it lives in the
//! durable key-value storage (see [`crate::storage`]).
//!
//! # Examples
//!
//! ```no_run
//! use lingo::config::{self, BuildMode};
//!
//! let (mut config, _warning) = config::load();
//! config.general.mode = BuildMode::Production;
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Whether missing translations are fatal and test locales are offered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    /// Mode matching how the crate itself was compiled.
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            BuildMode::Development
        } else {
            BuildMode::Production
        }
    }

    pub fn is_development(self) -> bool {
        self == BuildMode::Development
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::from_build()
    }
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    #[serde(default)]
    pub mode: BuildMode,
}

/// Locale loading settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct I18nConfig {
    /// Minimum duration of the loading phase of a language switch.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,

    /// Directory of `<code>.json` files replacing the embedded locale data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locales_dir: Option<PathBuf>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            locales_dir: None,
        }
    }
}

impl I18nConfig {
    /// Settling delay, clamped to [`MAX_SETTLE_DELAY_MS`].
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms.min(MAX_SETTLE_DELAY_MS))
    }
}

fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY_MS
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub i18n: I18nConfig,
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!("ignoring {}: {}", path.display(), err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                mode: BuildMode::Production,
            },
            i18n: I18nConfig {
                settle_delay_ms: 250,
                locales_dir: Some(PathBuf::from("/srv/locales")),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("write file");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_from_empty_directory_returns_default() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none(), "should not warn for missing file");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_with_override_from_corrupted_file_returns_default_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        fs::write(base_dir.join("settings.toml"), "[i18n\nsettle").expect("write file");

        let (config, warning) = load_with_override(Some(base_dir));
        assert!(warning.expect("should warn").contains("settings.toml"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[general]\nmode = \"production\"\n").expect("write file");

        let loaded = load_from_path(&config_path).expect("should load");
        assert_eq!(loaded.general.mode, BuildMode::Production);
        assert_eq!(loaded.i18n.settle_delay_ms, DEFAULT_SETTLE_DELAY_MS);
        assert!(loaded.i18n.locales_dir.is_none());
    }

    #[test]
    fn settle_delay_is_clamped() {
        let i18n = I18nConfig {
            settle_delay_ms: 60_000,
            locales_dir: None,
        };
        assert_eq!(i18n.settle_delay(), Duration::from_millis(MAX_SETTLE_DELAY_MS));
    }

    #[test]
    fn saved_config_uses_sectioned_format() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        save_with_override(&Config::default(), Some(temp_dir.path().to_path_buf()))
            .expect("save config");

        let content =
            fs::read_to_string(temp_dir.path().join("settings.toml")).expect("read config");
        assert!(content.contains("[general]"));
        assert!(content.contains("[i18n]"));
    }
}
