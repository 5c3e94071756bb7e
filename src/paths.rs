// SPDX-License-Identifier: MPL-2.0
//! Directory resolution for settings and durable storage.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** passed by the caller (tests, embedding apps)
//! 2. **CLI arguments** (`--config-dir`, `--data-dir`) registered through
//!    [`init_cli_overrides`]
//! 3. **Environment variables** (`LINGO_CONFIG_DIR`, `LINGO_DATA_DIR`)
//! 4. **Platform default** from the `dirs` crate, with the application name
//!    appended
//!
//! Settings (`settings.toml`) live in the config directory; the remembered
//! language (`storage.toml`) lives in the data directory.

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "Lingo";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "LINGO_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "LINGO_CONFIG_DIR";

static CLI_DATA_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirKind {
    Config,
    Data,
}

impl DirKind {
    fn cli_override(self) -> Option<PathBuf> {
        let cell = match self {
            DirKind::Config => &CLI_CONFIG_DIR,
            DirKind::Data => &CLI_DATA_DIR,
        };
        cell.get().and_then(Clone::clone)
    }

    fn env_var(self) -> &'static str {
        match self {
            DirKind::Config => ENV_CONFIG_DIR,
            DirKind::Data => ENV_DATA_DIR,
        }
    }

    fn platform_dir(self) -> Option<PathBuf> {
        match self {
            DirKind::Config => dirs::config_dir(),
            DirKind::Data => dirs::data_dir(),
        }
    }
}

/// Registers the `--data-dir` / `--config-dir` CLI values.
///
/// Only the first call takes effect; later calls are ignored with a debug
/// log so embedding code can call this defensively from several entry points.
pub fn init_cli_overrides(data_dir: Option<String>, config_dir: Option<String>) {
    if CLI_DATA_DIR.set(data_dir.map(PathBuf::from)).is_err() {
        tracing::debug!("CLI data dir override already initialized");
    }
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        tracing::debug!("CLI config dir override already initialized");
    }
}

fn resolve(kind: DirKind, override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = kind.cli_override() {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(kind.env_var()) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    kind.platform_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the directory holding `storage.toml`.
///
/// Returns `None` if no platform data directory exists (rare edge case).
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the data directory, preferring `override_path` when given.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(DirKind::Data, override_path)
}

/// Returns the directory holding `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory, preferring `override_path` when given.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(DirKind::Config, override_path)
}
