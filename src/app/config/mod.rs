// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, stored in a
//! `settings.toml` file in the config directory.
//!
//! # Configuration Sections
//!
//! - `[general]` - Fallback language for unconfigured language codes
//! - `[content]` - Location of the content document (path or URL)
//! - `[navigation]` - Scroll-spy anchor offset
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI argument
//! 3. Set `VITRINE_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use vitrine::app::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.content.source = Some("https://example.com/data/i18n.json".to_string());
//!
//! // `None` writes to the resolved config directory.
//! config::save_with_override(&config, None).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::content::ContentSource;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// Language whose content is shown when the active one is not configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_language: Option<String>,
}

/// Content document location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ContentConfig {
    /// Path or `http(s)` URL of the content document. Unset means the
    /// bundled document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Navigation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationConfig {
    /// Offset below the scroll position at which sections are probed.
    #[serde(
        default = "default_anchor_offset",
        skip_serializing_if = "Option::is_none"
    )]
    pub anchor_offset: Option<f32>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            anchor_offset: default_anchor_offset(),
        }
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,
}

impl Config {
    /// Fallback language, defaulting to Turkish.
    #[must_use]
    pub fn fallback_language(&self) -> &str {
        self.general
            .fallback_language
            .as_deref()
            .filter(|lang| !lang.is_empty())
            .unwrap_or(DEFAULT_FALLBACK_LANGUAGE)
    }

    /// Scroll-spy anchor offset, clamped to the accepted range.
    #[must_use]
    pub fn anchor_offset(&self) -> f32 {
        self.navigation
            .anchor_offset
            .filter(|offset| offset.is_finite())
            .unwrap_or(DEFAULT_NAV_ANCHOR_OFFSET)
            .clamp(MIN_NAV_ANCHOR_OFFSET, MAX_NAV_ANCHOR_OFFSET)
    }

    /// Where to load the content document from.
    #[must_use]
    pub fn content_source(&self) -> ContentSource {
        match self.content.source.as_deref() {
            Some(location) if !location.is_empty() => ContentSource::from_location(location),
            _ => ContentSource::default(),
        }
    }
}

fn default_anchor_offset() -> Option<f32> {
    Some(DEFAULT_NAV_ANCHOR_OFFSET)
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

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to `base_dir`, or to the resolved config
/// directory when `None`.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
