//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/drillview/drillview.toml`
//! 3. Environment variables: `DRILLVIEW_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::format::DEFAULT_ABBREVIATE_FROM;

/// Unified configuration for drillview.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base address share links are built on
    pub share_base_url: String,
    /// Magnitude threshold for abbreviated number display
    pub abbreviate_from: f64,
    /// Default hierarchy document when no file argument is given
    pub hierarchy_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            share_base_url: "https://dash.example.com/metrics".to_string(),
            abbreviate_from: DEFAULT_ABBREVIATE_FROM,
            hierarchy_file: None,
        }
    }
}

/// Raw settings for intermediate parsing (all fields optional to detect
/// "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    share_base_url: Option<String>,
    abbreviate_from: Option<f64>,
    hierarchy_file: Option<PathBuf>,
}

/// Get the XDG config directory for drillview.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "drillview").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("drillview.toml"))
}

fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(file) = &self.hierarchy_file {
            let expanded = shellexpand::full(file.to_string_lossy().as_ref())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| file.to_string_lossy().into_owned());
            self.hierarchy_file = Some(PathBuf::from(expanded));
        }
    }

    fn apply(&self, raw: &RawSettings) -> Self {
        Self {
            share_base_url: raw
                .share_base_url
                .clone()
                .unwrap_or_else(|| self.share_base_url.clone()),
            abbreviate_from: raw.abbreviate_from.unwrap_or(self.abbreviate_from),
            hierarchy_file: raw
                .hierarchy_file
                .clone()
                .or_else(|| self.hierarchy_file.clone()),
        }
    }

    /// Load settings with layered precedence.
    pub fn load() -> Result<Self, ApplicationError> {
        // 1. Compiled defaults
        let mut current = Self::default();

        // 2. Global config file
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.apply(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        Ok(current)
    }

    /// Apply DRILLVIEW_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder =
            Config::builder().add_source(Environment::with_prefix("DRILLVIEW").separator("__"));
        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("share_base_url") {
            settings.share_base_url = val;
        }
        if let Ok(val) = config.get_float("abbreviate_from") {
            settings.abbreviate_from = val;
        }
        if let Ok(val) = config.get_string("hierarchy_file") {
            settings.hierarchy_file = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# drillview configuration
#
# Location: ~/.config/drillview/drillview.toml
# Environment variables with prefix DRILLVIEW_ override file values.

# Base address for shareable filter links
# share_base_url = "https://dash.example.com/metrics"

# Values at or above this threshold display abbreviated (1.5K, 2.3M)
# abbreviate_from = 1000.0

# Default hierarchy document (supports ~ and $VAR)
# hierarchy_file = "~/metrics/certifications.json"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
