//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/famtree/famtree.toml`
//! 3. Environment variables: `FAMTREE_*` prefix
//!
//! The CLI `--db` flag overrides the resulting database path.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::DEFAULT_ROOT_AGE;
use crate::util::path::expand_env_vars;

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub base_dir: Option<PathBuf>,
    pub db_name: Option<String>,
    pub root_age: Option<u32>,
}

/// Unified configuration for famtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base directory for famtree data (default: ~/.famtree)
    pub base_dir: PathBuf,
    /// Database file name inside `base_dir`
    pub db_name: String,
    /// Inherited age of the top-level member of an imported tree
    pub root_age: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_dir: dirs_default_base_dir(),
            db_name: "family.json".into(),
            root_age: DEFAULT_ROOT_AGE,
        }
    }
}

/// Get the default base directory (~/.famtree).
fn dirs_default_base_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".famtree"))
        .unwrap_or_else(|| PathBuf::from("~/.famtree"))
}

/// Get the XDG config directory for famtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "famtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("famtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Full path of the family database.
    pub fn db_path(&self) -> PathBuf {
        self.base_dir.join(&self.db_name)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.base_dir.to_string_lossy().as_ref());
        self.base_dir = PathBuf::from(expanded);
    }

    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            base_dir: overlay
                .base_dir
                .clone()
                .unwrap_or_else(|| self.base_dir.clone()),
            db_name: overlay
                .db_name
                .clone()
                .unwrap_or_else(|| self.db_name.clone()),
            root_age: overlay.root_age.unwrap_or(self.root_age),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Config file to use instead of the global one
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global (or explicitly given) config file
        let file = config_file
            .map(Path::to_path_buf)
            .or_else(global_config_path);
        if let Some(path) = file {
            if path.exists() {
                let raw = load_raw_settings(&path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply FAMTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("FAMTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("base_dir") {
            settings.base_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("db_name") {
            settings.db_name = val;
        }
        match config.get::<u32>("root_age") {
            Ok(val) => settings.root_age = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
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
        r#"# famtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/famtree/famtree.toml
#   Env:    FAMTREE_* environment variables (explicit overrides)

# Directory holding the family database
# base_dir = "~/.famtree"

# Database file name inside base_dir
# db_name = "family.json"

# Age assumed for the top-level member of an imported tree without birth dates
# root_age = 350
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_points_into_home() {
        let settings = Settings::default();
        assert!(settings.base_dir.to_string_lossy().contains(".famtree"));
        assert_eq!(settings.db_name, "family.json");
        assert_eq!(settings.root_age, 350);
    }

    #[test]
    fn given_tilde_in_base_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            base_dir: PathBuf::from("~/.famtree"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let base = settings.base_dir.to_string_lossy();
        assert!(base.starts_with(&home), "base_dir should start with home dir: {}", base);
        assert!(!base.contains('~'), "base_dir should not contain tilde: {}", base);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            db_name: Some("weasley.json".into()),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.db_name, "weasley.json");
        assert_eq!(merged.base_dir, base.base_dir);
        assert_eq!(merged.root_age, base.root_age);
    }

    #[test]
    fn given_settings_when_to_toml_then_contains_fields() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("db_name = \"family.json\""));
        assert!(toml.contains("root_age = 350"));
    }
}
