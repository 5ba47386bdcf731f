//! Configuration management for mdfix.
//!
//! Parses `mdfix.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [extensions]
//! alerts = true
//! image_ref_links = true
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the alerts extension flag.
    pub alerts: Option<bool>,
    /// Override the image reference link repair flag.
    pub image_ref_links: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdfix.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which tree post-processors run.
    pub extensions: ExtensionsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Post-processor toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExtensionsConfig {
    /// Rewrite `> [!NOTE]` style block-quotes into alerts.
    pub alerts: bool,
    /// Re-nest image reference links split into siblings.
    pub image_ref_links: bool,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            alerts: true,
            image_ref_links: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdfix.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(alerts) = settings.alerts {
            self.extensions.alerts = alerts;
        }
        if let Some(image_ref_links) = settings.image_ref_links {
            self.extensions.image_ref_links = image_ref_links;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.extensions.alerts);
        assert!(config.extensions.image_ref_links);
        assert_eq!(config.config_path, None);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.extensions.alerts);
        assert!(config.extensions.image_ref_links);
    }

    #[test]
    fn test_parse_extensions_config() {
        let toml = r"
[extensions]
alerts = false
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.extensions.alerts);
        assert!(config.extensions.image_ref_links); // Unchanged
    }

    #[test]
    fn test_parse_wrong_type_is_error() {
        let toml = r#"
[extensions]
alerts = "yes"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_apply_cli_settings_extensions() {
        let mut config = Config::default();
        let overrides = CliSettings {
            alerts: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.extensions.alerts);
        assert!(config.extensions.image_ref_links); // Unchanged
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&config_file, "").unwrap();
        let nested = dir.path().join("a/b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config(&nested), Some(config_file));
    }

    #[test]
    fn test_discover_config_ignores_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join(CONFIG_FILENAME).join("inner");
        std::fs::create_dir_all(&nested).unwrap();

        let found = Config::discover_config(&nested);
        assert_ne!(found, Some(dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[extensions]\nimage_ref_links = false\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert!(config.extensions.alerts);
        assert!(!config.extensions.image_ref_links);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdfix.toml");
        std::fs::write(&path, "[extensions\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdfix.toml");
        std::fs::write(&path, "[extensions]\nalerts = true\n").unwrap();
        let settings = CliSettings {
            alerts: Some(false),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert!(!config.extensions.alerts);
        assert!(config.extensions.image_ref_links);
    }
}
