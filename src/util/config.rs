//! Configuration file support for begin.
//!
//! begin reads two optional configuration files:
//! - Global: `<global targets dir>/config.toml` - User-wide defaults
//! - Project: `.begin/config.toml` in the working directory
//!
//! Project config takes precedence over global config, and command-line
//! flags take precedence over both.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs::read_to_string;

/// Pattern matched against file names when discovering targets files.
pub const DEFAULT_EXTENSION: &str = "*targets.toml";

/// begin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Targets file discovery settings
    pub discovery: DiscoveryConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Targets file discovery settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// File name pattern for targets files (e.g. `*targets.toml`)
    pub extension: Option<String>,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use ANSI colors in diagnostics
    pub color: Option<bool>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.discovery.extension.is_some() {
            self.discovery.extension = other.discovery.extension;
        }
        if other.output.color.is_some() {
            self.output.color = other.output.color;
        }
    }

    /// The targets file pattern, falling back to the default.
    pub fn extension(&self) -> &str {
        self.discovery
            .extension
            .as_deref()
            .unwrap_or(DEFAULT_EXTENSION)
    }

    pub fn color(&self) -> bool {
        self.output.color.unwrap_or(true)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.begin/config.toml)
/// 2. Global config (<global dir>/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.extension(), "*targets.toml");
        assert!(config.color());
    }

    #[test]
    fn test_config_load_errors_name_the_file() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("config.toml");

        let err = Config::load(&missing).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to read file"));

        std::fs::write(&missing, "[discovery]\nextension = 3\n").unwrap();
        let err = Config::load(&missing).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
        assert!(Config::load_or_default(&missing).discovery.extension.is_none());
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[discovery]
extension = "*tasks.toml"

[output]
color = false
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.extension(), "*tasks.toml");
        assert!(!config.color());
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[discovery\nextension = ").unwrap();

        assert!(Config::load(&config_path).is_err());
        let config = Config::load_or_default(&config_path);
        assert_eq!(config.extension(), DEFAULT_EXTENSION);
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[discovery]
extension = "*global.toml"

[output]
color = false
"#,
        )
        .unwrap();
        std::fs::write(
            &project_path,
            r#"
[discovery]
extension = "*project.toml"
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);

        assert_eq!(config.extension(), "*project.toml");
        // Not overridden by the project config
        assert!(!config.color());
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join("a.toml"), &tmp.path().join("b.toml"));
        assert_eq!(config.extension(), DEFAULT_EXTENSION);
    }
}
