//! Global context for begin operations.
//!
//! Provides centralized access to configuration, paths, and environment.
//! The environment is read once, when the context is created.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use crate::util::config::{load_config, Config};

/// Environment variable overriding the global targets directory.
pub const BEGIN_HOME_ENV: &str = "BEGIN_HOME";

/// Name of the global targets directory under the user's home.
pub const GLOBAL_DIR_NAME: &str = ".begin";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory holding global targets files (~/.begin/ by default)
    global_dir: PathBuf,

    /// Merged configuration files
    config: Config,

    /// Targets file pattern given on the command line
    extension: Option<String>,

    /// Whether to use colors in output
    color: Option<bool>,
}

impl GlobalContext {
    /// Create a context for the process working directory and environment.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let global_dir = resolve_global_dir(std::env::var_os(BEGIN_HOME_ENV), home_dir());
        Ok(Self::with_paths(cwd, global_dir))
    }

    /// Create a context with explicit paths, loading config files from them.
    pub fn with_paths(cwd: PathBuf, global_dir: PathBuf) -> Self {
        let config = load_config(
            &global_dir.join("config.toml"),
            &cwd.join(GLOBAL_DIR_NAME).join("config.toml"),
        );

        GlobalContext {
            cwd,
            global_dir,
            config,
            extension: None,
            color: None,
        }
    }

    /// Override the global targets directory.
    ///
    /// Configuration is reloaded from the new directory.
    pub fn with_global_dir(self, global_dir: impl AsRef<Path>) -> Self {
        let global_dir = expand_home(global_dir.as_ref(), home_dir().as_deref());
        GlobalContext {
            extension: self.extension,
            color: self.color,
            ..Self::with_paths(self.cwd, global_dir)
        }
    }

    /// Override the targets file pattern.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = Some(color);
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global targets directory.
    pub fn global_dir(&self) -> &Path {
        &self.global_dir
    }

    /// Get the merged configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The targets file pattern: command line, then config, then default.
    pub fn extension(&self) -> &str {
        self.extension
            .as_deref()
            .unwrap_or_else(|| self.config.extension())
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color.unwrap_or_else(|| self.config.color())
    }
}

fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Pick the global targets directory: `BEGIN_HOME` if set, else `~/.begin`.
pub fn resolve_global_dir(env_override: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    match env_override {
        Some(dir) if !dir.is_empty() => expand_home(Path::new(&dir), home.as_deref()),
        _ => home
            .map(|h| h.join(GLOBAL_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(GLOBAL_DIR_NAME)),
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~"), home) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
