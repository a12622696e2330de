//! Targets file parsing and schema.
//!
//! A targets file declares one or more registries:
//!
//! ```toml
//! [[registry]]              # name defaults to "default"
//!
//! [[registry.targets]]
//! name = "install"
//! run = "cargo install --path ."
//!
//! [[registry.targets]]
//! name = "tests"
//! description = "Run the workspace tests"
//! recipe = "cargo-test"
//! args = ["--workspace"]
//!
//! [[registry.targets]]
//! name = "all"
//! steps = ["install", "tests"]
//! ```
//!
//! `steps` may only name targets declared earlier in the same registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use indexmap::IndexMap;
use serde::Deserialize;

use crate::core::{BeginError, Registry, TargetFn, TargetOptions, DEFAULT_REGISTRY_NAME};
use crate::recipes::{Recipe, RecipeTarget};
use crate::sources::command::{CommandTarget, SequenceTarget};
use crate::sources::SourceLoader;
use crate::util::fs::read_to_string;

/// Top-level structure of a targets file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetsFile {
    #[serde(default, rename = "registry")]
    pub registries: Vec<RegistrySpec>,
}

/// One `[[registry]]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySpec {
    /// Namespace of the registry
    pub name: Option<String>,

    #[serde(default)]
    pub targets: Vec<TargetSpec>,
}

/// One `[[registry.targets]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetSpec {
    pub name: String,

    pub description: Option<String>,

    /// Shell command with `{{key}}` placeholders
    pub run: Option<String>,

    /// Built-in recipe name (e.g. `cargo-test`)
    pub recipe: Option<String>,

    /// Fixed arguments for `recipe`
    #[serde(default)]
    pub args: Vec<String>,

    /// Earlier targets of the same registry to call in order
    pub steps: Option<Vec<String>>,

    /// Working directory, relative to the targets file
    pub cwd: Option<PathBuf>,
}

impl TargetsFile {
    /// Parse a targets file from its contents.
    pub fn parse(contents: &str, path: &Path) -> Result<Self, BeginError> {
        toml::from_str(contents).map_err(|e| invalid(path, e.to_string()))
    }

    /// Build the registries this file declares, in declaration order.
    pub fn into_registries(self, path: &Path) -> Result<Vec<Registry>, BeginError> {
        let base_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        self.registries
            .into_iter()
            .map(|spec| spec.into_registry(path, &base_dir))
            .collect()
    }
}

impl RegistrySpec {
    fn into_registry(self, path: &Path, base_dir: &Path) -> Result<Registry, BeginError> {
        let name = self
            .name
            .unwrap_or_else(|| DEFAULT_REGISTRY_NAME.to_string());
        if name.is_empty() || name.contains(':') {
            return Err(invalid(path, format!("invalid registry name `{}`", name)));
        }

        let mut registry = Registry::with_name(name, path);
        // Handles returned by registration, for `steps` references.
        let mut declared: IndexMap<String, TargetFn> = IndexMap::new();

        for spec in self.targets {
            let options = TargetOptions {
                name: None,
                description: spec.description.clone(),
            };
            let target_name = spec.name.clone();
            let function = spec.into_function(path, base_dir, &declared)?;
            let handle = registry.register_target_with(options)(function);
            declared.insert(target_name, handle);
        }

        tracing::debug!(
            "loaded registry `{}` with {} target(s) from {}",
            registry.name(),
            registry.len(),
            path.display()
        );
        Ok(registry)
    }
}

impl TargetSpec {
    fn into_function(
        self,
        path: &Path,
        base_dir: &Path,
        declared: &IndexMap<String, TargetFn>,
    ) -> Result<TargetFn, BeginError> {
        if self.name.is_empty() || self.name.contains(['@', ':']) {
            return Err(invalid(
                path,
                format!("invalid target name `{}`: names may not contain `@` or `:`", self.name),
            ));
        }

        let cwd = match self.cwd {
            Some(ref dir) => base_dir.join(dir),
            None => base_dir.to_path_buf(),
        };

        let kinds = [self.run.is_some(), self.recipe.is_some(), self.steps.is_some()];
        if kinds.iter().filter(|k| **k).count() != 1 {
            return Err(invalid(
                path,
                format!(
                    "target `{}` must set exactly one of `run`, `recipe` or `steps`",
                    self.name
                ),
            ));
        }
        if !self.args.is_empty() && self.recipe.is_none() {
            return Err(invalid(
                path,
                format!("target `{}`: `args` is only allowed with `recipe`", self.name),
            ));
        }

        if let Some(command) = self.run {
            return Ok(Arc::new(CommandTarget::new(self.name, command).with_cwd(cwd)));
        }

        if let Some(recipe) = self.recipe {
            let recipe: Recipe = recipe
                .parse()
                .map_err(|e| invalid(path, format!("target `{}`: {}", self.name, e)))?;
            return Ok(Arc::new(
                RecipeTarget::new(self.name, recipe)
                    .with_args(self.args)
                    .with_cwd(cwd),
            ));
        }

        let mut steps = Vec::new();
        for step in self.steps.unwrap_or_default() {
            match declared.get(&step) {
                Some(handle) => steps.push(Arc::clone(handle)),
                None => {
                    return Err(invalid(
                        path,
                        format!(
                            "target `{}` calls `{}`, which is not declared above it in the same registry",
                            self.name, step
                        ),
                    ))
                }
            }
        }
        Ok(Arc::new(SequenceTarget::new(self.name, steps)))
    }
}

fn invalid(path: &Path, message: impl Into<String>) -> BeginError {
    BeginError::InvalidTargetFile {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Loads `*targets.toml` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlSourceLoader;

impl SourceLoader for TomlSourceLoader {
    fn load(&self, path: &Path) -> Result<Vec<Registry>> {
        let contents = read_to_string(path)
            .map_err(|e| invalid(path, format!("failed to read file: {}", e.root_cause())))?;
        let file = TargetsFile::parse(&contents, path)?;
        Ok(file.into_registries(path)?)
    }
}
