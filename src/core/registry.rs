//! Registry - a namespace-scoped collection of targets.
//!
//! Each registry remembers the source file that declared it. The source is
//! what distinguishes a namespace collision (two files declaring the same
//! name) from a file re-declaring its own registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::target::{Target, TargetFn, TargetMetaData, TargetOptions};

/// Namespace used when a registry or request does not name one.
pub const DEFAULT_REGISTRY_NAME: &str = "default";

/// An ordered collection of targets sharing one namespace.
#[derive(Debug, Clone)]
pub struct Registry {
    name: String,
    path: PathBuf,
    targets: IndexMap<TargetMetaData, Arc<Target>>,
}

impl Registry {
    /// Create a registry in the default namespace, declared by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_name(DEFAULT_REGISTRY_NAME, path)
    }

    /// Create a registry with an explicit namespace, declared by `path`.
    pub fn with_name(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Registry {
            name: name.into(),
            path: path.into(),
            targets: IndexMap::new(),
        }
    }

    /// The namespace of this registry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source that declared this registry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register `function` under its intrinsic name.
    ///
    /// Returns the same handle so the caller can keep invoking it directly.
    pub fn register_target(&mut self, function: TargetFn) -> TargetFn {
        self.insert(function.clone(), TargetOptions::default());
        function
    }

    /// Configure a registration, then apply it to a function.
    ///
    /// ```
    /// use begin::core::{target_fn, Registry, TargetFunction, TargetOptions};
    ///
    /// let mut registry = Registry::new("targets.toml");
    /// let tests = registry.register_target_with(TargetOptions::new().with_name("tests"))(
    ///     target_fn("run_tests", |_| Ok(())),
    /// );
    /// assert_eq!(tests.name(), "run_tests");
    /// assert!(registry.get("tests").is_some());
    /// ```
    pub fn register_target_with(
        &mut self,
        options: TargetOptions,
    ) -> impl FnOnce(TargetFn) -> TargetFn + '_ {
        move |function| {
            self.insert(function.clone(), options);
            function
        }
    }

    fn insert(&mut self, function: TargetFn, options: TargetOptions) {
        let target = Target::new(function, self.name.as_str()).with_options(options);
        let key = target.metadata();

        if self.targets.contains_key(&key) {
            tracing::debug!("re-registering {} in {}", key, self.path.display());
        }
        // Last registration for a key wins; its position is kept.
        self.targets.insert(key, Arc::new(target));
    }

    /// Look up a target of this registry by name.
    pub fn get(&self, function_name: &str) -> Option<&Arc<Target>> {
        self.targets
            .get(&TargetMetaData::new(function_name, self.name.as_str()))
    }

    /// Targets in registration order.
    pub fn targets(&self) -> impl Iterator<Item = &Arc<Target>> {
        self.targets.values()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
