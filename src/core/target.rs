//! Target definitions - what gets run.
//!
//! A [`Target`] binds a callable ([`TargetFunction`]) to the namespace of the
//! registry that declared it. Targets are addressed by their
//! [`TargetMetaData`], the `(function_name, registry_namespace)` pair.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use anyhow::Result;
use indexmap::IndexMap;

/// String options passed from a request to a target, in the order given.
pub type Options = IndexMap<String, String>;

/// The body of a target.
///
/// Implementors have an intrinsic name, used as the target name unless the
/// registration overrides it.
pub trait TargetFunction: Send + Sync {
    /// The intrinsic name of the callable.
    fn name(&self) -> &str;

    /// Run the callable with the request options.
    fn call(&self, options: &Options) -> Result<()>;
}

impl fmt::Debug for dyn TargetFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetFunction({})", self.name())
    }
}

/// Shared handle to a target body.
///
/// Registration hands the same handle back, so declaring code can keep
/// calling the function directly.
pub type TargetFn = Arc<dyn TargetFunction>;

/// A named closure usable as a target body.
pub struct NamedFn<F> {
    name: String,
    func: F,
}

impl<F> NamedFn<F>
where
    F: Fn(&Options) -> Result<()> + Send + Sync + 'static,
{
    /// Wrap a closure under the given intrinsic name.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        NamedFn {
            name: name.into(),
            func,
        }
    }
}

impl<F> TargetFunction for NamedFn<F>
where
    F: Fn(&Options) -> Result<()> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, options: &Options) -> Result<()> {
        (self.func)(options)
    }
}

/// Build a [`TargetFn`] from a name and a closure.
pub fn target_fn<F>(name: impl Into<String>, func: F) -> TargetFn
where
    F: Fn(&Options) -> Result<()> + Send + Sync + 'static,
{
    Arc::new(NamedFn::new(name, func))
}

/// Identity key of a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetMetaData {
    pub function_name: String,
    pub registry_namespace: String,
}

impl TargetMetaData {
    pub fn new(function_name: impl Into<String>, registry_namespace: impl Into<String>) -> Self {
        TargetMetaData {
            function_name: function_name.into(),
            registry_namespace: registry_namespace.into(),
        }
    }

    /// Key for a callable using its intrinsic name.
    pub fn from_target_function(function: &dyn TargetFunction, registry_namespace: &str) -> Self {
        Self::new(function.name(), registry_namespace)
    }
}

impl fmt::Display for TargetMetaData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.function_name, self.registry_namespace)
    }
}

/// Registration overrides for a target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetOptions {
    /// Name to register under instead of the callable's intrinsic name.
    pub name: Option<String>,
    /// One-line description shown when listing targets.
    pub description: Option<String>,
}

impl TargetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An executable unit bound to one namespace.
#[derive(Clone)]
pub struct Target {
    function: TargetFn,
    registry_namespace: String,
    name_override: Option<String>,
    description: Option<String>,
}

impl Target {
    /// Create a target for `function` in `registry_namespace`.
    pub fn new(function: TargetFn, registry_namespace: impl Into<String>) -> Self {
        Target {
            function,
            registry_namespace: registry_namespace.into(),
            name_override: None,
            description: None,
        }
    }

    /// Apply registration overrides.
    pub fn with_options(mut self, options: TargetOptions) -> Self {
        self.name_override = options.name;
        self.description = options.description;
        self
    }

    /// The namespace of the registry that declared this target.
    pub fn registry_namespace(&self) -> &str {
        &self.registry_namespace
    }

    /// The addressable name: the override if present, else the callable's name.
    pub fn function_name(&self) -> &str {
        self.name_override
            .as_deref()
            .unwrap_or_else(|| self.function.name())
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The underlying callable.
    pub fn function(&self) -> &TargetFn {
        &self.function
    }

    /// Identity key of this target.
    pub fn metadata(&self) -> TargetMetaData {
        TargetMetaData::new(self.function_name(), self.registry_namespace.as_str())
    }

    /// Run the target. Errors from the callable are returned as-is.
    pub fn execute(&self, options: &Options) -> Result<()> {
        tracing::debug!("executing {}", self.metadata());
        self.function.call(options)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("function_name", &self.function_name())
            .field("registry_namespace", &self.registry_namespace)
            .field("description", &self.description)
            .finish()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.function_name(), self.registry_namespace)
    }
}

impl PartialEq for Target {
    fn eq(&self, other: &Self) -> bool {
        self.function_name() == other.function_name()
            && self.registry_namespace == other.registry_namespace
    }
}

impl Eq for Target {}

impl Hash for Target {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.metadata().hash(state);
    }
}
