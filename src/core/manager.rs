//! RegistryManager - validated owner of the target map.
//!
//! Namespace collisions are detected once, when the manager is created. A
//! silently shadowed namespace would run the wrong target, so the whole
//! invocation is aborted instead.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::errors::BeginError;
use crate::core::registry::Registry;
use crate::core::target::Target;
use crate::core::target_map::TargetMap;

/// Owns every discovered registry and the map compiled from them.
#[derive(Debug)]
pub struct RegistryManager {
    registries: Vec<Registry>,
    target_map: TargetMap,
}

impl RegistryManager {
    /// Validate the registries and build the manager.
    ///
    /// Fails with [`BeginError::RegistryNameCollision`] if two different
    /// source files declare a registry with the same name.
    pub fn create(registries: Vec<Registry>) -> Result<Self, BeginError> {
        check_registry_names(&registries)?;
        Ok(Self::new_unchecked(registries))
    }

    /// Build the manager without the namespace collision check.
    pub fn new_unchecked(registries: Vec<Registry>) -> Self {
        let target_map = TargetMap::create(&registries);
        RegistryManager {
            registries,
            target_map,
        }
    }

    /// Resolve `(target_name, namespace)` to a target.
    pub fn get_target(&self, target_name: &str, namespace: &str) -> Result<&Arc<Target>, BeginError> {
        self.target_map.get(target_name, namespace)
    }

    pub fn registries(&self) -> &[Registry] {
        &self.registries
    }

    pub fn target_map(&self) -> &TargetMap {
        &self.target_map
    }
}

/// Group registries by name and reject names declared by more than one file.
fn check_registry_names(registries: &[Registry]) -> Result<(), BeginError> {
    let mut paths_by_name: IndexMap<&str, Vec<PathBuf>> = IndexMap::new();
    for registry in registries {
        let paths = paths_by_name.entry(registry.name()).or_default();
        if !paths.iter().any(|p| p == registry.path()) {
            paths.push(registry.path().to_path_buf());
        }
    }

    let colliding: IndexMap<String, Vec<PathBuf>> = paths_by_name
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(name, paths)| (name.to_string(), paths))
        .collect();

    if colliding.is_empty() {
        Ok(())
    } else {
        Err(BeginError::RegistryNameCollision { colliding })
    }
}
