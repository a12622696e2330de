//! TargetMap - the compiled index from target name to namespace to target.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::core::errors::BeginError;
use crate::core::registry::Registry;
use crate::core::target::Target;

/// Read-only two-level index: target name -> namespace -> target.
#[derive(Debug, Clone, Default)]
pub struct TargetMap {
    targets: IndexMap<String, IndexMap<String, Arc<Target>>>,
}

impl TargetMap {
    /// Build a compiled map from every target of every registry.
    pub fn create(registries: &[Registry]) -> Self {
        let mut map = TargetMap::default();
        for registry in registries {
            map.add_registry(registry);
        }
        tracing::debug!(
            "compiled {} target name(s) from {} registries",
            map.targets.len(),
            registries.len()
        );
        map
    }

    fn add_registry(&mut self, registry: &Registry) {
        for target in registry.targets() {
            self.targets
                .entry(target.function_name().to_string())
                .or_default()
                .insert(target.registry_namespace().to_string(), Arc::clone(target));
        }
    }

    /// Resolve `(target_name, namespace)` to a target.
    pub fn get(&self, target_name: &str, namespace: &str) -> Result<&Arc<Target>, BeginError> {
        self.targets
            .get(target_name)
            .and_then(|by_namespace| by_namespace.get(namespace))
            .ok_or_else(|| BeginError::TargetNotFound {
                target_name: target_name.to_string(),
                namespace: namespace.to_string(),
                available_in: self.namespaces_for(target_name),
            })
    }

    /// Namespaces in which `target_name` is defined.
    pub fn namespaces_for(&self, target_name: &str) -> Vec<String> {
        self.targets
            .get(target_name)
            .map(|by_namespace| by_namespace.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// All targets, grouped by name in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Target>> {
        self.targets.values().flat_map(|by_namespace| by_namespace.values())
    }

    /// Number of distinct target names.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::target_fn;

    fn registry(name: &str, path: &str, targets: &[&str]) -> Registry {
        let mut registry = Registry::with_name(name, path);
        for target in targets {
            registry.register_target(target_fn(*target, |_| Ok(())));
        }
        registry
    }

    #[test]
    fn test_get_returns_registered_instance() {
        let registries = vec![
            registry("default", "targets.toml", &["install", "tests"]),
            registry("ci", "ci/targets.toml", &["lint", "tests"]),
        ];
        let map = TargetMap::create(&registries);

        for registry in &registries {
            for target in registry.targets() {
                let found = map
                    .get(target.function_name(), target.registry_namespace())
                    .unwrap();
                assert!(Arc::ptr_eq(found, target));
            }
        }
    }

    #[test]
    fn test_same_name_different_namespaces() {
        let registries = vec![
            registry("default", "targets.toml", &["tests"]),
            registry("ci", "ci/targets.toml", &["tests"]),
        ];
        let map = TargetMap::create(&registries);

        assert_eq!(map.len(), 1);
        assert_eq!(map.iter().count(), 2);
        assert_eq!(map.get("tests", "ci").unwrap().registry_namespace(), "ci");
        assert_eq!(map.namespaces_for("tests"), vec!["default", "ci"]);
    }

    #[test]
    fn test_missing_name_or_namespace() {
        let map = TargetMap::create(&[registry("ci", "ci/targets.toml", &["lint"])]);

        let err = map.get("install", "ci").unwrap_err();
        assert!(matches!(
            err,
            BeginError::TargetNotFound { ref available_in, .. } if available_in.is_empty()
        ));

        let err = map.get("lint", "default").unwrap_err();
        match err {
            BeginError::TargetNotFound {
                target_name,
                namespace,
                available_in,
            } => {
                assert_eq!(target_name, "lint");
                assert_eq!(namespace, "default");
                assert_eq!(available_in, vec!["ci"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_map() {
        let map = TargetMap::create(&[]);
        assert!(map.is_empty());
        assert!(map.get("anything", "default").is_err());
    }
}
