//! Listing of the available targets.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;

use crate::core::RegistryManager;

/// One resolvable target, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSummary {
    pub name: String,
    pub namespace: String,
    pub description: Option<String>,
    pub source: PathBuf,
}

impl TargetSummary {
    /// The identifier to type on the command line.
    pub fn identifier(&self) -> String {
        format!("{}@{}", self.name, self.namespace)
    }
}

/// Every target the manager resolves, in discovery order.
///
/// A target shadowed by a later registration of the same key is omitted.
pub fn list_targets(manager: &RegistryManager) -> Vec<TargetSummary> {
    let map = manager.target_map();
    let mut summaries = Vec::new();

    for registry in manager.registries() {
        for target in registry.targets() {
            let resolved = map.get(target.function_name(), target.registry_namespace());
            if !matches!(resolved, Ok(found) if Arc::ptr_eq(found, target)) {
                continue;
            }
            summaries.push(TargetSummary {
                name: target.function_name().to_string(),
                namespace: target.registry_namespace().to_string(),
                description: target.description().map(str::to_string),
                source: registry.path().to_path_buf(),
            });
        }
    }

    summaries
}

/// Render summaries as an aligned table.
pub fn format_listing(summaries: &[TargetSummary]) -> String {
    if summaries.is_empty() {
        return "No targets found.\n".to_string();
    }

    let width = summaries
        .iter()
        .map(|s| s.identifier().len())
        .max()
        .unwrap_or(0);

    let mut output = String::from("Available targets:\n");
    for summary in summaries {
        let description = summary.description.as_deref().unwrap_or("");
        let line = format!(
            "    {:<width$}  {}",
            summary.identifier(),
            description,
            width = width
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{target_fn, Registry, TargetOptions};

    fn manager() -> RegistryManager {
        let mut default = Registry::new("targets.toml");
        default.register_target_with(TargetOptions::new().with_description("Install it"))(
            target_fn("install", |_| Ok(())),
        );
        let mut ci = Registry::with_name("ci", "ci/targets.toml");
        ci.register_target(target_fn("lint", |_| Ok(())));
        RegistryManager::create(vec![default, ci]).unwrap()
    }

    #[test]
    fn test_list_targets() {
        let summaries = list_targets(&manager());

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].identifier(), "install@default");
        assert_eq!(summaries[0].description.as_deref(), Some("Install it"));
        assert_eq!(summaries[1].source, PathBuf::from("ci/targets.toml"));
    }

    #[test]
    fn test_shadowed_target_is_listed_once() {
        let mut first = Registry::new("targets.toml");
        first.register_target(target_fn("install", |_| Ok(())));
        let mut second = Registry::new("targets.toml");
        second.register_target(target_fn("install", |_| Ok(())));
        let manager = RegistryManager::create(vec![first, second]).unwrap();

        assert_eq!(list_targets(&manager).len(), 1);
    }

    #[test]
    fn test_format_listing() {
        let output = format_listing(&list_targets(&manager()));

        assert!(output.starts_with("Available targets:\n"));
        assert!(output.contains("    install@default  Install it\n"));
        assert!(output.contains("    lint@ci\n"));
        assert_eq!(format_listing(&[]), "No targets found.\n");
    }
}
