//! Resolve and run requested targets.

use std::sync::Arc;

use anyhow::Result;

use crate::core::{BeginError, RegistryManager, Request, Target};
use crate::sources::{load_registries, target_file_paths, SourceLoader};
use crate::util::diagnostic::suggestions;
use crate::util::GlobalContext;

/// Discover targets files, load them, and build a validated manager.
pub fn load_manager(ctx: &GlobalContext, loader: &dyn SourceLoader) -> Result<RegistryManager> {
    let paths = target_file_paths(ctx)?;
    if paths.is_empty() {
        tracing::warn!(
            "no targets files matching `{}` found in {} or {}. {}",
            ctx.extension(),
            ctx.cwd().display(),
            ctx.global_dir().display(),
            suggestions::NO_TARGET_FILES
        );
    }

    let registries = load_registries(loader, &paths)?;
    Ok(RegistryManager::create(registries)?)
}

/// Resolve every request before anything runs.
///
/// The first request that does not resolve aborts the whole batch.
pub fn resolve_requests<'a>(
    manager: &'a RegistryManager,
    requests: &[Request],
) -> Result<Vec<&'a Arc<Target>>, BeginError> {
    requests
        .iter()
        .map(|request| manager.get_target(request.target_name(), request.registry_namespace()))
        .collect()
}

/// Run `requests` in order, stopping at the first failure.
///
/// Errors from a target are returned unchanged.
pub fn run_requests(manager: &RegistryManager, requests: &[Request]) -> Result<()> {
    let targets = resolve_requests(manager, requests)?;

    for (request, target) in requests.iter().zip(targets) {
        tracing::info!("running target `{}`", target);
        target.execute(request.options())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{parse_requests, target_fn, Registry};
    use crate::sources::TomlSourceLoader;
    use crate::test_support::{RecordingTarget, TargetTreeFixture};

    fn manager_with(recorders: &[(&str, &RecordingTarget)]) -> RegistryManager {
        let mut registries = Vec::new();
        for (namespace, recorder) in recorders {
            let mut registry = Registry::with_name(*namespace, format!("{}/targets.toml", namespace));
            registry.register_target(recorder.handle());
            registries.push(registry);
        }
        RegistryManager::create(registries).unwrap()
    }

    #[test]
    fn test_run_requests_passes_options() {
        let install = RecordingTarget::new("install");
        let tests = RecordingTarget::new("tests");
        let manager = manager_with(&[("global", &install), ("ci", &tests)]);

        let requests = parse_requests(["install@global", "key1:value1", "tests@ci"]).unwrap();
        run_requests(&manager, &requests).unwrap();

        assert_eq!(install.calls().len(), 1);
        assert_eq!(install.calls()[0]["key1"], "value1");
        assert_eq!(tests.calls().len(), 1);
        assert!(tests.calls()[0].is_empty());
    }

    #[test]
    fn test_unresolved_request_aborts_before_running() {
        let install = RecordingTarget::new("install");
        let manager = manager_with(&[("default", &install)]);

        let requests = parse_requests(["install", "missing"]).unwrap();
        let err = run_requests(&manager, &requests).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BeginError>(),
            Some(BeginError::TargetNotFound { .. })
        ));
        assert!(install.calls().is_empty());
    }

    #[test]
    fn test_target_error_is_propagated_unchanged() {
        #[derive(Debug, thiserror::Error)]
        #[error("custom failure")]
        struct CustomError;

        let after = RecordingTarget::new("after");
        let mut registry = Registry::new("targets.toml");
        registry.register_target(target_fn("fails", |_| Err(CustomError.into())));
        registry.register_target(after.handle());
        let manager = RegistryManager::create(vec![registry]).unwrap();

        let requests = parse_requests(["fails", "after"]).unwrap();
        let err = run_requests(&manager, &requests).unwrap_err();

        assert!(err.downcast_ref::<CustomError>().is_some());
        assert!(after.calls().is_empty());
    }

    #[test]
    fn test_load_manager_from_tree() {
        let tree = TargetTreeFixture::create();
        let ctx = GlobalContext::with_paths(tree.cwd_dir.clone(), tree.global_dir.clone());

        let manager = load_manager(&ctx, &TomlSourceLoader).unwrap();

        assert_eq!(manager.registries().len(), 5);
        assert!(manager.get_target("install", "global").is_ok());
        assert_eq!(manager.target_map().namespaces_for("hello").len(), 4);
    }

    #[test]
    fn test_load_manager_detects_collisions() {
        let tree = TargetTreeFixture::create();
        std::fs::write(
            tree.cwd_dir.join("ci_targets.toml"),
            crate::test_support::registry_toml("global"),
        )
        .unwrap();
        let ctx = GlobalContext::with_paths(tree.cwd_dir.clone(), tree.global_dir.clone());

        let err = load_manager(&ctx, &TomlSourceLoader).unwrap_err();
        let err = err.downcast_ref::<BeginError>().unwrap();
        assert_eq!(err.exit_code().code(), 3);
        assert!(err.to_string().contains(&tree.file_with_registry.display().to_string()));
    }
}
