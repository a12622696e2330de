//! Target sources.
//!
//! Sources find targets files and turn each one into the registries it
//! declares. Files are searched in the working directory and then in the
//! global targets directory, both recursively.

pub mod command;
pub mod targets_file;

use std::path::{Path, PathBuf};

use anyhow::Result;
use indexmap::IndexSet;

use crate::core::Registry;
use crate::util::fs::find_files_matching;
use crate::util::GlobalContext;

pub use command::{CommandTarget, SequenceTarget};
pub use targets_file::{TargetsFile, TomlSourceLoader};

/// Turns a source file into registries.
///
/// Every registry returned must carry `path` as its defining source.
pub trait SourceLoader {
    /// Load the registries declared by the file at `path`.
    fn load(&self, path: &Path) -> Result<Vec<Registry>>;
}

/// Find targets files under the working directory and the global directory.
///
/// A missing global directory is skipped. A file reachable from both roots
/// is returned once.
pub fn target_file_paths(ctx: &GlobalContext) -> Result<Vec<PathBuf>> {
    let pattern = ctx.extension();
    let mut seen = IndexSet::new();
    let mut paths = Vec::new();

    let mut roots = vec![ctx.cwd()];
    if ctx.global_dir().is_dir() {
        roots.push(ctx.global_dir());
    } else {
        tracing::debug!(
            "global targets directory {} does not exist, skipping",
            ctx.global_dir().display()
        );
    }

    for root in roots {
        for path in find_files_matching(root, pattern)? {
            let key = path.canonicalize().unwrap_or_else(|_| path.clone());
            if seen.insert(key) {
                paths.push(path);
            }
        }
    }

    tracing::debug!("found {} targets file(s) matching `{}`", paths.len(), pattern);
    Ok(paths)
}

/// Load every registry from `paths`, in order.
pub fn load_registries(loader: &dyn SourceLoader, paths: &[PathBuf]) -> Result<Vec<Registry>> {
    let mut registries = Vec::new();
    for path in paths {
        let loaded = loader.load(path)?;
        tracing::debug!("{}: {} registries", path.display(), loaded.len());
        registries.extend(loaded);
    }
    Ok(registries)
}
