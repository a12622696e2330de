//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use walkdir::WalkDir;

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))
}

/// Recursively find files under `base` whose file name matches `pattern`.
///
/// The pattern is a glob matched against the file name only (e.g.
/// `*targets.toml`). Symlinked files are matched; symlinked directories are
/// not descended into. Results are sorted. Unreadable entries are skipped
/// with a warning.
pub fn find_files_matching(base: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern =
        Pattern::new(pattern).with_context(|| format!("invalid file pattern: {}", pattern))?;

    let mut results = Vec::new();
    for entry in WalkDir::new(base).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.path().is_file() {
            continue;
        }
        if pattern.matches(&entry.file_name().to_string_lossy()) {
            results.push(entry.into_path());
        }
    }

    results.sort();
    Ok(results)
}
