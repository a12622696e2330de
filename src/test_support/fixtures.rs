//! Test fixtures for common test scenarios.
//!
//! [`TargetTreeFixture`] lays out a working directory, a home directory
//! holding a global targets directory, and an alternative global directory.
//! Each contains a few targets files and a few files that must not match.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// The only fixture file with targets of interest: one `install` target in
/// the `global` registry.
pub const GLOBAL_TARGETS: &str = r#"
[[registry]]
name = "global"

[[registry.targets]]
name = "install"
description = "Global install"
run = "echo global install"
"#;

/// On-disk tree of targets files in a temporary directory.
pub struct TargetTreeFixture {
    tmp: TempDir,
    /// Stands in for the working directory
    pub cwd_dir: PathBuf,
    /// Stands in for the user's home directory
    pub home_dir: PathBuf,
    /// `home_dir/.begin`
    pub global_dir: PathBuf,
    /// Alternative global directory
    pub override_dir: PathBuf,
    /// File declaring [`GLOBAL_TARGETS`]
    pub file_with_registry: PathBuf,
}

impl TargetTreeFixture {
    /// Create the tree.
    pub fn create() -> Self {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let cwd_dir = root.join("cwd");
        let home_dir = root.join("home");
        let global_dir = home_dir.join(".begin");
        let override_dir = root.join("override");

        let files: [(PathBuf, String); 10] = [
            (cwd_dir.join("targets.toml"), registry_toml("default")),
            (cwd_dir.join("sub_dir/sub_dir_targets.toml"), registry_toml("sub")),
            (cwd_dir.join("targets.toml.bak"), String::new()),
            (cwd_dir.join("sub_dir/notes.md"), "# notes".to_string()),
            (global_dir.join("targets.toml"), GLOBAL_TARGETS.to_string()),
            (global_dir.join("other_targets.toml"), registry_toml("other")),
            (global_dir.join("sub_dir/sub_dir_targets.toml"), registry_toml("global_sub")),
            (global_dir.join("config.toml"), String::new()),
            (override_dir.join("targets.toml"), registry_toml("override")),
            (override_dir.join("targets_old.toml"), String::new()),
        ];
        for (path, contents) in &files {
            write(path, contents);
        }

        TargetTreeFixture {
            file_with_registry: global_dir.join("targets.toml"),
            tmp,
            cwd_dir,
            home_dir,
            global_dir,
            override_dir,
        }
    }

    /// Root of the temporary tree.
    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Targets files found with the default global directory.
    pub fn expected_target_files(&self) -> Vec<PathBuf> {
        vec![
            self.cwd_dir.join("targets.toml"),
            self.cwd_dir.join("sub_dir/sub_dir_targets.toml"),
            self.global_dir.join("targets.toml"),
            self.global_dir.join("other_targets.toml"),
            self.global_dir.join("sub_dir/sub_dir_targets.toml"),
        ]
    }

    /// Targets files found with `override_dir` as the global directory.
    pub fn expected_target_files_overridden(&self) -> Vec<PathBuf> {
        vec![
            self.cwd_dir.join("targets.toml"),
            self.cwd_dir.join("sub_dir/sub_dir_targets.toml"),
            self.override_dir.join("targets.toml"),
        ]
    }
}

/// A registry with a single `hello` target.
pub fn registry_toml(name: &str) -> String {
    format!(
        r#"
[[registry]]
name = "{name}"

[[registry.targets]]
name = "hello"
run = "echo hello from {name}"
"#
    )
}

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}
