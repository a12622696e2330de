//! Pre-built target bodies wrapping Rust developer tools.
//!
//! A recipe runs its tool as a child process with inherited stdio. Request
//! options are forwarded as `--key=value` flags after the configured
//! arguments. A non-zero exit status comes back as a
//! [`ProcessExitError`](crate::util::ProcessExitError) carrying the tool's
//! status.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::core::{Options, TargetFunction};
use crate::util::process::{find_executable, ProcessBuilder};

/// Tools with a built-in recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipe {
    /// `cargo fmt`
    Fmt,
    /// `cargo clippy`
    Clippy,
    /// `cargo test`
    Test,
    /// `cargo build`
    Build,
    /// `cargo doc`
    Doc,
    /// `cargo install`
    Install,
    /// `cargo llvm-cov`
    Coverage,
}

impl Recipe {
    pub const ALL: [Recipe; 7] = [
        Recipe::Fmt,
        Recipe::Clippy,
        Recipe::Test,
        Recipe::Build,
        Recipe::Doc,
        Recipe::Install,
        Recipe::Coverage,
    ];

    /// Name used in targets files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Recipe::Fmt => "cargo-fmt",
            Recipe::Clippy => "cargo-clippy",
            Recipe::Test => "cargo-test",
            Recipe::Build => "cargo-build",
            Recipe::Doc => "cargo-doc",
            Recipe::Install => "cargo-install",
            Recipe::Coverage => "cargo-llvm-cov",
        }
    }

    /// The program to run.
    pub fn program(&self) -> &'static str {
        "cargo"
    }

    /// Arguments placed before any user arguments.
    pub fn base_args(&self) -> &'static [&'static str] {
        match self {
            Recipe::Fmt => &["fmt"],
            Recipe::Clippy => &["clippy"],
            Recipe::Test => &["test"],
            Recipe::Build => &["build"],
            Recipe::Doc => &["doc"],
            Recipe::Install => &["install"],
            Recipe::Coverage => &["llvm-cov"],
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Recipe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Recipe::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Recipe::ALL.iter().map(|r| r.as_str()).collect();
                format!("unknown recipe `{}`; expected one of: {}", s, known.join(", "))
            })
    }
}

/// Render request options as command-line flags.
///
/// `key:value` becomes `--key=value`; an empty value becomes `--key`.
pub fn options_to_flags(options: &Options) -> Vec<String> {
    options
        .iter()
        .map(|(key, value)| {
            if value.is_empty() {
                format!("--{}", key)
            } else {
                format!("--{}={}", key, value)
            }
        })
        .collect()
}

/// A target body running a [`Recipe`].
#[derive(Debug, Clone)]
pub struct RecipeTarget {
    name: String,
    recipe: Recipe,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl RecipeTarget {
    pub fn new(name: impl Into<String>, recipe: Recipe) -> Self {
        RecipeTarget {
            name: name.into(),
            recipe,
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Fixed arguments passed to the tool on every run.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Run the tool in this directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn recipe(&self) -> Recipe {
        self.recipe
    }

    /// The process that would run for `options`.
    pub fn command(&self, program: PathBuf, options: &Options) -> ProcessBuilder {
        let mut process = ProcessBuilder::new(program)
            .args(self.recipe.base_args())
            .args(&self.args)
            .args(options_to_flags(options));
        if let Some(ref cwd) = self.cwd {
            process = process.cwd(cwd);
        }
        process
    }
}

impl TargetFunction for RecipeTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, options: &Options) -> Result<()> {
        let program = find_executable(self.recipe.program()).ok_or_else(|| {
            anyhow!(
                "recipe `{}` needs `{}`, which was not found in PATH",
                self.recipe,
                self.recipe.program()
            )
        })?;

        let process = self.command(program, options);
        tracing::info!("running `{}`", process.display_command());
        process.run()
    }
}
