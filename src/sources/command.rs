//! Target bodies declared in targets files.

use std::path::PathBuf;
use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::{Captures, Regex};

use crate::core::{Options, TargetFn, TargetFunction};
use crate::util::process::ProcessBuilder;

/// Matches `{{key}}` placeholders, allowing inner whitespace.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z0-9_.-]+)\s*\}\}").expect("placeholder regex is valid")
});

/// Prefix of the environment variables carrying request options.
pub const OPTION_ENV_PREFIX: &str = "BEGIN_OPT_";

/// Substitute `{{key}}` placeholders with option values.
pub fn render_command(template: &str, options: &Options) -> Result<String> {
    let mut missing = Vec::new();
    let rendered = PLACEHOLDER.replace_all(template, |caps: &Captures<'_>| {
        let key = &caps[1];
        match options.get(key) {
            Some(value) => value.clone(),
            None => {
                missing.push(key.to_string());
                String::new()
            }
        }
    });

    if !missing.is_empty() {
        bail!(
            "missing option(s) {}; pass them as `key:value` after the target",
            missing
                .iter()
                .map(|k| format!("`{}`", k))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(rendered.into_owned())
}

/// Environment variable name for an option key.
pub fn option_env_var(key: &str) -> String {
    format!(
        "{}{}",
        OPTION_ENV_PREFIX,
        key.to_uppercase().replace(['-', '.'], "_")
    )
}

/// Runs a shell command.
#[derive(Debug, Clone)]
pub struct CommandTarget {
    name: String,
    command: String,
    cwd: Option<PathBuf>,
}

impl CommandTarget {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        CommandTarget {
            name: name.into(),
            command: command.into(),
            cwd: None,
        }
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// The process that would run for `options`.
    pub fn process(&self, options: &Options) -> Result<ProcessBuilder> {
        let command = render_command(&self.command, options)?;
        let mut process = ProcessBuilder::shell(&command);
        for (key, value) in options {
            process = process.env(option_env_var(key), value);
        }
        if let Some(ref cwd) = self.cwd {
            process = process.cwd(cwd);
        }
        Ok(process)
    }
}

impl TargetFunction for CommandTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, options: &Options) -> Result<()> {
        let process = self.process(options)?;
        tracing::info!("running `{}`", render_command(&self.command, options)?);
        process.run()
    }
}

/// Calls other targets of the same file in order, passing the options on.
#[derive(Debug, Clone)]
pub struct SequenceTarget {
    name: String,
    steps: Vec<TargetFn>,
}

impl SequenceTarget {
    pub fn new(name: impl Into<String>, steps: Vec<TargetFn>) -> Self {
        SequenceTarget {
            name: name.into(),
            steps,
        }
    }

    pub fn steps(&self) -> &[TargetFn] {
        &self.steps
    }
}

impl TargetFunction for SequenceTarget {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, options: &Options) -> Result<()> {
        for step in &self.steps {
            tracing::debug!("{}: calling {}", self.name, step.name());
            step.call(options)?;
        }
        Ok(())
    }
}
