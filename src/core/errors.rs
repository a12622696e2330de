//! Error types raised by the target registry and dispatch core.
//!
//! Every variant of [`BeginError`] maps to exactly one [`ExitCode`]. The
//! mapping is an exhaustive match, so adding a variant without choosing an
//! exit code fails to compile.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Process exit codes.
///
/// A number of exit codes have special meanings to shells and should be
/// avoided (see <https://tldp.org/LDP/abs/html/exitcodes.html>). These values
/// are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    Success = 0,
    UnspecifiedFailure = 1,
    RegistryNameCollision = 3,
    TargetNotFound = 4,
    InvalidRequest = 5,
    InvalidTargetFile = 6,
}

impl ExitCode {
    /// The numeric process exit status.
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures recognised by the core.
///
/// Errors raised by a target's own callable are not wrapped in this type;
/// they travel back to the caller unmodified.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum BeginError {
    /// Two or more distinct source files declare a registry with the same name.
    #[error("{}", collision_message(.colliding))]
    #[diagnostic(
        code(begin::registry::name_collision),
        help("Rename one of the registries so that each namespace is declared by a single file")
    )]
    RegistryNameCollision {
        /// Registry name -> every file that declared it.
        colliding: IndexMap<String, Vec<PathBuf>>,
    },

    /// The requested `(name, namespace)` pair is not in the target map.
    #[error("no target named `{target_name}` in namespace `{namespace}`")]
    #[diagnostic(code(begin::resolve::target_not_found))]
    TargetNotFound {
        target_name: String,
        namespace: String,
        /// Namespaces in which a target with this name does exist.
        available_in: Vec<String>,
    },

    /// A request token could not be interpreted.
    #[error("invalid request `{token}`: {reason}")]
    #[diagnostic(code(begin::request::invalid))]
    InvalidRequest { token: String, reason: String },

    /// A targets file could not be turned into registries.
    #[error("invalid targets file {}: {message}", .path.display())]
    #[diagnostic(code(begin::source::invalid_file))]
    InvalidTargetFile { path: PathBuf, message: String },
}

fn collision_message(colliding: &IndexMap<String, Vec<PathBuf>>) -> String {
    let mut lines = Vec::new();
    for (name, paths) in colliding {
        lines.push(format!(
            "Found multiple registries with name `{}` in files:",
            name
        ));
        for path in paths {
            lines.push(format!("\t{}", path.display()));
        }
    }
    lines.join("\n")
}

impl BeginError {
    /// The exit code the process terminates with for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            BeginError::RegistryNameCollision { .. } => ExitCode::RegistryNameCollision,
            BeginError::TargetNotFound { .. } => ExitCode::TargetNotFound,
            BeginError::InvalidRequest { .. } => ExitCode::InvalidRequest,
            BeginError::InvalidTargetFile { .. } => ExitCode::InvalidTargetFile,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            BeginError::RegistryNameCollision { colliding } => {
                let mut diag = Diagnostic::error(format!(
                    "{} registry name(s) declared in more than one file",
                    colliding.len()
                ));
                for (name, paths) in colliding {
                    diag = diag.with_paths(
                        format!("Found multiple registries with name `{}` in files:", name),
                        paths,
                    );
                }
                diag.with_hint(suggestions::RENAME_REGISTRY)
            }

            BeginError::TargetNotFound {
                target_name,
                namespace,
                available_in,
            } => {
                let mut diag = Diagnostic::error(self.to_string());
                if !available_in.is_empty() {
                    let candidates: Vec<String> = available_in
                        .iter()
                        .map(|ns| format!("{}@{}", target_name, ns))
                        .collect();
                    diag = diag.with_note(format!("did you mean: {}?", candidates.join(", ")));
                } else if namespace != crate::core::DEFAULT_REGISTRY_NAME {
                    diag = diag.with_note(format!("namespace `{}` was searched", namespace));
                }
                diag.with_hint(suggestions::LIST_TARGETS)
            }

            BeginError::InvalidRequest { .. } => {
                Diagnostic::error(self.to_string()).with_hint(suggestions::REQUEST_SYNTAX)
            }

            BeginError::InvalidTargetFile { path, message } => {
                Diagnostic::error(format!("invalid targets file: {}", message))
                    .with_location(path)
            }
        }
    }
}
