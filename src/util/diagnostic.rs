//! Rendering of fatal errors for the terminal.
//!
//! A [`Diagnostic`] is a headline plus whatever begin knows about the
//! failure: the targets files involved, grouped under a title when several
//! files share the blame, free-form notes, and one hint on how to recover.

use std::fmt;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Hints shared between error sites.
pub mod suggestions {
    /// A requested target does not exist.
    pub const LIST_TARGETS: &str = "Run `begin --list` to see available targets";

    /// Two files declare the same registry name.
    pub const RENAME_REGISTRY: &str =
        "Give each registry a unique `name` in its targets file";

    /// A request token is malformed.
    pub const REQUEST_SYNTAX: &str =
        "Requests look like `name[@namespace] [key:value]...`";

    /// No targets files are found.
    pub const NO_TARGET_FILES: &str =
        "Create a `targets.toml` file, or pass `--extension` to match other files";
}

const RED: &str = "1;31";
const GREEN: &str = "1;32";
const CYAN: &str = "1;36";

/// Targets files listed under a common title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    pub title: String,
    pub paths: Vec<PathBuf>,
}

/// A fatal error as shown to the user.
#[derive(Debug, Clone, Default)]
pub struct Diagnostic {
    pub message: String,
    /// Files the error points at directly.
    pub locations: Vec<PathBuf>,
    pub groups: Vec<FileGroup>,
    pub notes: Vec<String>,
    pub hint: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.locations.push(path.into());
        self
    }

    /// List `paths` under `title`, one file per line.
    pub fn with_paths<I, P>(mut self, title: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.groups.push(FileGroup {
            title: title.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Set the recovery hint, replacing any earlier one.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Render for a terminal, with ANSI colors when `color` is set.
    pub fn render(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };
        let arrow = paint(CYAN, "-->");

        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", paint(RED, "error"), self.message);
        for path in &self.locations {
            let _ = writeln!(out, "  {} {}", arrow, path.display());
        }
        for group in &self.groups {
            let _ = writeln!(out, "  {}", group.title);
            for path in &group.paths {
                let _ = writeln!(out, "    {} {}", arrow, path.display());
            }
        }
        for note in &self.notes {
            let _ = writeln!(out, "  = {}", note);
        }
        if let Some(ref hint) = self.hint {
            let _ = writeln!(out, "{}: {}", paint(GREEN, "help"), hint);
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.render(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_groups_list_one_path_per_line() {
        let output = Diagnostic::error("1 registry name(s) declared in more than one file")
            .with_paths(
                "Found multiple registries with name `ci` in files:",
                ["a/targets.toml", "b/targets.toml"],
            )
            .with_hint(suggestions::RENAME_REGISTRY)
            .render(false);

        assert_eq!(
            output,
            "error: 1 registry name(s) declared in more than one file\n\
             \x20 Found multiple registries with name `ci` in files:\n\
             \x20   --> a/targets.toml\n\
             \x20   --> b/targets.toml\n\
             help: Give each registry a unique `name` in its targets file\n"
        );
    }

    #[test]
    fn test_location_and_notes() {
        let output = Diagnostic::error("invalid targets file: missing field `name`")
            .with_location("sub/targets.toml")
            .with_note("did you mean: tests@ci?")
            .render(false);

        assert!(output.contains("  --> sub/targets.toml\n"));
        assert!(output.contains("  = did you mean: tests@ci?\n"));
        assert!(!output.contains("help:"));
    }

    #[test]
    fn test_color_only_when_requested() {
        let diag = Diagnostic::error("boom").with_hint("retry");

        assert!(diag.render(true).starts_with("\x1b[1;31merror\x1b[0m: boom"));
        assert!(!diag.render(false).contains('\x1b'));
        assert_eq!(diag.to_string(), diag.render(false));
    }
}
