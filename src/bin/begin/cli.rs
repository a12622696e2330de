//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

/// begin - run targets declared in targets files
///
/// Targets are requested as `name` or `name@namespace`. Each request may be
/// followed by `key:value` options, which are passed to that target.
#[derive(Parser)]
#[command(name = "begin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The pattern to match targets file names against
    #[arg(short, long, value_name = "PATTERN")]
    pub extension: Option<String>,

    /// The directory holding global targets files [default: $BEGIN_HOME or ~/.begin]
    #[arg(short, long, value_name = "DIR")]
    pub global_dir: Option<PathBuf>,

    /// List the available targets instead of running any
    #[arg(short, long)]
    pub list: bool,

    /// Print the target list as JSON
    #[arg(long, requires = "list")]
    pub json: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Targets to run, each followed by its `key:value` options
    ///
    /// Flags may appear anywhere; tokens after `--` are always requests.
    #[arg(value_name = "REQUEST")]
    pub requests: Vec<String>,
}
