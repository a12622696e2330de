//! begin CLI - run targets declared in targets files

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use begin::util::diagnostic::{emit, Diagnostic};
use begin::util::ProcessExitError;
use begin::{BeginError, ExitCode, GlobalContext};

mod cli;
mod commands;

use cli::Cli;

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("begin=debug")
    } else {
        EnvFilter::new("begin=info")
    };

    let mut color = !cli.no_color && io::stderr().is_terminal();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(color)
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run(cli, &mut color) {
        std::process::exit(report(&e, color));
    }
}

fn run(cli: Cli, color: &mut bool) -> Result<()> {
    if let Some(shell) = cli.completions {
        return commands::completions::execute(shell);
    }

    let mut ctx = GlobalContext::new()?;
    if let Some(ref dir) = cli.global_dir {
        ctx = ctx.with_global_dir(dir);
    }
    if let Some(ref extension) = cli.extension {
        ctx = ctx.with_extension(extension.as_str());
    }
    *color = *color && ctx.color();

    if cli.list {
        commands::list::execute(&ctx, cli.json)
    } else {
        commands::run::execute(&ctx, &cli.requests)
    }
}

/// Print the error and pick the process exit code.
fn report(error: &anyhow::Error, color: bool) -> i32 {
    if let Some(err) = error.downcast_ref::<BeginError>() {
        emit(&err.to_diagnostic(), color);
        return err.exit_code().code();
    }

    emit(&Diagnostic::error(format!("{:#}", error)), color);
    match error.downcast_ref::<ProcessExitError>() {
        Some(ProcessExitError { code: Some(code), .. }) if *code != 0 => *code,
        _ => ExitCode::UnspecifiedFailure.code(),
    }
}
