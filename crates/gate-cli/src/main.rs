//! registry-gate CLI
//!
//! Validates pull requests against a plugin or theme registry.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use context::Context;
use error::{CliError, Result};

/// Exit status for errors that stop a command before it reaches a verdict.
const EXIT_USAGE: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(EXIT_USAGE);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Commands::Validate {
            refs,
            pr,
            match_mode,
            json,
        } => {
            let mut context = Context::load(&cli.root, &refs)?;
            if let Some(mode) = match_mode {
                context.config.classifier.match_mode = mode;
            }
            commands::run_validate(&context, pr, json).await
        }
        Commands::Changes { kind, refs, json } => {
            let context = Context::load(&cli.root, &refs)?;
            commands::run_changes(&context, kind, json)
        }
        Commands::Locate {
            repo,
            version,
            asset,
            json,
        } => {
            let context = Context::load(&cli.root, &Default::default())?;
            commands::run_locate(&context, &repo, &version, &asset, json).await
        }
        Commands::Lint { kind, file, json } => {
            let context = Context::load(&cli.root, &Default::default())?;
            commands::run_lint(&context, kind, file.as_deref(), json)
        }
    }
}

/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing(verbose: bool) -> Result<()> {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    result.map_err(|e| CliError::user(format!("failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");
    Ok(())
}
