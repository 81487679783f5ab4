//! noin - node installer
//!
//! Clones a Node.js project from GitHub, builds it, copies the result to a
//! target directory and installs it as a systemd service (Linux) or as a plain
//! application.

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod common;
mod config;
mod configurator;
mod environment;
mod error;
mod git;
mod manifest;
mod pipeline;
mod platform;
mod post_commands;
mod process;
mod prompt;
mod service;
mod temp;
#[cfg(test)]
mod test_fixtures;
mod ui;

use cli::{Cli, Commands};
use error::NoinError;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "noin=debug" } else { "noin=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn report(err: &NoinError) {
    ui::error(&format!("Error: {err}"));
    if let NoinError::ExternalCommandFailed { stderr, .. } = err {
        ui::command_output(stderr);
    }
}

/// Parse the command line; usage errors exit with 1 like every other failure
fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                eprint!("{e}");
                std::process::exit(1);
            }
        },
    }
}

fn main() {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        None => commands::install::run(&cli.install),
        Some(Commands::Version) => commands::version::run(),
        Some(Commands::Completions(args)) => commands::completions::run(args),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}
