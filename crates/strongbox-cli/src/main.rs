//! Strongbox CLI - a local, file-based password manager
//!
//! This is the command-line interface for Strongbox. It resolves settings,
//! collects passphrases and hands everything else to `strongbox-core`.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;
mod output;

use clap::Parser;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::errors::CliError;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match run(&cli) {
        Ok(()) => Ok(()),
        Err(err) => match CliError::classify(&err) {
            Some(cli_err) => cli_err.exit(),
            None => Err(err),
        },
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init(args) => commands::handle_init(&AppContext::new(cli)?, args.length, args.force),
        Commands::Create(args) => commands::handle_create(&AppContext::new(cli)?, args),
        Commands::Get(args) => commands::handle_get(&AppContext::new(cli)?, args),
        Commands::List(args) => commands::handle_list(&AppContext::new(cli)?, args),
        Commands::Rotate => commands::handle_rotate(&AppContext::new(cli)?),
        Commands::Completions { shell } => commands::handle_completions(*shell),
    }
}
