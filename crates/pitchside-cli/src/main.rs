//! Pitchside CLI - keep score of a live match from the terminal
//!
//! Create matches, run the PIN-gated admin console and follow a match as a
//! public viewer.

mod cli;
mod commands;
mod config;
mod error;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::admin::run_admin;
use crate::commands::common::open_store;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::create::run_create;
use crate::commands::list::run_list;
use crate::commands::share::run_share;
use crate::commands::show::run_show;
use crate::commands::watch::run_watch;
use crate::config::{CliConfig, Overrides, Settings};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    init_logging()?;

    let cli = Cli::parse();
    let mut overrides = Overrides {
        db_path: cli.db_path,
        store: cli.store,
        ..Overrides::default()
    };

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
        Commands::Config { command } => run_config(command, overrides),
        Commands::Create { local, away, pin } => {
            let settings = resolve_settings(overrides)?;
            let store = open_store(&settings).await?;
            run_create(&store, &local, &away, pin.as_deref(), &settings.public_origin).await
        }
        Commands::List { json } => {
            let settings = resolve_settings(overrides)?;
            let store = open_store(&settings).await?;
            run_list(&store, json).await
        }
        Commands::Show { id, json } => {
            let settings = resolve_settings(overrides)?;
            let store = open_store(&settings).await?;
            run_show(&store, &id, json).await
        }
        Commands::Share { id, origin } => {
            overrides.origin = origin;
            let settings = resolve_settings(overrides)?;
            let store = open_store(&settings).await?;
            run_share(&store, &id, &settings.public_origin).await
        }
        Commands::Watch { id, interval, once } => {
            overrides.poll_interval_secs = interval;
            let settings = resolve_settings(overrides)?;
            let store = open_store(&settings).await?;
            run_watch(store, &id, settings.poll_interval, once).await
        }
        Commands::Admin { id, pin } => {
            let settings = resolve_settings(overrides)?;
            let store = open_store(&settings).await?;
            run_admin(store, &id, &pin).await
        }
    }
}

fn init_logging() -> Result<(), CliError> {
    let directive = "pitchside=info"
        .parse()
        .map_err(|error| CliError::Config(format!("invalid log directive: {error}")))?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();
    Ok(())
}

fn resolve_settings(overrides: Overrides) -> Result<Settings, CliError> {
    let config = CliConfig::load().map_err(CliError::Config)?;
    Settings::resolve(overrides, &config).map_err(CliError::Config)
}
