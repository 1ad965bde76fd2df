//! PlantManager CLI - browse plants and keep track of when to water them

mod cli;
mod commands;
mod error;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::browse::run_browse;
use crate::commands::common::{load_config, resolve_db_path};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::environments::run_environments;
use crate::commands::my_plants::run_my_plants;
use crate::commands::remove::run_remove;
use crate::commands::save::run_save;
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

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("plantmanager=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let (config, config_path) = load_config(cli.config.as_deref())?;
    let db_path = resolve_db_path(cli.db_path, &config);

    match cli.command {
        Commands::Environments { json } => run_environments(&config, json).await?,
        Commands::Browse {
            environment,
            pages,
            json,
        } => run_browse(&config, &environment, pages, json).await?,
        Commands::Save { id, at } => run_save(&config, &db_path, &id, at.as_deref()).await?,
        Commands::MyPlants { json } => run_my_plants(&config, &db_path, json).await?,
        Commands::Remove { id, yes } => run_remove(&config, &db_path, &id, yes).await?,
        Commands::Config { command } => run_config(command, config, &config_path)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
