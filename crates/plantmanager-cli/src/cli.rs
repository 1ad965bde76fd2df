use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "plantmanager")]
#[command(about = "Browse plants and keep track of when to water them")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Optional path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the environments plants can be filtered by
    Environments {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse the plant catalog
    Browse {
        /// Environment key to filter loaded plants by
        #[arg(short, long, default_value = "all")]
        environment: String,
        /// Number of catalog pages to load
        #[arg(short, long, default_value = "1")]
        pages: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a plant and schedule its next watering
    Save {
        /// Catalog plant ID
        id: String,
        /// Time of day to be reminded at (HH:MM, UTC); defaults to now
        #[arg(long, value_name = "HH:MM")]
        at: Option<String>,
    },
    /// Show saved plants and the next watering
    #[command(alias = "list")]
    MyPlants {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a saved plant
    Remove {
        /// Saved plant ID
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Inspect or write the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the config file
    Init {
        /// Catalog API base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Plants per catalog page
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,
        /// Display locale (pt-BR or en-US)
        #[arg(long, value_name = "LOCALE")]
        locale: Option<String>,
        /// HTTP timeout in seconds (0 disables it)
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },
    /// Print the effective config
    Show,
}
