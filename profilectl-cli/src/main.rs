//! profilectl CLI - read and edit user profiles
//!
//! Drives every profile store operation from the command line:
//! - `get`, `list`, `search` for reads
//! - `create`, `update`, `delete` for writes
//! - `config` to inspect configuration
//!
//! The store is PostgreSQL by default; `--memory` runs against an
//! in-process store seeded from a JSON file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use profilectl_store::ProfilectlConfig;
use tracing::debug;

mod commands;
mod output;
mod tracing_setup;

use output::OutputFormat;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "profilectl",
    author,
    version,
    about = "Read and edit user profiles stored in PostgreSQL"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human", global = true)]
    output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where profile data lives
#[derive(Parser, Debug, Clone)]
pub struct StoreArgs {
    /// Database URL (overrides config file)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    pub database_url: Option<String>,

    /// Use an in-memory store instead of PostgreSQL
    #[arg(long, global = true)]
    pub memory: bool,

    /// JSON file with users (and optional profiles) to seed the in-memory store
    #[arg(long, value_name = "FILE", global = true, requires = "memory")]
    pub seed: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show a user joined with their profile
    Get(commands::profile::GetArgs),
    /// Create a profile for a user
    Create(commands::profile::CreateArgs),
    /// Update fields of an existing profile (unset fields are kept)
    Update(commands::profile::UpdateArgs),
    /// Delete a user's profile (succeeds if none exists)
    Delete(commands::profile::DeleteArgs),
    /// List all users with their profile summary, newest first
    List,
    /// Search usernames, display names and skills (max 20 results)
    Search(commands::profile::SearchArgs),
    /// Inspect profilectl configuration (path, show)
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values must be in the environment before clap reads DATABASE_URL
    let dotenv = profilectl_store::config::load_dotenv();
    let cli = Cli::parse();

    let config = ProfilectlConfig::load().context("Failed to load configuration")?;
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        default_level: config.logging.level.clone(),
    })
    .context("Failed to initialize logging")?;
    dotenv.log();
    debug!(config_path = %ProfilectlConfig::config_path().display(), "configuration loaded");

    let format = if cli.json {
        OutputFormat::Json
    } else {
        cli.output
    };

    let store_args = &cli.store;
    match cli.command {
        Commands::Config(args) => commands::config::run_config(args, &config, format),
        Commands::Get(args) => {
            let store = commands::open_store(store_args, &config).await?;
            commands::profile::run_get(store.as_ref(), args, format).await
        }
        Commands::Create(args) => {
            let store = commands::open_store(store_args, &config).await?;
            commands::profile::run_create(store.as_ref(), args, format).await
        }
        Commands::Update(args) => {
            let store = commands::open_store(store_args, &config).await?;
            commands::profile::run_update(store.as_ref(), args, format).await
        }
        Commands::Delete(args) => {
            let store = commands::open_store(store_args, &config).await?;
            commands::profile::run_delete(store.as_ref(), args, format).await
        }
        Commands::List => {
            let store = commands::open_store(store_args, &config).await?;
            commands::profile::run_list(store.as_ref(), format).await
        }
        Commands::Search(args) => {
            let store = commands::open_store(store_args, &config).await?;
            commands::profile::run_search(store.as_ref(), args, format).await
        }
    }
}
