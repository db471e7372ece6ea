//! Rankwatch CLI
//!
//! Command-line interface for rankwatch

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "rankwatch")]
#[command(about = "Rankwatch - track ranking changes over time", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./rankwatch.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the configured one
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and apply migrations
    Init,
    /// Fetch rankings once or on a schedule
    Fetch(commands::fetch::FetchArgs),
    /// Save a payload from a local JSON file
    Import(commands::fetch::ImportArgs),
    /// Ranking summary of the latest snapshot
    Rankings,
    /// Most recent ranking changes
    Changes(commands::query::ChangesArgs),
    /// Rank history of one entity in one category
    History(commands::query::HistoryArgs),
    /// Stored snapshots, newest first
    Snapshots(commands::query::SnapshotsArgs),
    /// Serve the JSON API
    Serve(commands::serve::ServeArgs),
}

fn main() {
    let cli = Cli::parse();

    let settings = match config::Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings.with_db_override(cli.db),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    rankwatch_core::logging_facility::init(settings.profile());

    let result = match cli.command {
        Commands::Init => commands::init::execute(&settings),
        Commands::Fetch(args) => commands::fetch::execute(args, &settings),
        Commands::Import(args) => commands::fetch::execute_import(args, &settings),
        Commands::Rankings => commands::query::execute_rankings(&settings),
        Commands::Changes(args) => commands::query::execute_changes(args, &settings),
        Commands::History(args) => commands::query::execute_history(args, &settings),
        Commands::Snapshots(args) => commands::query::execute_snapshots(args, &settings),
        Commands::Serve(args) => commands::serve::execute(args, &settings),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
