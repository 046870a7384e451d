//! loopnav - unified CLI entrypoint.
//!
//! Usage:
//!   loopnav --config config/loopnav.toml resolve --item 42
//!   loopnav index [--json]
//!   loopnav watch --item 42
//!   loopnav config validate|show|generate

use anyhow::Result;
use clap::Parser;
use loopnav::cli::commands::{run_config, run_index, run_resolve, run_watch};
use loopnav::cli::{Cli, Commands};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = cli.overrides();

    // Determine config path - use global --config or default
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config/loopnav.toml"));

    match cli.command {
        Commands::Resolve(args) => run_resolve(&config_path, &overrides, args),
        Commands::Index(args) => run_index(&config_path, &overrides, args),
        Commands::Watch(args) => run_watch(&config_path, &overrides, args).await,
        Commands::Config(args) => run_config(&config_path, &overrides, args),
    }
}
