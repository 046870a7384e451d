//! Command-line interface.
//!
//! Operator CLI that drives the navigation core against a file-backed catalog.

pub mod commands;

use crate::core::config::ConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// loopnav - looped previous/next navigation over a filtered catalog.
#[derive(Parser, Debug)]
#[command(name = "loopnav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Catalog file, overriding `catalog.path`.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Cache TTL in seconds, overriding `navigation.cache_ttl_seconds`.
    #[arg(long, global = true)]
    pub ttl: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Overrides collected from global flags.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            log_level: self.log_level.clone(),
            catalog_path: self.catalog.clone(),
            cache_ttl_seconds: self.ttl,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve previous/next items for one item.
    Resolve(commands::ResolveArgs),
    /// Print the ordered navigation index.
    Index(commands::IndexArgs),
    /// Re-resolve an item whenever the catalog file changes.
    Watch(commands::WatchArgs),
    /// Configuration operations.
    Config(commands::ConfigArgs),
}
