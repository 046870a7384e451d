//! Index command implementation.

use super::{file_resolver, load_config};
use crate::core::config::ConfigOverrides;
use anyhow::Result;
use clap::Args;
use std::path::Path;

/// Print the ordered navigation index.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Run the index command.
pub fn run_index(config_path: &Path, overrides: &ConfigOverrides, args: IndexArgs) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let (resolver, catalog) = file_resolver(&config)?;
    let exclusions = config.navigation.exclusions();

    let index = resolver.get_ordered_index(&exclusions)?;
    let expires_in = resolver.cache().remaining(&exclusions);

    if args.json {
        let value = serde_json::json!({
            "cache_key": exclusions.cache_key(),
            "excluded_categories": exclusions,
            "expires_in_ms": expires_in.map(|d| d.as_millis() as u64),
            "items": index.as_slice(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Catalog:    {}", catalog.path().display());
    println!("Cache key:  {}", exclusions.cache_key());
    println!(
        "Excluding:  {}",
        exclusions
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    if let Some(remaining) = expires_in {
        println!("Expires in: {}s", remaining.as_secs());
    }
    println!("Navigable:  {}", index.len());
    for (pos, id) in index.iter().enumerate() {
        println!("  {:>5}  {}", pos, id);
    }
    Ok(())
}
