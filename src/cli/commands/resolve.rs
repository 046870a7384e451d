//! Resolve command implementation.

use super::{file_resolver, load_config};
use crate::catalog::model::ItemId;
use crate::core::config::ConfigOverrides;
use crate::nav::resolver::NavOutcome;
use anyhow::Result;
use clap::Args;
use std::path::Path;

/// Resolve previous/next items for one item.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Current item id. Without it navigation is skipped.
    #[arg(short, long)]
    pub item: Option<u64>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Run the resolve command.
pub fn run_resolve(
    config_path: &Path,
    overrides: &ConfigOverrides,
    args: ResolveArgs,
) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let (resolver, _catalog) = file_resolver(&config)?;
    let exclusions = config.navigation.exclusions();

    let outcome = resolver.navigate(args.item.map(ItemId), &exclusions)?;

    if args.json {
        println!("{}", outcome_json(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

pub(super) fn outcome_json(outcome: &NavOutcome) -> Result<String> {
    let neighbors = outcome.neighbors();
    let value = serde_json::json!({
        "prev": neighbors.prev,
        "next": neighbors.next,
        "detail": outcome,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

pub(super) fn print_outcome(outcome: &NavOutcome) {
    match outcome {
        NavOutcome::Resolved { prev, next } => {
            println!("prev: {}", prev);
            println!("next: {}", next);
        }
        NavOutcome::NoCurrentItem => println!("no current item; navigation skipped"),
        NavOutcome::EmptyIndex => println!("no navigable items"),
        NavOutcome::NotNavigable => {
            println!("item is not navigable (excluded, unpublished or unknown)")
        }
        NavOutcome::SingleItem => println!("item is the only navigable item"),
    }
}
