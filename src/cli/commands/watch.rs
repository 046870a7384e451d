//! Watch command implementation.

use super::resolve::{outcome_json, print_outcome};
use super::{file_resolver, load_config};
use crate::catalog::model::ItemId;
use crate::core::config::ConfigOverrides;
use crate::nav::events::{CatalogEvents, CatalogFileWatch};
use anyhow::Result;
use clap::Args;
use std::path::Path;

/// Re-resolve an item whenever the catalog file changes.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Current item id.
    #[arg(short, long)]
    pub item: u64,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Run the watch command until ctrl-c.
pub async fn run_watch(
    config_path: &Path,
    overrides: &ConfigOverrides,
    args: WatchArgs,
) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    let (resolver, catalog) = file_resolver(&config)?;
    let exclusions = config.navigation.exclusions();
    let current = ItemId(args.item);

    let events = CatalogEvents::new();
    resolver.attach(&events);

    let report = |json: bool| -> Result<()> {
        match resolver.navigate(Some(current), &exclusions) {
            Ok(outcome) if json => println!("{}", outcome_json(&outcome)?),
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => tracing::error!(error = %e, "navigation failed"),
        }
        Ok(())
    };

    tracing::info!(
        catalog = %catalog.path().display(),
        item_id = %current,
        poll_ms = config.watch.poll_interval_ms,
        "watching catalog"
    );
    report(args.json)?;

    let mut watch = CatalogFileWatch::new(catalog);
    let mut interval = tokio::time::interval(config.watch.poll_interval());
    interval.tick().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("shutdown signal received (SIGINT)");
                break;
            }
            _ = interval.tick() => {
                if watch.poll(&events) {
                    report(args.json)?;
                } else {
                    let purged = resolver.cache().purge_expired();
                    if purged > 0 {
                        tracing::debug!(purged, "expired indexes purged");
                    }
                }
            }
        }
    }

    tracing::info!(stats = ?resolver.stats(), "watch stopped");
    Ok(())
}
