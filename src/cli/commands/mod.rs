//! CLI command implementations.

mod config;
mod index;
mod resolve;
mod watch;

pub use config::{run_config, ConfigArgs};
pub use index::{run_index, IndexArgs};
pub use resolve::{run_resolve, ResolveArgs};
pub use watch::{run_watch, WatchArgs};

use crate::catalog::source::FileCatalog;
use crate::core::config::{Config, ConfigOverrides};
use crate::nav::resolver::NavigationResolver;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Load the config file, apply overrides and start logging.
pub(crate) fn load_config(path: &Path, overrides: &ConfigOverrides) -> Result<Config> {
    let mut config = Config::from_file(path)
        .with_context(|| format!("failed to load config from {:?}", path))?;
    config.apply_overrides(overrides);
    config.validate()?;
    init_tracing(&config.telemetry.log_level);
    Ok(config)
}

/// Build a resolver over the configured catalog file.
pub(crate) fn file_resolver(config: &Config) -> Result<(NavigationResolver, Arc<FileCatalog>)> {
    let catalog = Arc::new(FileCatalog::new(config.catalog.path.clone()));
    let resolver = NavigationResolver::from_config(&config.navigation, catalog.clone())?;
    Ok((resolver, catalog))
}

/// Initialize the tracing subscriber if the telemetry feature is enabled.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr.
#[cfg(feature = "telemetry")]
fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

#[cfg(not(feature = "telemetry"))]
fn init_tracing(_level: &str) {}
