//! Configuration parsing and validation.
//!
//! Configuration is loaded from TOML files with CLI overrides. The
//! `[navigation]` section is static per deployment: the exclusion list and
//! cache TTL are read once at startup.

use crate::catalog::builder::ExclusionSet;
use crate::catalog::model::CategoryId;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog source configuration.
    pub catalog: CatalogConfig,

    /// Navigation and cache configuration.
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// Change detection for `loopnav watch`.
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Catalog source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the JSON catalog file.
    pub path: PathBuf,
}

/// Navigation and cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Category ids whose member items never appear in navigation.
    #[serde(default = "default_excluded_category_ids")]
    pub excluded_category_ids: Vec<u64>,

    /// Lifetime of a built index, in seconds.
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            excluded_category_ids: default_excluded_category_ids(),
            cache_ttl_seconds: default_cache_ttl_seconds(),
        }
    }
}

impl NavigationConfig {
    /// The configured exclusion list as an [`ExclusionSet`].
    pub fn exclusions(&self) -> ExclusionSet {
        self.excluded_category_ids
            .iter()
            .copied()
            .map(CategoryId)
            .collect()
    }

    /// Cache TTL as a duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Catalog change detection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// How often the catalog file is checked for changes, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WatchConfig {
    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// Default value functions

fn default_excluded_category_ids() -> Vec<u64> {
    vec![10000]
}

fn default_cache_ttl_seconds() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// A relative catalog path is resolved against the config file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let mut config: Config =
            toml::from_str(&content).with_context(|| "failed to parse config file")?;
        if config.catalog.path.is_relative() {
            if let Some(dir) = path.parent() {
                config.catalog.path = dir.join(&config.catalog.path);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).with_context(|| "failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// A configuration template pointing at the given catalog file.
    pub fn template(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog: CatalogConfig {
                path: catalog_path.into(),
            },
            navigation: NavigationConfig::default(),
            telemetry: TelemetryConfig::default(),
            watch: WatchConfig::default(),
        }
    }

    /// Apply CLI overrides to the configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref log_level) = overrides.log_level {
            self.telemetry.log_level = log_level.clone();
        }
        if let Some(ref catalog_path) = overrides.catalog_path {
            self.catalog.path = catalog_path.clone();
        }
        if let Some(ttl) = overrides.cache_ttl_seconds {
            self.navigation.cache_ttl_seconds = ttl;
        }
    }

    /// Validate configuration consistency.
    pub fn validate(&self) -> Result<()> {
        self.validate_catalog()?;
        self.validate_navigation()?;
        self.validate_telemetry()?;
        self.validate_watch()?;
        Ok(())
    }

    fn validate_catalog(&self) -> Result<()> {
        if self.catalog.path.as_os_str().is_empty() {
            anyhow::bail!("catalog.path must not be empty");
        }
        Ok(())
    }

    fn validate_navigation(&self) -> Result<()> {
        if self.navigation.cache_ttl_seconds == 0 {
            anyhow::bail!("navigation.cache_ttl_seconds must be > 0");
        }
        Ok(())
    }

    fn validate_telemetry(&self) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "telemetry.log_level must be one of {:?}, got: {}",
                valid_levels,
                self.telemetry.log_level
            );
        }
        Ok(())
    }

    fn validate_watch(&self) -> Result<()> {
        if self.watch.poll_interval_ms == 0 {
            anyhow::bail!("watch.poll_interval_ms must be > 0");
        }
        Ok(())
    }
}

/// CLI override options that can be applied to configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override log level.
    pub log_level: Option<String>,
    /// Override catalog file path.
    pub catalog_path: Option<PathBuf>,
    /// Override cache TTL.
    pub cache_ttl_seconds: Option<u64>,
}
