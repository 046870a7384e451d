//! Config command implementation.

use crate::core::config::{Config, ConfigOverrides};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

/// Configuration operations.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration file.
    Validate,
    /// Print the effective configuration, defaults and overrides applied.
    Show {
        /// Output format (toml, json).
        #[arg(long, default_value = "toml")]
        format: String,
    },
    /// Generate a configuration template.
    Generate {
        /// Output file path.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Catalog file the template points at.
        #[arg(long, default_value = "catalog.json")]
        catalog_file: PathBuf,
    },
}

/// Run the config command.
pub fn run_config(config_path: &Path, overrides: &ConfigOverrides, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Validate => validate_config(config_path, overrides),
        ConfigCommand::Show { format } => show_config(config_path, overrides, &format),
        ConfigCommand::Generate {
            output,
            catalog_file,
        } => generate_config(output.as_deref(), &catalog_file),
    }
}

fn effective_config(path: &Path, overrides: &ConfigOverrides) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {:?}", path);
    }
    let mut config = Config::from_file(path)?;
    config.apply_overrides(overrides);
    config.validate()?;
    Ok(config)
}

fn validate_config(path: &Path, overrides: &ConfigOverrides) -> Result<()> {
    let config = effective_config(path, overrides)?;
    println!("✓ Config file is valid");

    if !config.catalog.path.exists() {
        println!(
            "  ⚠ Warning: catalog file not found: {}",
            config.catalog.path.display()
        );
    }
    if config.navigation.excluded_category_ids.is_empty() {
        println!("  ⚠ Warning: no excluded categories; every published item is navigable");
    }

    let exclusions = config.navigation.exclusions();
    println!("  Cache key: {}", exclusions.cache_key());
    println!("  TTL:       {}s", config.navigation.cache_ttl_seconds);
    Ok(())
}

fn show_config(path: &Path, overrides: &ConfigOverrides, format: &str) -> Result<()> {
    let config = effective_config(path, overrides)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&config)?),
        _ => println!("{}", toml::to_string_pretty(&config)?),
    }
    Ok(())
}

fn generate_config(output: Option<&Path>, catalog: &Path) -> Result<()> {
    let template = render_template(catalog)?;

    match output {
        Some(path) => {
            std::fs::write(path, &template)
                .with_context(|| format!("failed to write {:?}", path))?;
            println!("Generated config template: {:?}", path);
        }
        None => println!("{}", template),
    }
    Ok(())
}

fn render_template(catalog: &Path) -> Result<String> {
    let body = toml::to_string_pretty(&Config::template(catalog))?;
    Ok(format!(
        "# loopnav configuration\n\
         #\n\
         # navigation.excluded_category_ids: items in any of these categories are\n\
         # never offered as previous/next targets.\n\n{}",
        body
    ))
}
