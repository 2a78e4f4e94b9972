//! Config command - inspect and edit the JSON configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;
use serde_json::Value;
use tracing::debug;

use oppgjor_core::models::config::OppgjorConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Output path for configuration file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one value (e.g., "export.delimiter")
    Get { key: String },

    /// Change one value; JSON literals are accepted ("true", "\";\"")
    Set { key: String, value: String },

    /// Show configuration file path
    Path,
}

pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let path = default_config_path();

    match args.command {
        ConfigCommand::Show => {
            if !path.exists() {
                println!("{} No config file found, showing defaults.", style("ℹ").blue());
            }
            let config = load_config(None)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Init { output, force } => {
            let output = output.unwrap_or(path);
            init_config(&output, force)?;
        }
        ConfigCommand::Get { key } => {
            let json = serde_json::to_value(load_config(None)?)?;
            let value = lookup(&json, &key)
                .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value)?,
        ConfigCommand::Path => {
            println!("Configuration file: {}", path.display());
            if path.exists() {
                println!("Status: {}", style("exists").green());
            } else {
                println!("Status: {}", style("not created").yellow());
                println!();
                println!("Run 'oppgjor config init' to create a configuration file.");
            }
        }
    }

    Ok(())
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("oppgjor")
        .join("config.json")
}

/// Load the config given on the command line, else the default file if present.
pub fn load_config(path: Option<&str>) -> anyhow::Result<OppgjorConfig> {
    if let Some(path) = path {
        return OppgjorConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path, e));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        return Ok(OppgjorConfig::from_file(&default_path)?);
    }

    Ok(OppgjorConfig::default())
}

fn init_config(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output.display()
        );
    }

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    OppgjorConfig::default().save(output)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output.display()
    );
    Ok(())
}

fn lookup<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(json, |current, part| current.get(part))
}

fn set_config(path: &Path, key: &str, raw: &str) -> anyhow::Result<()> {
    let config = if path.exists() {
        OppgjorConfig::from_file(path)?
    } else {
        OppgjorConfig::default()
    };

    let value: Value =
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));

    let mut json = serde_json::to_value(&config)?;
    let (section, field) = key
        .rsplit_once('.')
        .ok_or_else(|| anyhow::anyhow!("Key must be <section>.<field>: {}", key))?;
    let target = json
        .get_mut(section)
        .and_then(Value::as_object_mut)
        .filter(|obj| obj.contains_key(field))
        .ok_or_else(|| anyhow::anyhow!("Configuration key not found: {}", key))?;
    target.insert(field.to_string(), value.clone());

    // Re-parse so type errors surface before saving
    let config: OppgjorConfig = serde_json::from_value(json)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    println!(
        "{} Set {} = {}",
        style("✓").green(),
        key,
        serde_json::to_string(&value)?
    );
    Ok(())
}
