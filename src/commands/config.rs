//! The `config` command group: list, get, set.

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::{ConfigPaths, ConfigStore, Scope, Setting};

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// List recognized settings with descriptions and defaults
    List,
    /// Print the effective configuration or a single resolved value
    Get {
        /// Dotted setting key, e.g. ai.model
        key: Option<String>,
    },
    /// Set a configuration value
    Set {
        /// Dotted setting key, e.g. ai.model
        key: String,
        /// New value for the setting
        value: String,
        /// Scope to write the setting to
        #[arg(long, value_enum, default_value_t = Scope::Local)]
        scope: Scope,
    },
}

pub fn run(command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::List => {
            run_list();
            Ok(())
        }
        ConfigCommand::Get { key } => {
            let store = load_store()?;
            run_get(&store, key.as_deref())
        }
        ConfigCommand::Set { key, value, scope } => {
            let mut store = load_store()?;
            let stored = store.set(&key, &value, scope)?;
            println!("✓ Set {key} = {stored} in {scope} config");
            Ok(())
        }
    }
}

fn load_store() -> Result<ConfigStore> {
    ConfigStore::load(ConfigPaths::discover()?).context("Failed to load configuration")
}

/// Static listing of the recognized settings.
fn run_list() {
    println!("{:<20} {:<36} {}", "Setting", "Default", "Description");
    for setting in Setting::ALL {
        println!(
            "{:<20} {:<36} {}",
            setting.key(),
            setting.default_value().to_string(),
            setting.description()
        );
    }
}

/// Effective configuration, or a single resolved value.
fn run_get(store: &ConfigStore, key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => {
            let value = store.resolve_key(key)?;
            println!("{key} = {value}");
        }
        None => {
            println!("{:<20} {:<36} {}", "Setting", "Value", "Source");
            for setting in Setting::ALL {
                let source = store.source(setting).map(Scope::as_str).unwrap_or("default");
                println!(
                    "{:<20} {:<36} {}",
                    setting.key(),
                    store.resolve(setting).to_string(),
                    source
                );
            }
        }
    }
    Ok(())
}
