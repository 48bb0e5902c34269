//! Config command - show or write config.toml

use anyhow::{Context, Result};
use clap::Args;
use roadster_core::config;

/// Arguments for the config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Write the effective configuration back to disk
    #[arg(long)]
    pub write: bool,
}

/// Execute the config command
pub fn execute(args: ConfigArgs) -> Result<()> {
    let current = config::load();

    if args.write {
        match config::save(&current).context("Failed to save config")? {
            Some(path) => println!("Wrote {}", path.display()),
            None => anyhow::bail!("No config directory available on this platform"),
        }
        return Ok(());
    }

    match config::config_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory"),
    }
    print!("{}", toml::to_string_pretty(&current)?);
    Ok(())
}
