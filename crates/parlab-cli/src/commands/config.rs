//! Configuration management commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Write a configuration file with default values
    Init {
        /// Where to write the file
        #[arg(short, long, default_value = "parlab.toml")]
        path: PathBuf,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

pub fn run(cmd: ConfigCommands, config: &Config, source: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config, source),
        ConfigCommands::Init { path, force } => init(&path, force),
    }
}

fn show(config: &Config, source: Option<&Path>) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    match source {
        Some(path) => println!("Config file: {}\n", path.display()),
        None => println!("No configuration file found. Using defaults.\n"),
    }

    println!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration to `path`. Returns whether a file was written.
pub fn write_default(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    let contents = Config::default().to_toml()?;
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

fn init(path: &Path, force: bool) -> Result<()> {
    if write_default(path, force)? {
        println!("Configuration file created: {}", path.display());
    } else {
        println!("Configuration file already exists: {}", path.display());
        println!("Use --force to overwrite");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_default_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parlab.toml");

        assert!(write_default(&path, false).unwrap());
        std::fs::write(&path, "# edited").unwrap();

        assert!(!write_default(&path, false).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# edited");

        assert!(write_default(&path, true).unwrap());
        let loaded = Config::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.timer.calls, 4);
    }
}
