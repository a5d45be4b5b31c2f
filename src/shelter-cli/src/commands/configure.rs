//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting shelter CLI defaults.

use crate::config::Config;
use anyhow::Result;

/// Handle the configure command
pub fn handle(backup: Option<bool>, pretty: Option<bool>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    let requested = backup.is_some() || pretty.is_some();
    if apply(&mut config, backup, pretty) {
        config.save()?;
        if let Ok(path) = Config::config_path() {
            println!("Config saved to: {}", path.display());
        }
    } else if requested {
        println!("Configuration unchanged");
    } else if !show {
        show_usage();
    }

    if show {
        show_config(&config);
    }
    Ok(())
}

/// Apply requested changes. Returns true if anything changed.
fn apply(config: &mut Config, backup: Option<bool>, pretty: Option<bool>) -> bool {
    let mut changed = false;
    if let Some(backup) = backup {
        changed |= config.backup != backup;
        config.backup = backup;
    }
    if let Some(pretty) = pretty {
        changed |= config.pretty != pretty;
        config.pretty = pretty;
    }
    changed
}

fn show_config(config: &Config) {
    println!("Backup before edit: {}", config.backup);
    println!("Pretty JSON:        {}", config.pretty);

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

fn show_usage() {
    println!("Usage: shelter configure --backup <true|false>");
    println!("   or: shelter configure --pretty <true|false>");
    println!("   or: shelter configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_reports_changes() {
        let mut config = Config::default();
        assert!(!apply(&mut config, None, None));
        assert!(!apply(&mut config, Some(true), None));
        assert!(apply(&mut config, Some(false), Some(true)));
        assert!(!config.backup);
        assert!(config.pretty);
    }
}
