//! Core CLI definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::batch::BatchCommand;
use super::dweller::DwellerCommand;

#[derive(Parser)]
#[command(name = "shelter")]
#[command(about = "Fallout Shelter Save Editor", long_about = None)]
pub struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every command that rewrites a save in place
#[derive(Args)]
pub struct EditArgs {
    /// Path to .sav container or decrypted .json
    pub input: PathBuf,

    /// Skip the automatic backup for this run
    #[arg(long)]
    pub no_backup: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum UnlockKind {
    Room,
    Recipe,
    Theme,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decrypt a .sav container to JSON (stdout or -o file)
    #[command(visible_alias = "d")]
    Decrypt {
        /// Path to .sav file
        input: PathBuf,

        /// Path to output JSON file (uses stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON (defaults to the configured setting)
        #[arg(long)]
        pretty: bool,
    },

    /// Encrypt JSON (positional file or stdin) to a .sav container
    #[command(visible_alias = "e")]
    Encrypt {
        /// JSON input file (reads stdin if not provided)
        input: Option<PathBuf>,

        /// Path to output .sav file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show a vault overview
    #[command(visible_alias = "i")]
    Info {
        /// Path to .sav or .json file
        input: PathBuf,
    },

    /// Query a value by path (e.g. "vault.storage.resources.Nuka")
    Get {
        /// Path to .sav or .json file
        input: PathBuf,

        /// Dotted path, with [n] for array elements
        query: String,
    },

    /// Set a value by path
    Set {
        #[command(flatten)]
        edit: EditArgs,

        /// Dotted path to modify
        path: String,

        /// Value to set (auto-detects numbers and booleans, unless --raw is used)
        value: String,

        /// Treat value as raw JSON (for objects and arrays)
        #[arg(short, long)]
        raw: bool,
    },

    /// List dwellers
    Dwellers {
        /// Path to .sav or .json file
        input: PathBuf,
    },

    /// Show or modify one dweller
    Dweller {
        #[command(flatten)]
        edit: EditArgs,

        /// Dweller serializeId
        id: i64,

        /// JSON file mapping item ids to display names
        #[arg(long, env = "SHELTER_NAMES")]
        names: Option<PathBuf>,

        #[command(subcommand)]
        action: Option<DwellerCommand>,
    },

    /// Show resources, or set one (caps, food, energy, water, stimpack, radaway, quantum)
    Resource {
        #[command(flatten)]
        edit: EditArgs,

        /// Resource name
        name: Option<String>,

        /// New amount (clamped to the resource limit)
        value: Option<i64>,
    },

    /// Show consumables, or set one count (lunchbox, helper-bot, pet-carrier, starter-kit)
    Consumable {
        #[command(flatten)]
        edit: EditArgs,

        /// Consumable kind
        kind: Option<String>,

        /// New count
        count: Option<i64>,
    },

    /// Unlock a room, recipe, or theme
    Unlock {
        #[command(flatten)]
        edit: EditArgs,

        #[arg(value_enum)]
        kind: UnlockKind,

        /// Identifier as stored in the save
        id: String,
    },

    /// Apply an edit to the whole vault
    #[command(visible_alias = "b")]
    Batch {
        #[command(flatten)]
        edit: EditArgs,

        #[command(subcommand)]
        action: BatchCommand,
    },

    /// Look up the S.P.E.C.I.A.L. bonus of an outfit or pet
    Bonus {
        /// Item display name (lists the whole table if omitted)
        name: Option<String>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Create a backup before modifying saves
        #[arg(long)]
        backup: Option<bool>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: Option<bool>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dweller_special() {
        let cli = Cli::try_parse_from([
            "shelter", "dweller", "Vault1.sav", "3", "special", "luck", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Dweller { edit, id, action, .. } => {
                assert_eq!(id, 3);
                assert!(!edit.no_backup);
                assert!(matches!(
                    action,
                    Some(DwellerCommand::Special { ref stat, value: 10 }) if stat == "luck"
                ));
            }
            _ => panic!("expected dweller command"),
        }
    }

    #[test]
    fn test_parse_batch_with_no_backup() {
        let cli =
            Cli::try_parse_from(["shelter", "-v", "batch", "--no-backup", "Vault1.sav", "heal"])
                .unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Batch { ref edit, action: BatchCommand::Heal } if edit.no_backup
        ));
    }
}
