//! Dweller command CLI definitions

use clap::{ArgAction, Subcommand};

#[derive(Subcommand)]
pub enum DwellerCommand {
    /// Set a S.P.E.C.I.A.L. stat (name, letter, or "all")
    Special {
        stat: String,
        value: i64,
    },

    /// Set current health, optionally raising or lowering max health first
    Health {
        value: f64,

        #[arg(long)]
        max: Option<f64>,
    },

    /// Set level (1-50)
    Level {
        level: i64,

        /// Experience points (a placeholder is written if omitted)
        #[arg(long)]
        xp: Option<i64>,
    },

    /// Set happiness (0-100)
    Happiness { value: i64 },

    /// Set radiation (0-100)
    Radiation { value: f64 },

    /// Equip an outfit
    Outfit {
        id: String,

        /// Item type field (defaults to "Outfit")
        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Equip a weapon
    Weapon {
        id: String,

        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Equip a pet (attaches its bonus when the table knows it)
    Pet {
        id: String,

        #[arg(long = "type")]
        kind: Option<String>,
    },

    /// Set or clear pregnancy
    Pregnant {
        #[arg(action = ArgAction::Set)]
        value: bool,
    },

    /// Rename
    Name {
        first: String,
        last: Option<String>,
    },

    /// Set skin, hair, or outfit color (#AARRGGBB or #RRGGBB)
    Color { field: String, color: String },

    /// Mark for eviction
    Evict {
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
}
