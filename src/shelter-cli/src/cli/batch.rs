//! Vault-wide batch command definitions

use clap::Subcommand;

#[derive(Subcommand)]
pub enum BatchCommand {
    /// Set every dweller's S.P.E.C.I.A.L. to 10
    MaxSpecial,

    /// Restore every dweller to full health
    Heal,

    /// Set every dweller's happiness to 100
    Happiness,

    /// Clear radiation from every dweller
    Radiation,

    /// Fill every resource to its limit
    Resources,

    /// Remove all rocks and obstacles
    Rocks,
}
