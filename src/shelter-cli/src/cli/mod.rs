//! CLI argument definitions for shelter
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod batch;
mod core;
mod dweller;

pub use batch::BatchCommand;
pub use core::{Cli, Commands, EditArgs, UnlockKind};
pub use dweller::DwellerCommand;
