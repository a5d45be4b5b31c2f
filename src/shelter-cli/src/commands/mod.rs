//! Command handlers for shelter CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod batch;
pub mod bonus;
pub mod configure;
pub mod dweller;
pub mod save;
pub mod vault;
