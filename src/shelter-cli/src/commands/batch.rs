//! Vault-wide batch edits

use anyhow::Result;
use shelter::Session;

use crate::cli::{BatchCommand, EditArgs};

fn apply(session: &mut Session, action: &BatchCommand) -> Result<String> {
    let message = match action {
        BatchCommand::MaxSpecial => {
            format!("Maxed S.P.E.C.I.A.L. for {} dwellers", session.max_all_special()?)
        }
        BatchCommand::Heal => format!("Healed {} dwellers", session.heal_all()?),
        BatchCommand::Happiness => {
            format!("Maxed happiness for {} dwellers", session.max_all_happiness()?)
        }
        BatchCommand::Radiation => {
            format!("Cleared radiation for {} dwellers", session.remove_all_radiation()?)
        }
        BatchCommand::Resources => {
            session.max_all_resources()?;
            "Filled all resources".to_string()
        }
        BatchCommand::Rocks => format!("Removed {} rocks", session.remove_all_rocks()?),
    };
    Ok(message)
}

/// Handle `batch` command
pub fn handle(args: &EditArgs, action: &BatchCommand) -> Result<()> {
    super::save::with_session(args, None, |session| {
        eprintln!("{}", apply(session, action)?);
        Ok(())
    })
}
