//! Vault command handlers (resources, consumables, unlocks)

use anyhow::{Context, Result};
use shelter::{ConsumableKind, Resource, Session, UnlockSet};

use crate::cli::{EditArgs, UnlockKind};

pub fn print_resources(session: &Session) -> Result<()> {
    println!("Resources:");
    for (resource, amount) in session.list_resources()? {
        println!("  {:<10} {}", resource, amount);
    }
    Ok(())
}

pub fn print_consumables(session: &Session) -> Result<()> {
    let counts = session.consumables()?;
    println!("Consumables:");
    for kind in ConsumableKind::ALL {
        println!("  {:<12} {}", kind, counts.get(kind));
    }
    Ok(())
}

/// Handle `resource` command
pub fn resource(args: &EditArgs, name: Option<&str>, value: Option<i64>) -> Result<()> {
    let Some(name) = name else {
        let (session, _) = super::save::open(&args.input, None)?;
        return print_resources(&session);
    };
    let resource = Resource::parse(name).with_context(|| format!("Unknown resource '{}'", name))?;

    let Some(value) = value else {
        let (session, _) = super::save::open(&args.input, None)?;
        println!("{}", session.resource(resource)?);
        return Ok(());
    };

    super::save::with_session(args, None, |session| {
        let stored = session.set_resource(resource, value)?;
        eprintln!("{}: {}", resource, stored);
        Ok(())
    })
}

/// Handle `consumable` command
pub fn consumable(args: &EditArgs, kind: Option<&str>, count: Option<i64>) -> Result<()> {
    let Some(kind) = kind else {
        let (session, _) = super::save::open(&args.input, None)?;
        return print_consumables(&session);
    };
    let kind =
        ConsumableKind::parse(kind).with_context(|| format!("Unknown consumable '{}'", kind))?;

    let Some(count) = count else {
        let (session, _) = super::save::open(&args.input, None)?;
        println!("{}", session.consumables()?.get(kind));
        return Ok(());
    };

    super::save::with_session(args, None, |session| {
        let stored = session.set_consumable_count(kind, count)?;
        eprintln!("{}: {}", kind, stored);
        Ok(())
    })
}

/// Handle `unlock` command
pub fn unlock(args: &EditArgs, kind: UnlockKind, id: &str) -> Result<()> {
    let set = match kind {
        UnlockKind::Room => UnlockSet::Rooms,
        UnlockKind::Recipe => UnlockSet::Recipes,
        UnlockKind::Theme => UnlockSet::Themes,
    };
    super::save::with_session(args, None, |session| {
        if session.unlock(set, id)? {
            eprintln!("Unlocked {}", id);
        } else {
            eprintln!("{} was already unlocked", id);
        }
        Ok(())
    })
}
