//! Dweller command handlers

use anyhow::{bail, Context, Result};
use shelter::{ColorField, DwellerSummary, Session, Special};
use std::path::Path;

use crate::cli::{DwellerCommand, EditArgs};

/// Handle `dwellers` command
pub fn list(input: &Path) -> Result<()> {
    let (session, _) = super::save::open(input, None)?;
    let dwellers = session.list_dwellers()?;

    if dwellers.is_empty() {
        println!("No dwellers");
        return Ok(());
    }

    println!("{:>5}  {:<24} {:>3}  {:<27}  {:>9}", "ID", "Name", "Lvl", "S.P.E.C.I.A.L.", "Health");
    for d in &dwellers {
        println!(
            "{:>5}  {:<24} {:>3}  {}  {:>4.0}/{:<4.0}",
            d.id,
            d.full_name(),
            d.level,
            d.special,
            d.health.health,
            d.health.max_health
        );
    }
    println!("\n{} dwellers", dwellers.len());
    Ok(())
}

fn print_item(label: &str, item: Option<&shelter::EquippedItem>) {
    match item {
        Some(item) => println!("{:<11}{} ({})", label, item.id, item.kind),
        None => println!("{:<11}-", label),
    }
}

fn print_dweller(d: &DwellerSummary) {
    println!("{} (id {})", d.full_name(), d.id);
    println!("Level:     {} ({} XP)", d.level, d.experience);
    println!("Special:   {}", d.special);
    println!(
        "Health:    {:.0}/{:.0}, radiation {:.0}",
        d.health.health, d.health.max_health, d.health.radiation
    );
    println!("Happiness: {}%", d.happiness);
    print_item("Outfit:", d.outfit.as_ref());
    print_item("Weapon:", d.weapon.as_ref());
    print_item("Pet:", d.pet.as_ref());

    let mut flags = Vec::new();
    if d.pregnant {
        flags.push(if d.baby_ready { "baby ready" } else { "pregnant" });
    }
    if d.evicted {
        flags.push("evicted");
    }
    if !d.assigned {
        flags.push("unassigned");
    }
    if !flags.is_empty() {
        println!("Status:    {}", flags.join(", "));
    }
}

fn parse_stats(stat: &str) -> Result<Vec<Special>> {
    if stat.eq_ignore_ascii_case("all") {
        return Ok(Special::ALL.to_vec());
    }
    match Special::parse(stat) {
        Some(stat) => Ok(vec![stat]),
        None => bail!("Unknown stat '{}' (use a name, a letter, or 'all')", stat),
    }
}

fn apply(session: &mut Session, id: i64, action: DwellerCommand) -> Result<()> {
    match action {
        DwellerCommand::Special { stat, value } => {
            for stat in parse_stats(&stat)? {
                let stored = session.set_special(id, stat, value)?;
                eprintln!("{}: {}", stat, stored);
            }
        }
        DwellerCommand::Health { value, max } => {
            let health = session.set_health(id, value, max)?;
            eprintln!("Health: {:.0}/{:.0}", health.health, health.max_health);
        }
        DwellerCommand::Level { level, xp } => {
            let (level, xp) = session.set_level(id, level, xp)?;
            eprintln!("Level: {} ({} XP)", level, xp);
        }
        DwellerCommand::Happiness { value } => {
            eprintln!("Happiness: {}", session.set_happiness(id, value)?);
        }
        DwellerCommand::Radiation { value } => {
            eprintln!("Radiation: {:.0}", session.set_radiation(id, value)?);
        }
        DwellerCommand::Outfit { id: item, kind } => {
            session.set_outfit(id, &item, kind.as_deref())?;
            eprintln!("Outfit: {}", item);
        }
        DwellerCommand::Weapon { id: item, kind } => {
            session.set_weapon(id, &item, kind.as_deref())?;
            eprintln!("Weapon: {}", item);
        }
        DwellerCommand::Pet { id: item, kind } => {
            let bonus = session.bonus_for_item(&item).map(|entry| entry.bonus);
            session.set_pet(id, &item, kind.as_deref())?;
            match bonus {
                Some(bonus) => eprintln!("Pet: {} ({})", item, bonus),
                None => eprintln!("Pet: {} (no bonus table entry)", item),
            }
        }
        DwellerCommand::Pregnant { value } => {
            session.set_pregnancy(id, value)?;
            eprintln!("Pregnant: {}", value);
        }
        DwellerCommand::Name { first, last } => {
            session.set_name(id, &first, last.as_deref())?;
            eprintln!("Name: {} {}", first, last.unwrap_or_default());
        }
        DwellerCommand::Color { field, color } => {
            let field = ColorField::parse(&field)
                .with_context(|| format!("Unknown color field '{}' (skin, hair, outfit)", field))?;
            let argb = shelter::save::parse_argb(&color)
                .with_context(|| format!("Invalid color '{}'", color))?;
            session.set_color(id, field, argb)?;
            eprintln!("Color: {}", shelter::save::format_argb(argb));
        }
        DwellerCommand::Evict { value } => {
            session.set_evicted(id, value)?;
            eprintln!("Evicted: {}", value);
        }
    }
    Ok(())
}

/// Handle `dweller` command: show when no action is given, otherwise edit
pub fn handle(
    args: &EditArgs,
    id: i64,
    names: Option<&Path>,
    action: Option<DwellerCommand>,
) -> Result<()> {
    let Some(action) = action else {
        let (session, _) = super::save::open(&args.input, None)?;
        print_dweller(&session.dweller(id)?);
        return Ok(());
    };

    let lookup = names.map(super::save::load_names).transpose()?;
    super::save::with_session(args, lookup, |session| apply(session, id, action))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let mut session = Session::new();
        session
            .load_document(
                br#"{"dwellers":{"dwellers":[{"serializeId":5,"name":"Eve"}]}}"#,
                false,
            )
            .unwrap();
        session
    }

    #[test]
    fn test_parse_stats() {
        assert_eq!(parse_stats("all").unwrap().len(), 7);
        assert_eq!(parse_stats("L").unwrap(), vec![Special::Luck]);
        assert!(parse_stats("charm").is_err());
    }

    #[test]
    fn test_apply_all_special() {
        let mut session = session();
        apply(
            &mut session,
            5,
            DwellerCommand::Special {
                stat: "all".to_string(),
                value: 12,
            },
        )
        .unwrap();
        let eve = session.dweller(5).unwrap();
        assert!(eve.special.0.iter().all(|&v| v == 10));
    }

    #[test]
    fn test_apply_color_rejects_bad_input() {
        let mut session = session();
        let action = DwellerCommand::Color {
            field: "eyes".to_string(),
            color: "#FF000000".to_string(),
        };
        assert!(apply(&mut session, 5, action).is_err());
    }

    #[test]
    fn test_apply_unknown_dweller() {
        let mut session = session();
        let action = DwellerCommand::Happiness { value: 50 };
        assert!(apply(&mut session, 99, action).is_err());
    }
}
