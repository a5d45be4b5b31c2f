//! Bonus table lookup

use anyhow::Result;
use shelter::BonusTable;

/// Handle `bonus` command
pub fn handle(name: Option<&str>) -> Result<()> {
    let table = BonusTable::embedded();

    let Some(name) = name else {
        for entry in table.entries() {
            println!("{:<32} {:<10} {}", entry.name, entry.rarity, entry.bonus);
        }
        println!("\n{} entries", table.len());
        return Ok(());
    };

    match table.lookup(name) {
        Some(entry) if entry.bonus.is_zero() => {
            println!("{} ({}): no stat bonus", entry.name, entry.rarity)
        }
        Some(entry) => println!("{} ({}): {}", entry.name, entry.rarity, entry.bonus),
        None => println!("{}: no bonus", name),
    }
    Ok(())
}
