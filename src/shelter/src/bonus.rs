//! S.P.E.C.I.A.L. bonus table.
//!
//! The table ships inside the binary as tab-separated text and is parsed once
//! on first use. Lookups normalize the display name so catalog names with
//! different punctuation or casing still match.

use crate::special::SpecialVector;
use once_cell::sync::Lazy;
use std::collections::HashMap;

const EMBEDDED_TABLE: &str = include_str!("../data/bonus_table.tsv");

static EMBEDDED: Lazy<BonusTable> = Lazy::new(|| BonusTable::parse(EMBEDDED_TABLE));

/// Minimum number of tab-separated columns for a data row
const MIN_COLUMNS: usize = 12;

/// Column holding the Strength bonus; the other six follow in order
const FIRST_BONUS_COLUMN: usize = 2;

/// Lines skipped during parsing, compared case-insensitively after trimming
const SECTION_HEADERS: &[&str] = &[
    "name\trarity\ts\tp\te\tc\ti\ta\tl\troom\tparts\tsell",
    "outfits",
    "common outfits",
    "rare outfits",
    "legendary outfits",
    "pets",
    "legendary pets",
];

/// A parsed table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BonusEntry {
    pub name: String,
    pub rarity: String,
    pub bonus: SpecialVector,
}

/// Name-keyed bonus lookup
#[derive(Debug, Clone, Default)]
pub struct BonusTable {
    entries: HashMap<String, BonusEntry>,
}

impl BonusTable {
    /// Parse tab-separated table text. Malformed rows are skipped rather than
    /// failing the whole table.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || is_section_header(trimmed) {
                continue;
            }

            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() < MIN_COLUMNS {
                log::trace!("skipping short bonus row: {trimmed:?}");
                continue;
            }

            let name = columns[0].trim();
            let key = normalize_name(name);
            if key.is_empty() {
                continue;
            }

            let mut bonus = [0i64; 7];
            for (slot, cell) in bonus
                .iter_mut()
                .zip(&columns[FIRST_BONUS_COLUMN..FIRST_BONUS_COLUMN + 7])
            {
                *slot = parse_bonus_cell(cell);
            }

            entries.entry(key).or_insert_with(|| BonusEntry {
                name: name.to_string(),
                rarity: columns[1].trim().to_string(),
                bonus: SpecialVector(bonus),
            });
        }

        log::debug!("parsed {} bonus table entries", entries.len());
        BonusTable { entries }
    }

    /// The table compiled into the library, parsed on first access
    pub fn embedded() -> &'static BonusTable {
        &EMBEDDED
    }

    pub fn lookup(&self, name: &str) -> Option<&BonusEntry> {
        self.entries.get(&normalize_name(name))
    }

    /// Bonus vector for `name`, or all zeros if it is not in the table
    pub fn bonus_for(&self, name: &str) -> SpecialVector {
        self.lookup(name)
            .map(|entry| entry.bonus)
            .unwrap_or(SpecialVector::ZERO)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by display name
    pub fn entries(&self) -> Vec<&BonusEntry> {
        let mut entries: Vec<&BonusEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

fn is_section_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    SECTION_HEADERS.iter().any(|header| *header == lower)
}

/// `"+3"` -> 3, anything unparseable -> 0
fn parse_bonus_cell(cell: &str) -> i64 {
    let cell = cell.trim();
    let cell = cell.strip_prefix('+').unwrap_or(cell);
    cell.parse().unwrap_or(0)
}

/// Lowercase, drop apostrophes, then drop everything that is not alphanumeric
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .filter(|c| c.is_alphanumeric())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, bonuses: [&str; 7]) -> String {
        format!(
            "{}\tRare\t{}\tRoom\t1\t10",
            name,
            bonuses.join("\t")
        )
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Eulogy Jones' Suit"), "eulogyjonessuit");
        assert_eq!(normalize_name("eulogy_jones_suit"), "eulogyjonessuit");
        assert_eq!(normalize_name("Mr. Snuggles"), "mrsnuggles");
        assert_eq!(normalize_name("T-60 Power Armor"), "t60powerarmor");
        assert_eq!(normalize_name("Piper\u{2019}s Outfit"), "pipersoutfit");
    }

    #[test]
    fn test_parse_row() {
        let text = row("Lab Coat", ["", "", "", "", "+1", "", ""]);
        let table = BonusTable::parse(&text);
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.bonus_for("lab coat"),
            SpecialVector([0, 0, 0, 0, 1, 0, 0])
        );
    }

    #[test]
    fn test_skips_blank_headers_and_short_rows() {
        let text = format!(
            "\nRARE OUTFITS\n  Legendary Outfits  \nToo\tShort\n{}\n",
            row("Ghoul Cat", ["", "", "+3", "", "", "", ""])
        );
        let table = BonusTable::parse(&text);
        assert_eq!(table.len(), 1);
        assert!(table.lookup("rare outfits").is_none());
        assert_eq!(table.bonus_for("Ghoul Cat").0[2], 3);
    }

    #[test]
    fn test_malformed_cells_default_to_zero() {
        let text = row("Odd Suit", ["+x", "n/a", "-2", "", "3", "+", " +4 "]);
        let table = BonusTable::parse(&text);
        assert_eq!(
            table.bonus_for("odd suit"),
            SpecialVector([0, 0, -2, 0, 3, 0, 4])
        );
    }

    #[test]
    fn test_empty_name_discarded() {
        let text = row("   ", ["+1", "", "", "", "", "", ""]);
        assert!(BonusTable::parse(&text).is_empty());
    }

    #[test]
    fn test_first_duplicate_wins() {
        let text = format!(
            "{}\n{}",
            row("Lab Coat", ["", "", "", "", "+1", "", ""]),
            row("LAB COAT", ["", "", "", "", "+9", "", ""])
        );
        let table = BonusTable::parse(&text);
        assert_eq!(table.len(), 1);
        assert_eq!(table.bonus_for("Lab Coat").0[4], 1);
    }

    #[test]
    fn test_unknown_name_is_zero_vector() {
        let table = BonusTable::embedded();
        assert_eq!(table.bonus_for("does not exist"), SpecialVector::ZERO);
        assert!(table.lookup("").is_none());
    }

    #[test]
    fn test_embedded_table() {
        let table = BonusTable::embedded();
        assert!(!table.is_empty());
        assert!(table.lookup("Name").is_none());

        let suit = table.lookup("eulogy-jones-suit").unwrap();
        assert_eq!(suit.name, "Eulogy Jones' Suit");
        assert_eq!(suit.rarity, "Legendary");
        assert_eq!(suit.bonus, SpecialVector([0, 0, 0, 7, 0, 2, 5]));

        assert_eq!(table.bonus_for("Jumpsuit"), SpecialVector::ZERO);
        assert!(table.lookup("Jumpsuit").is_some());
    }
}
