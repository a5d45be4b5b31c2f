//! S.P.E.C.I.A.L. attribute identifiers and vectors

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Special {
    Strength,
    Perception,
    Endurance,
    Charisma,
    Intelligence,
    Agility,
    Luck,
}

impl Special {
    pub const ALL: [Special; 7] = [
        Special::Strength,
        Special::Perception,
        Special::Endurance,
        Special::Charisma,
        Special::Intelligence,
        Special::Agility,
        Special::Luck,
    ];

    /// Position within the seven-slot vector (0 = Strength)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Special::Strength => 'S',
            Special::Perception => 'P',
            Special::Endurance => 'E',
            Special::Charisma => 'C',
            Special::Intelligence => 'I',
            Special::Agility => 'A',
            Special::Luck => 'L',
        }
    }

    /// Parse from a full name or single letter, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Special::ALL.into_iter().find(|stat| {
            lower == stat.name() || (lower.len() == 1 && lower.starts_with(stat.letter().to_ascii_lowercase()))
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Special::Strength => "strength",
            Special::Perception => "perception",
            Special::Endurance => "endurance",
            Special::Charisma => "charisma",
            Special::Intelligence => "intelligence",
            Special::Agility => "agility",
            Special::Luck => "luck",
        }
    }
}

impl fmt::Display for Special {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Seven values in S.P.E.C.I.A.L. order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialVector(pub [i64; 7]);

impl SpecialVector {
    pub const ZERO: SpecialVector = SpecialVector([0; 7]);

    pub fn get(&self, stat: Special) -> i64 {
        self.0[stat.index()]
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }
}

impl fmt::Display for SpecialVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Special::ALL
            .iter()
            .map(|stat| format!("{}{:+}", stat.letter(), self.get(*stat)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
