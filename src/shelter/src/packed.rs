//! Packed consumable counters.
//!
//! The vault stores its lunchbox-style consumables as one flat array where
//! every element is a kind tag (0..=3). Counts are derived by tallying tags;
//! there is no length field per kind.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors from decoding a packed counter sequence
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackedError {
    #[error("Invalid consumable kind {value} at index {index}")]
    InvalidKind { index: usize, value: i64 },

    #[error("Non-integer consumable entry at index {index}")]
    NotAnInteger { index: usize },
}

/// The four consumable kinds, in sentinel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConsumableKind {
    Lunchbox = 0,
    HelperBot = 1,
    PetCarrier = 2,
    StarterKit = 3,
}

impl ConsumableKind {
    pub const ALL: [ConsumableKind; 4] = [
        ConsumableKind::Lunchbox,
        ConsumableKind::HelperBot,
        ConsumableKind::PetCarrier,
        ConsumableKind::StarterKit,
    ];

    /// Sentinel value stored in the packed sequence
    pub fn tag(self) -> i64 {
        self as i64
    }

    pub fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            0 => Some(ConsumableKind::Lunchbox),
            1 => Some(ConsumableKind::HelperBot),
            2 => Some(ConsumableKind::PetCarrier),
            3 => Some(ConsumableKind::StarterKit),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ConsumableKind::Lunchbox => "lunchbox",
            ConsumableKind::HelperBot => "helper-bot",
            ConsumableKind::PetCarrier => "pet-carrier",
            ConsumableKind::StarterKit => "starter-kit",
        }
    }

    /// Parse a kind by name (accepts a few common spellings)
    pub fn parse(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "lunchbox" | "lunchboxes" => Some(ConsumableKind::Lunchbox),
            "helperbot" | "helper" | "mrhandy" => Some(ConsumableKind::HelperBot),
            "petcarrier" | "carrier" => Some(ConsumableKind::PetCarrier),
            "starterkit" | "starter" | "starterpack" => Some(ConsumableKind::StarterKit),
            _ => None,
        }
    }
}

impl fmt::Display for ConsumableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-kind consumable counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumableCounts {
    pub lunchbox: u32,
    pub helper_bot: u32,
    pub pet_carrier: u32,
    pub starter_kit: u32,
}

impl ConsumableCounts {
    pub fn get(&self, kind: ConsumableKind) -> u32 {
        match kind {
            ConsumableKind::Lunchbox => self.lunchbox,
            ConsumableKind::HelperBot => self.helper_bot,
            ConsumableKind::PetCarrier => self.pet_carrier,
            ConsumableKind::StarterKit => self.starter_kit,
        }
    }

    pub fn set(&mut self, kind: ConsumableKind, count: u32) {
        let slot = match kind {
            ConsumableKind::Lunchbox => &mut self.lunchbox,
            ConsumableKind::HelperBot => &mut self.helper_bot,
            ConsumableKind::PetCarrier => &mut self.pet_carrier,
            ConsumableKind::StarterKit => &mut self.starter_kit,
        };
        *slot = count;
    }

    /// Total number of slots (length of the encoded sequence)
    pub fn total(&self) -> usize {
        ConsumableKind::ALL
            .iter()
            .map(|&kind| self.get(kind) as usize)
            .sum()
    }
}

/// Tally a packed sequence into per-kind counts
pub fn decode(sequence: &[i64]) -> Result<ConsumableCounts, PackedError> {
    let mut counts = ConsumableCounts::default();
    for (index, &value) in sequence.iter().enumerate() {
        let kind = ConsumableKind::from_tag(value).ok_or(PackedError::InvalidKind { index, value })?;
        counts.set(kind, counts.get(kind) + 1);
    }
    Ok(counts)
}

/// Rebuild a packed sequence in kind-ascending order
pub fn encode(counts: &ConsumableCounts) -> Vec<i64> {
    let mut sequence = Vec::with_capacity(counts.total());
    for kind in ConsumableKind::ALL {
        sequence.extend(std::iter::repeat_n(kind.tag(), counts.get(kind) as usize));
    }
    sequence
}
