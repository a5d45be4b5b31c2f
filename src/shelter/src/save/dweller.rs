//! Dweller mutation.
//!
//! All dweller edits go through the methods here. Setters clamp silently and
//! create missing substructures (health, happiness, experience, stats) before
//! writing.

use serde::Serialize;
use serde_json::Value;

use super::{dweller_id, SaveError, SaveFile};
use crate::clamp;
use crate::schema::{self, EquipmentSlot, EquippedItem, ExtraData};
use crate::special::{Special, SpecialVector};

const DEFAULT_HEALTH: f64 = 100.0;
const DEFAULT_HAPPINESS: i64 = 50;
const NO_PARTNER: i64 = -1;

/// Placeholder experience for a level when none is supplied.
///
/// `level² × 1000` approximates the curve; it is not the game's table.
pub fn placeholder_experience(level: i64) -> i64 {
    level * level * 1000
}

/// Packed ARGB color fields on a dweller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorField {
    Skin,
    Hair,
    Outfit,
}

impl ColorField {
    pub fn key(self) -> &'static str {
        match self {
            ColorField::Skin => "skinColor",
            ColorField::Hair => "hairColor",
            ColorField::Outfit => "outfitColor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "skin" => Some(ColorField::Skin),
            "hair" => Some(ColorField::Hair),
            "outfit" => Some(ColorField::Outfit),
            _ => None,
        }
    }
}

/// Parse `#AARRGGBB` or `#RRGGBB` (alpha defaults to opaque)
pub fn parse_argb(s: &str) -> Option<u32> {
    let hex = s.trim().trim_start_matches('#');
    let value = u32::from_str_radix(hex, 16).ok()?;
    match hex.len() {
        8 => Some(value),
        6 => Some(0xFF00_0000 | value),
        _ => None,
    }
}

pub fn format_argb(argb: u32) -> String {
    format!("#{:08X}", argb)
}

/// Health record as read from a dweller (missing reads as 100/100/0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Health {
    pub health: f64,
    pub max_health: f64,
    pub radiation: f64,
}

impl Health {
    fn read(dweller: &Value) -> Self {
        let record = dweller.get("health");
        let field = |key: &str, default: f64| {
            record
                .and_then(|r| r.get(key))
                .and_then(schema::number)
                .unwrap_or(default)
        };
        Health {
            health: field("healthValue", DEFAULT_HEALTH),
            max_health: field("maxHealth", DEFAULT_HEALTH),
            radiation: field("radiationValue", 0.0),
        }
    }
}

/// Read model of one dweller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DwellerSummary {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub special: SpecialVector,
    pub health: Health,
    pub happiness: i64,
    pub level: i64,
    pub experience: i64,
    pub outfit: Option<EquippedItem>,
    pub weapon: Option<EquippedItem>,
    pub pet: Option<EquippedItem>,
    pub skin_color: Option<u32>,
    pub hair_color: Option<u32>,
    pub outfit_color: Option<u32>,
    pub pregnant: bool,
    pub baby_ready: bool,
    pub evicted: bool,
    pub assigned: bool,
}

impl DwellerSummary {
    pub fn from_json(dweller: &Value) -> Self {
        let text = |key: &str| {
            dweller
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let color = |field: ColorField| {
            dweller
                .get(field.key())
                .and_then(Value::as_u64)
                .and_then(|c| u32::try_from(c).ok())
        };
        let experience = dweller.get("experience");

        let mut special = [0i64; 7];
        for stat in Special::ALL {
            special[stat.index()] = schema::read_special(dweller, stat);
        }

        DwellerSummary {
            id: dweller_id(dweller).unwrap_or(-1),
            name: text("name"),
            last_name: text("lastName"),
            special: SpecialVector(special),
            health: Health::read(dweller),
            happiness: schema::integer_or(dweller.get("happiness"), "happinessValue", DEFAULT_HAPPINESS),
            level: schema::integer_or(experience, "currentLevel", 1),
            experience: schema::integer_or(experience, "experienceValue", 0),
            outfit: schema::read_equipment(dweller, EquipmentSlot::Outfit),
            weapon: schema::read_equipment(dweller, EquipmentSlot::Weapon),
            pet: schema::read_equipment(dweller, EquipmentSlot::Pet),
            skin_color: color(ColorField::Skin),
            hair_color: color(ColorField::Hair),
            outfit_color: color(ColorField::Outfit),
            pregnant: schema::bool_or(Some(dweller), "pregnant", false),
            baby_ready: schema::bool_or(Some(dweller), "babyReady", false),
            evicted: schema::bool_or(Some(dweller), "WillBeEvicted", false),
            assigned: schema::bool_or(Some(dweller), "assigned", false),
        }
    }

    /// "First Last", or just the first name when there is no last name
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.last_name)
        }
    }
}

// Single-dweller operations on a raw record

fn set_special(dweller: &mut Value, stat: Special, value: i64) -> i64 {
    let value = clamp::clamp_to(value, &clamp::SPECIAL);
    schema::write_special(dweller, stat, value);
    value
}

fn set_health(dweller: &mut Value, health: f64, max_health: Option<f64>) -> Health {
    let current = Health::read(dweller);
    let record = schema::ensure_object(dweller, "health", schema::default_health);

    let requested = max_health.is_some();
    let max_health = clamp::clamp_f64(max_health.unwrap_or(current.max_health), 1.0, f64::MAX);
    if requested || max_health != current.max_health {
        record.insert("maxHealth".to_string(), Value::from(max_health));
    }
    let health = clamp::clamp_f64(health, 0.0, max_health);
    record.insert("healthValue".to_string(), Value::from(health));

    Health {
        health,
        max_health,
        radiation: current.radiation,
    }
}

fn set_radiation(dweller: &mut Value, radiation: f64) -> f64 {
    let radiation = clamp::clamp_f64(
        radiation,
        *clamp::RADIATION.start() as f64,
        *clamp::RADIATION.end() as f64,
    );
    schema::ensure_object(dweller, "health", schema::default_health)
        .insert("radiationValue".to_string(), Value::from(radiation));
    radiation
}

fn set_happiness(dweller: &mut Value, happiness: i64) -> i64 {
    let happiness = clamp::clamp_to(happiness, &clamp::HAPPINESS);
    schema::ensure_object(dweller, "happiness", schema::default_happiness)
        .insert("happinessValue".to_string(), schema::int_value(happiness));
    happiness
}

fn set_level(dweller: &mut Value, level: i64, experience: Option<i64>) -> (i64, i64) {
    let level = clamp::clamp_to(level, &clamp::LEVEL);
    let experience = experience
        .map(|xp| xp.max(0))
        .unwrap_or_else(|| placeholder_experience(level));

    let record = schema::ensure_object(dweller, "experience", schema::default_experience);
    record.insert("currentLevel".to_string(), schema::int_value(level));
    record.insert("experienceValue".to_string(), schema::int_value(experience));
    (level, experience)
}

fn set_pregnancy(dweller: &mut Value, pregnant: bool) {
    let map = schema::as_object_mut(dweller);
    map.insert("pregnant".to_string(), Value::Bool(pregnant));
    if pregnant {
        return;
    }
    map.insert("babyReady".to_string(), Value::Bool(false));
    if let Some(relations) = map.get_mut("relations").and_then(Value::as_object_mut) {
        relations.insert("partner".to_string(), schema::int_value(NO_PARTNER));
    }
}

fn set_flag(dweller: &mut Value, key: &str, value: bool) {
    schema::as_object_mut(dweller).insert(key.to_string(), Value::Bool(value));
}

impl SaveFile {
    /// Summaries of every dweller, in document order
    pub fn list_dwellers(&self) -> Vec<DwellerSummary> {
        self.dwellers().iter().map(DwellerSummary::from_json).collect()
    }

    pub fn dweller(&self, id: i64) -> Result<DwellerSummary, SaveError> {
        self.dweller_ref(id).map(DwellerSummary::from_json)
    }

    pub fn special(&self, id: i64, stat: Special) -> Result<i64, SaveError> {
        Ok(schema::read_special(self.dweller_ref(id)?, stat))
    }

    /// Set one S.P.E.C.I.A.L. stat, clamped to 0..=10. Returns the stored value.
    pub fn set_special(&mut self, id: i64, stat: Special, value: i64) -> Result<i64, SaveError> {
        let stored = set_special(self.dweller_mut(id)?, stat, value);
        log::trace!("dweller {id}: {stat} = {stored}");
        Ok(stored)
    }

    /// Set current health and optionally max health.
    ///
    /// Max health is applied first, then current health is pulled down to it.
    pub fn set_health(
        &mut self,
        id: i64,
        health: f64,
        max_health: Option<f64>,
    ) -> Result<Health, SaveError> {
        let stored = set_health(self.dweller_mut(id)?, health, max_health);
        log::trace!("dweller {id}: health = {stored:?}");
        Ok(stored)
    }

    pub fn set_radiation(&mut self, id: i64, radiation: f64) -> Result<f64, SaveError> {
        Ok(set_radiation(self.dweller_mut(id)?, radiation))
    }

    pub fn set_happiness(&mut self, id: i64, happiness: i64) -> Result<i64, SaveError> {
        Ok(set_happiness(self.dweller_mut(id)?, happiness))
    }

    /// Set level (1..=50) and experience. Without explicit experience a
    /// placeholder from [`placeholder_experience`] is written.
    pub fn set_level(
        &mut self,
        id: i64,
        level: i64,
        experience: Option<i64>,
    ) -> Result<(i64, i64), SaveError> {
        let stored = set_level(self.dweller_mut(id)?, level, experience);
        log::trace!("dweller {id}: level/xp = {stored:?}");
        Ok(stored)
    }

    /// Toggle pregnancy. Clearing it also clears the partner and baby-ready flag.
    pub fn set_pregnancy(&mut self, id: i64, pregnant: bool) -> Result<(), SaveError> {
        set_pregnancy(self.dweller_mut(id)?, pregnant);
        Ok(())
    }

    pub fn set_evicted(&mut self, id: i64, evicted: bool) -> Result<(), SaveError> {
        set_flag(self.dweller_mut(id)?, "WillBeEvicted", evicted);
        Ok(())
    }

    pub fn set_assigned(&mut self, id: i64, assigned: bool) -> Result<(), SaveError> {
        set_flag(self.dweller_mut(id)?, "assigned", assigned);
        Ok(())
    }

    pub fn set_name(
        &mut self,
        id: i64,
        first: &str,
        last: Option<&str>,
    ) -> Result<(), SaveError> {
        let map = schema::as_object_mut(self.dweller_mut(id)?);
        map.insert("name".to_string(), Value::String(first.to_string()));
        if let Some(last) = last {
            map.insert("lastName".to_string(), Value::String(last.to_string()));
        }
        Ok(())
    }

    pub fn set_color(&mut self, id: i64, field: ColorField, argb: u32) -> Result<(), SaveError> {
        schema::as_object_mut(self.dweller_mut(id)?)
            .insert(field.key().to_string(), Value::from(argb));
        Ok(())
    }

    /// Equip an item in `slot`, writing both key spellings.
    ///
    /// `extra_data` says whether the record's `extraData` is kept, replaced or removed.
    pub fn set_equipment(
        &mut self,
        id: i64,
        slot: EquipmentSlot,
        item_id: &str,
        kind: Option<&str>,
        extra_data: ExtraData,
    ) -> Result<(), SaveError> {
        schema::write_equipment(self.dweller_mut(id)?, slot, item_id, kind, extra_data);
        log::trace!("dweller {id}: {slot:?} = {item_id}");
        Ok(())
    }

    // Batch operations

    /// Set every stat of every dweller to 10. Returns the number of dwellers touched.
    pub fn max_all_special(&mut self) -> usize {
        let dwellers = self.dwellers_mut();
        for dweller in dwellers.iter_mut() {
            for stat in Special::ALL {
                set_special(dweller, stat, *clamp::SPECIAL.end());
            }
        }
        dwellers.len()
    }

    /// Restore every dweller to full health
    pub fn heal_all(&mut self) -> usize {
        let dwellers = self.dwellers_mut();
        for dweller in dwellers.iter_mut() {
            let max = Health::read(dweller).max_health;
            set_health(dweller, max, None);
        }
        dwellers.len()
    }

    pub fn max_all_happiness(&mut self) -> usize {
        let dwellers = self.dwellers_mut();
        for dweller in dwellers.iter_mut() {
            set_happiness(dweller, *clamp::HAPPINESS.end());
        }
        dwellers.len()
    }

    pub fn remove_all_radiation(&mut self) -> usize {
        let dwellers = self.dwellers_mut();
        for dweller in dwellers.iter_mut() {
            set_radiation(dweller, 0.0);
        }
        dwellers.len()
    }
}
