//! Tolerant access to fields that exist in more than one on-disk shape.
//!
//! Reads never fail: a missing or oddly-shaped field yields a documented
//! default. Writes materialize any missing parent objects first and keep
//! unknown sibling keys intact.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::special::Special;

/// Misspelled item-record key written by the game. Required for
/// compatibility; the loader reads this exact spelling.
pub const RANDOM_WEAPON_ASSIGNED_KEY: &str = "hasRandonWeaponBeenAssigned";

/// Game-written outfit key. The misspelling is required for compatibility.
pub const LEGACY_OUTFIT_KEY: &str = "equipedOutfit";

/// Game-written weapon key. The misspelling is required for compatibility.
pub const LEGACY_WEAPON_KEY: &str = "equipedWeapon";

pub const PET_KEY: &str = "equippedPet";

/// Number of entries in a current-format `stats.stats` array (slot 0 is reserved)
const STAT_SLOTS: usize = 8;

/// Older documents carry exactly the seven S.P.E.C.I.A.L. slots
const LEGACY_STAT_SLOTS: usize = 7;

/// Read a number, accepting integers, floats and `{ "value": n }` wrappers
pub fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(map) => map.get("value").and_then(Value::as_f64),
        _ => None,
    }
}

/// Read a number rounded to the nearest integer
pub fn integer(value: &Value) -> Option<i64> {
    number(value).map(|n| n.round() as i64)
}

/// Read an integer at `key` of `parent`, or `default` when absent or malformed
pub fn integer_or(parent: Option<&Value>, key: &str, default: i64) -> i64 {
    match parent.and_then(|p| p.get(key)) {
        None | Some(Value::Null) => default,
        Some(v) => integer(v).unwrap_or_else(|| {
            log::warn!("field {key:?} has unexpected shape {v}, using default {default}");
            default
        }),
    }
}

pub fn bool_or(parent: Option<&Value>, key: &str, default: bool) -> bool {
    parent
        .and_then(|p| p.get(key))
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

/// Make `value` an object, replacing any non-object content
pub fn as_object_mut(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced with an object"),
    }
}

/// Get the object at `key`, creating it from `default` if missing or not an object
pub fn ensure_object<'a>(
    parent: &'a mut Value,
    key: &str,
    default: impl FnOnce() -> Value,
) -> &'a mut Map<String, Value> {
    let map = as_object_mut(parent);
    let slot = map.entry(key.to_string()).or_insert(Value::Null);
    if !slot.is_object() {
        if !slot.is_null() {
            log::warn!("replacing non-object field {key:?} with default structure");
        }
        *slot = default();
    }
    as_object_mut(slot)
}

/// Walk a chain of object keys from `root`, creating empty objects as needed
pub fn ensure_path<'a>(root: &'a mut Value, keys: &[&str]) -> &'a mut Value {
    let mut current = root;
    for key in keys {
        let map = as_object_mut(current);
        current = map
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
    }
    current
}

/// Get the array at `key`, creating an empty one if missing or not an array
pub fn ensure_array<'a>(parent: &'a mut Value, key: &str) -> &'a mut Vec<Value> {
    let map = as_object_mut(parent);
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot was just replaced with an array"),
    }
}

/// Wrap an integer as a JSON number
pub fn int_value(n: i64) -> Value {
    Value::Number(n.into())
}

// Default substructures written when a dweller lacks them

pub fn default_health() -> Value {
    json!({
        "healthValue": 100,
        "radiationValue": 0,
        "permaDeath": false,
        "lastLevelUpdated": 1,
        "maxHealth": 100
    })
}

pub fn default_happiness() -> Value {
    json!({ "happinessValue": 50 })
}

pub fn default_experience() -> Value {
    json!({
        "experienceValue": 0,
        "currentLevel": 1,
        "wastelandExperience": 0,
        "accum": 0,
        "needLvUp": false
    })
}

pub fn default_stat_slot() -> Value {
    json!({ "value": 1, "mod": 0, "exp": 0 })
}

pub fn default_stats() -> Value {
    json!({ "stats": vec![default_stat_slot(); STAT_SLOTS] })
}

/// A stat slot as found on disk
#[derive(Debug, Clone, PartialEq)]
pub enum StatSlot {
    /// Bare number
    Raw(f64),
    /// `{ "value": n, ... }` with optional sibling keys
    Wrapped(f64),
    Missing,
}

impl StatSlot {
    pub fn read(slot: Option<&Value>) -> Self {
        match slot {
            Some(Value::Number(n)) => n.as_f64().map_or(StatSlot::Missing, StatSlot::Raw),
            Some(Value::Object(map)) => map
                .get("value")
                .and_then(Value::as_f64)
                .map_or(StatSlot::Missing, StatSlot::Wrapped),
            _ => StatSlot::Missing,
        }
    }

    pub fn value(&self) -> Option<i64> {
        match self {
            StatSlot::Raw(v) | StatSlot::Wrapped(v) => Some(v.round() as i64),
            StatSlot::Missing => None,
        }
    }

    /// Write `value` into `slot` in wrapped form, keeping sibling keys
    pub fn write(slot: &mut Value, value: i64) {
        if !slot.is_object() {
            *slot = default_stat_slot();
        }
        as_object_mut(slot).insert("value".to_string(), int_value(value));
    }
}

/// Index of `stat` inside a `stats.stats` array of `len` entries
fn stat_index(len: usize, stat: Special) -> usize {
    if len == LEGACY_STAT_SLOTS {
        stat.index()
    } else {
        stat.index() + 1
    }
}

/// Read one S.P.E.C.I.A.L. value from a dweller (missing reads as 1)
pub fn read_special(dweller: &Value, stat: Special) -> i64 {
    let Some(slots) = dweller
        .get("stats")
        .and_then(|s| s.get("stats"))
        .and_then(Value::as_array)
    else {
        return 1;
    };
    StatSlot::read(slots.get(stat_index(slots.len(), stat)))
        .value()
        .unwrap_or(1)
}

/// Write one S.P.E.C.I.A.L. value, materializing the stats array if needed
pub fn write_special(dweller: &mut Value, stat: Special, value: i64) {
    let stats = ensure_object(dweller, "stats", default_stats);
    let slots = stats
        .entry("stats".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slots.is_array() {
        *slots = Value::Array(Vec::new());
    }
    let Value::Array(slots) = slots else {
        return;
    };
    if slots.len() != LEGACY_STAT_SLOTS && slots.len() < STAT_SLOTS {
        slots.resize(STAT_SLOTS, default_stat_slot());
    }
    let index = stat_index(slots.len(), stat);
    StatSlot::write(&mut slots[index], value);
}

/// Equipment slots on a dweller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Outfit,
    Weapon,
    Pet,
}

impl EquipmentSlot {
    /// Key the game itself writes
    pub fn game_key(self) -> &'static str {
        match self {
            EquipmentSlot::Outfit => LEGACY_OUTFIT_KEY,
            EquipmentSlot::Weapon => LEGACY_WEAPON_KEY,
            EquipmentSlot::Pet => PET_KEY,
        }
    }

    /// Second name some documents carry for the same record
    pub fn alias_key(self) -> &'static str {
        match self {
            EquipmentSlot::Outfit => "outfit",
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Pet => "pet",
        }
    }

    /// Default `type` field for items in this slot
    pub fn item_type(self) -> &'static str {
        match self {
            EquipmentSlot::Outfit => "Outfit",
            EquipmentSlot::Weapon => "Weapon",
            EquipmentSlot::Pet => "Pet",
        }
    }
}

/// Read model of an equipped item record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub id: String,
    pub kind: String,
    pub assigned: bool,
}

impl EquippedItem {
    fn from_json(record: &Value) -> Option<Self> {
        let id = match record.get("id")? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        Some(EquippedItem {
            id,
            kind: record
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            assigned: bool_or(Some(record), "hasBeenAssigned", false),
        })
    }
}

/// Read an equipped item, preferring the game-written key over the alias
pub fn read_equipment(dweller: &Value, slot: EquipmentSlot) -> Option<EquippedItem> {
    [slot.game_key(), slot.alias_key()]
        .iter()
        .filter_map(|key| dweller.get(*key))
        .find_map(EquippedItem::from_json)
}

/// What an equipment write does with the record's `extraData`
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraData {
    /// Leave whatever the existing record carries
    Keep,
    Set(Value),
    Remove,
}

/// Write an item record under both keys of `slot`.
///
/// The id is always stored as a string. Unknown keys of the existing record
/// are kept.
pub fn write_equipment(
    dweller: &mut Value,
    slot: EquipmentSlot,
    id: &str,
    kind: Option<&str>,
    extra_data: ExtraData,
) {
    let existing = [slot.game_key(), slot.alias_key()]
        .iter()
        .filter_map(|key| dweller.get(*key))
        .find(|v| v.is_object())
        .cloned();

    let mut record = existing.unwrap_or_else(|| Value::Object(Map::new()));
    let map = as_object_mut(&mut record);
    map.insert("id".to_string(), Value::String(id.to_string()));

    let kind = kind
        .map(str::to_string)
        .or_else(|| map.get("type").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| slot.item_type().to_string());
    map.insert("type".to_string(), Value::String(kind));
    map.entry("hasBeenAssigned".to_string())
        .or_insert(Value::Bool(false));
    map.entry(RANDOM_WEAPON_ASSIGNED_KEY.to_string())
        .or_insert(Value::Bool(false));

    match extra_data {
        ExtraData::Keep => {}
        ExtraData::Set(extra) => {
            map.insert("extraData".to_string(), extra);
        }
        ExtraData::Remove => {
            map.remove("extraData");
        }
    }

    let dweller = as_object_mut(dweller);
    dweller.insert(slot.alias_key().to_string(), record.clone());
    dweller.insert(slot.game_key().to_string(), record);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_accepts_both_shapes() {
        assert_eq!(number(&json!(5)), Some(5.0));
        assert_eq!(number(&json!(5.5)), Some(5.5));
        assert_eq!(number(&json!({ "value": 7, "mod": 1 })), Some(7.0));
        assert_eq!(number(&json!("7")), None);
        assert_eq!(integer(&json!(99.6)), Some(100));
    }

    #[test]
    fn test_stat_slot_shapes() {
        assert_eq!(StatSlot::read(Some(&json!(4))), StatSlot::Raw(4.0));
        assert_eq!(
            StatSlot::read(Some(&json!({ "value": 6, "exp": 10 }))),
            StatSlot::Wrapped(6.0)
        );
        assert_eq!(StatSlot::read(Some(&json!(null))), StatSlot::Missing);
        assert_eq!(StatSlot::read(None), StatSlot::Missing);
    }

    #[test]
    fn test_stat_write_keeps_siblings() {
        let mut slot = json!({ "value": 3, "mod": 2, "exp": 120 });
        StatSlot::write(&mut slot, 9);
        assert_eq!(slot, json!({ "value": 9, "mod": 2, "exp": 120 }));
    }

    #[test]
    fn test_stat_write_wraps_raw_number() {
        let mut slot = json!(3);
        StatSlot::write(&mut slot, 5);
        assert_eq!(slot["value"], json!(5));
        assert!(slot.is_object());
    }

    #[test]
    fn test_special_offset_current_layout() {
        let mut dweller = json!({
            "stats": { "stats": [
                { "value": 0 }, { "value": 2 }, { "value": 3 }, 4,
                { "value": 5 }, { "value": 6 }, { "value": 7 }, { "value": 8 }
            ]}
        });
        assert_eq!(read_special(&dweller, Special::Strength), 2);
        assert_eq!(read_special(&dweller, Special::Endurance), 4);
        assert_eq!(read_special(&dweller, Special::Luck), 8);

        write_special(&mut dweller, Special::Endurance, 10);
        assert_eq!(dweller["stats"]["stats"][3], json!({ "value": 10, "mod": 0, "exp": 0 }));
    }

    #[test]
    fn test_special_offset_legacy_layout() {
        let mut dweller = json!({ "stats": { "stats": [1, 2, 3, 4, 5, 6, 7] } });
        assert_eq!(read_special(&dweller, Special::Strength), 1);
        assert_eq!(read_special(&dweller, Special::Luck), 7);

        write_special(&mut dweller, Special::Luck, 9);
        let slots = dweller["stats"]["stats"].as_array().unwrap();
        assert_eq!(slots.len(), 7);
        assert_eq!(slots[6]["value"], json!(9));
    }

    #[test]
    fn test_special_materializes_missing_stats() {
        let mut dweller = json!({ "name": "Ann" });
        assert_eq!(read_special(&dweller, Special::Agility), 1);

        write_special(&mut dweller, Special::Agility, 6);
        let slots = dweller["stats"]["stats"].as_array().unwrap();
        assert_eq!(slots.len(), 8);
        assert_eq!(read_special(&dweller, Special::Agility), 6);
        assert_eq!(dweller["name"], json!("Ann"));
    }

    #[test]
    fn test_ensure_object_creates_default() {
        let mut dweller = json!({});
        let health = ensure_object(&mut dweller, "health", default_health);
        assert_eq!(health.get("maxHealth"), Some(&json!(100)));
    }

    #[test]
    fn test_ensure_path() {
        let mut root = json!({ "vault": { "VaultName": "1" } });
        ensure_path(&mut root, &["vault", "storage", "resources"])
            .as_object_mut()
            .unwrap()
            .insert("Food".into(), json!(1));
        assert_eq!(root["vault"]["storage"]["resources"]["Food"], json!(1));
        assert_eq!(root["vault"]["VaultName"], json!("1"));
    }

    #[test]
    fn test_equipment_written_under_both_keys() {
        let mut dweller = json!({});
        write_equipment(&mut dweller, EquipmentSlot::Outfit, "1234", None, ExtraData::Keep);

        let record = &dweller[LEGACY_OUTFIT_KEY];
        assert_eq!(record["id"], json!("1234"));
        assert_eq!(record["type"], json!("Outfit"));
        assert_eq!(record[RANDOM_WEAPON_ASSIGNED_KEY], json!(false));
        assert_eq!(&dweller["outfit"], record);
    }

    #[test]
    fn test_equipment_keeps_unknown_keys_and_drops_extra_data() {
        let mut dweller = json!({
            "equippedPet": {
                "id": "dogmeat", "type": "Pet", "hasBeenAssigned": true,
                "hasRandonWeaponBeenAssigned": false,
                "extraData": { "uniqueName": "Dogmeat" }, "custom": 1
            }
        });
        write_equipment(
            &mut dweller,
            EquipmentSlot::Pet,
            "ghoulcat",
            None,
            ExtraData::Remove,
        );

        let record = &dweller["equippedPet"];
        assert_eq!(record["id"], json!("ghoulcat"));
        assert_eq!(record["hasBeenAssigned"], json!(true));
        assert_eq!(record["custom"], json!(1));
        assert!(record.get("extraData").is_none());
        assert_eq!(&dweller["pet"], record);
    }

    #[test]
    fn test_outfit_write_keeps_extra_data() {
        let mut dweller = json!({
            "equipedOutfit": {
                "id": "a", "type": "Outfit",
                "extraData": { "uniqueName": "Tuxedo", "IsNew": false }
            }
        });
        write_equipment(&mut dweller, EquipmentSlot::Outfit, "b", None, ExtraData::Keep);

        let expected = json!({ "uniqueName": "Tuxedo", "IsNew": false });
        assert_eq!(dweller[LEGACY_OUTFIT_KEY]["id"], json!("b"));
        assert_eq!(dweller[LEGACY_OUTFIT_KEY]["extraData"], expected);
        assert_eq!(dweller["outfit"]["extraData"], expected);
    }

    #[test]
    fn test_ensure_object_replaces_null_with_full_default() {
        let mut dweller = json!({ "health": null, "happiness": 7 });

        let health = ensure_object(&mut dweller, "health", default_health);
        assert_eq!(health.get("maxHealth"), Some(&json!(100)));
        assert_eq!(health.get("radiationValue"), Some(&json!(0)));
        assert_eq!(health.get("permaDeath"), Some(&json!(false)));

        let happiness = ensure_object(&mut dweller, "happiness", default_happiness);
        assert_eq!(happiness.get("happinessValue"), Some(&json!(50)));
    }

    #[test]
    fn test_read_equipment_prefers_game_key() {
        let dweller = json!({
            "equipedWeapon": { "id": "Rifle", "type": "Weapon" },
            "weapon": { "id": "Pistol", "type": "Weapon" }
        });
        let item = read_equipment(&dweller, EquipmentSlot::Weapon).unwrap();
        assert_eq!(item.id, "Rifle");

        let alias_only = json!({ "weapon": { "id": 42, "type": "Weapon" } });
        let item = read_equipment(&alias_only, EquipmentSlot::Weapon).unwrap();
        assert_eq!(item.id, "42");

        assert!(read_equipment(&json!({}), EquipmentSlot::Pet).is_none());
    }
}
