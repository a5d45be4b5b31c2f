//! Consumable inventory (lunchboxes, helper bots, pet carriers, starter kits).
//!
//! Counts are derived from the packed `LunchBoxesByType` sequence; every write
//! rebuilds the whole sequence and keeps `LunchBoxesCount` equal to its length.

use serde_json::Value;

use super::{SaveError, SaveFile};
use crate::clamp;
use crate::packed::{self, ConsumableCounts, ConsumableKind, PackedError};
use crate::schema;

const SEQUENCE_KEY: &str = "LunchBoxesByType";
const COUNT_KEY: &str = "LunchBoxesCount";

/// Largest count accepted for a single kind
pub const MAX_CONSUMABLES: i64 = 9_999;

fn read_sequence(vault: Option<&Value>) -> Result<Vec<i64>, PackedError> {
    let Some(items) = vault
        .and_then(|v| v.get(SEQUENCE_KEY))
        .and_then(Value::as_array)
    else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| item.as_i64().ok_or(PackedError::NotAnInteger { index }))
        .collect()
}

impl SaveFile {
    /// Per-kind counts decoded from the packed sequence
    pub fn consumables(&self) -> Result<ConsumableCounts, SaveError> {
        let sequence = read_sequence(self.vault())?;
        Ok(packed::decode(&sequence)?)
    }

    /// Replace all counts at once
    pub fn set_consumables(&mut self, counts: &ConsumableCounts) {
        let sequence: Vec<Value> = packed::encode(counts)
            .into_iter()
            .map(schema::int_value)
            .collect();
        let total = sequence.len() as i64;

        let vault = schema::as_object_mut(self.vault_mut());
        vault.insert(SEQUENCE_KEY.to_string(), Value::Array(sequence));
        vault.insert(COUNT_KEY.to_string(), schema::int_value(total));
        log::trace!("vault: consumables = {counts:?}");
    }

    /// Set the count of one kind, keeping the other three.
    ///
    /// Fails without touching the document if the existing sequence is invalid.
    pub fn set_consumable_count(
        &mut self,
        kind: ConsumableKind,
        count: i64,
    ) -> Result<u32, SaveError> {
        let mut counts = self.consumables()?;
        let count = clamp::clamp(count, 0, MAX_CONSUMABLES) as u32;
        counts.set(kind, count);
        self.set_consumables(&counts);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_save;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_counts() {
        let save = test_save();
        let counts = save.consumables().unwrap();
        assert_eq!(counts.lunchbox, 1);
        assert_eq!(counts.helper_bot, 1);
        assert_eq!(counts.pet_carrier, 0);
        assert_eq!(counts.starter_kit, 1);
    }

    #[test]
    fn test_set_count_rebuilds_sequence() {
        let mut save = test_save();
        save.set_consumable_count(ConsumableKind::Lunchbox, 2).unwrap();
        save.set_consumable_count(ConsumableKind::StarterKit, 3)
            .unwrap();
        save.set_consumable_count(ConsumableKind::PetCarrier, 0)
            .unwrap();

        assert_eq!(
            save.get("vault.LunchBoxesByType").unwrap(),
            &json!([0, 0, 1, 3, 3, 3])
        );
        assert_eq!(save.get("vault.LunchBoxesCount").unwrap(), &json!(6));
    }

    #[test]
    fn test_set_count_clamps() {
        let mut save = test_save();
        assert_eq!(
            save.set_consumable_count(ConsumableKind::HelperBot, -4)
                .unwrap(),
            0
        );
        assert_eq!(
            save.set_consumable_count(ConsumableKind::HelperBot, 1_000_000)
                .unwrap(),
            MAX_CONSUMABLES as u32
        );
    }

    #[test]
    fn test_missing_sequence_reads_empty() {
        let mut save = SaveFile::from_json(r#"{"vault":{}}"#).unwrap();
        assert_eq!(save.consumables().unwrap(), ConsumableCounts::default());

        save.set_consumable_count(ConsumableKind::PetCarrier, 2)
            .unwrap();
        assert_eq!(save.get("vault.LunchBoxesByType").unwrap(), &json!([2, 2]));
    }

    #[test]
    fn test_invalid_sequence_is_decode_error_and_untouched() {
        let mut save =
            SaveFile::from_json(r#"{"vault":{"LunchBoxesByType":[0,7],"LunchBoxesCount":2}}"#)
                .unwrap();
        let before = save.clone();

        let err = save
            .set_consumable_count(ConsumableKind::Lunchbox, 5)
            .unwrap_err();
        assert_eq!(err.kind(), super::super::ErrorKind::Decode);
        assert_eq!(save, before);

        let save = SaveFile::from_json(r#"{"vault":{"LunchBoxesByType":[0,"x"]}}"#).unwrap();
        assert!(matches!(
            save.consumables(),
            Err(SaveError::Counter(PackedError::NotAnInteger { index: 1 }))
        ));
    }
}
