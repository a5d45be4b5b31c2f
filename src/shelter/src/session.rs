//! Editing session: owns the currently loaded save document.
//!
//! `Session` is the entry point UI code talks to. It holds at most one
//! document; every operation checks that one is loaded and then delegates to
//! the single implementation on [`SaveFile`]. Loading replaces the previous
//! document outright.

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::bonus::{BonusEntry, BonusTable};
use crate::packed::{ConsumableCounts, ConsumableKind};
use crate::save::{
    self, ColorField, DwellerSummary, Health, Resource, SaveError, SaveFile, UnlockSet,
};
use crate::schema::{EquipmentSlot, ExtraData};
use crate::special::Special;

/// Maps opaque item ids to display names (weapon/outfit/pet catalogs)
pub trait NameLookup {
    fn display_name(&self, id: &str) -> Option<String>;
}

impl NameLookup for BTreeMap<String, String> {
    fn display_name(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl NameLookup for std::collections::HashMap<String, String> {
    fn display_name(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// `extraData` attached to a pet that matches a bonus table row
pub fn pet_extra_data(entry: &BonusEntry) -> Value {
    json!({
        "uniqueName": entry.name,
        "specialBonus": entry.bonus.0,
    })
}

pub struct Session {
    document: Option<SaveFile>,
    bonus: &'static BonusTable,
    lookup: Option<Box<dyn NameLookup>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("loaded", &self.is_loaded())
            .field("bonus_entries", &self.bonus.len())
            .field("has_lookup", &self.lookup.is_some())
            .finish()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            document: None,
            bonus: BonusTable::embedded(),
            lookup: None,
        }
    }

    /// Install the catalog used to resolve item ids to display names
    pub fn with_lookup(mut self, lookup: Box<dyn NameLookup>) -> Self {
        self.lookup = Some(lookup);
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    /// Decrypt (if `encrypted`) and parse `input`, replacing any loaded document.
    ///
    /// On failure the previously loaded document is kept.
    pub fn load_document(&mut self, input: &[u8], encrypted: bool) -> Result<&SaveFile, SaveError> {
        let save = save::load_document(input, encrypted)?;
        Ok(&*self.document.insert(save))
    }

    /// Adopt an already parsed document
    pub fn load(&mut self, save: SaveFile) {
        self.document = Some(save);
    }

    /// Drop the loaded document, returning it
    pub fn unload(&mut self) -> Option<SaveFile> {
        self.document.take()
    }

    pub fn document(&self) -> Result<&SaveFile, SaveError> {
        self.document.as_ref().ok_or(SaveError::NotLoaded)
    }

    pub fn document_mut(&mut self) -> Result<&mut SaveFile, SaveError> {
        self.document.as_mut().ok_or(SaveError::NotLoaded)
    }

    /// Serialize the loaded document, as a `.sav` container when `encrypted`
    pub fn export_document(&self, encrypted: bool) -> Result<Vec<u8>, SaveError> {
        save::export_document(self.document()?, encrypted)
    }

    pub fn bonus_table(&self) -> &'static BonusTable {
        self.bonus
    }

    /// Bonus entry for an item id, resolving its display name through the
    /// lookup first
    pub fn bonus_for_item(&self, id: &str) -> Option<&'static BonusEntry> {
        let resolved = self.lookup.as_ref().and_then(|l| l.display_name(id));
        resolved
            .as_deref()
            .and_then(|name| self.bonus.lookup(name))
            .or_else(|| self.bonus.lookup(id))
    }

    // Dwellers

    pub fn list_dwellers(&self) -> Result<Vec<DwellerSummary>, SaveError> {
        Ok(self.document()?.list_dwellers())
    }

    pub fn dweller(&self, id: i64) -> Result<DwellerSummary, SaveError> {
        self.document()?.dweller(id)
    }

    pub fn special(&self, id: i64, stat: Special) -> Result<i64, SaveError> {
        self.document()?.special(id, stat)
    }

    pub fn set_special(&mut self, id: i64, stat: Special, value: i64) -> Result<i64, SaveError> {
        self.document_mut()?.set_special(id, stat, value)
    }

    pub fn set_health(
        &mut self,
        id: i64,
        health: f64,
        max_health: Option<f64>,
    ) -> Result<Health, SaveError> {
        self.document_mut()?.set_health(id, health, max_health)
    }

    pub fn set_radiation(&mut self, id: i64, radiation: f64) -> Result<f64, SaveError> {
        self.document_mut()?.set_radiation(id, radiation)
    }

    pub fn set_happiness(&mut self, id: i64, happiness: i64) -> Result<i64, SaveError> {
        self.document_mut()?.set_happiness(id, happiness)
    }

    pub fn set_level(
        &mut self,
        id: i64,
        level: i64,
        experience: Option<i64>,
    ) -> Result<(i64, i64), SaveError> {
        self.document_mut()?.set_level(id, level, experience)
    }

    pub fn set_pregnancy(&mut self, id: i64, pregnant: bool) -> Result<(), SaveError> {
        self.document_mut()?.set_pregnancy(id, pregnant)
    }

    pub fn set_evicted(&mut self, id: i64, evicted: bool) -> Result<(), SaveError> {
        self.document_mut()?.set_evicted(id, evicted)
    }

    pub fn set_assigned(&mut self, id: i64, assigned: bool) -> Result<(), SaveError> {
        self.document_mut()?.set_assigned(id, assigned)
    }

    pub fn set_name(&mut self, id: i64, first: &str, last: Option<&str>) -> Result<(), SaveError> {
        self.document_mut()?.set_name(id, first, last)
    }

    pub fn set_color(&mut self, id: i64, field: ColorField, argb: u32) -> Result<(), SaveError> {
        self.document_mut()?.set_color(id, field, argb)
    }

    pub fn set_outfit(&mut self, id: i64, item_id: &str, kind: Option<&str>) -> Result<(), SaveError> {
        self.document_mut()?
            .set_equipment(id, EquipmentSlot::Outfit, item_id, kind, ExtraData::Keep)
    }

    pub fn set_weapon(&mut self, id: i64, item_id: &str, kind: Option<&str>) -> Result<(), SaveError> {
        self.document_mut()?
            .set_equipment(id, EquipmentSlot::Weapon, item_id, kind, ExtraData::Keep)
    }

    /// Equip a pet. A matching bonus table row is attached as `extraData`;
    /// otherwise `extraData` is removed.
    pub fn set_pet(&mut self, id: i64, item_id: &str, kind: Option<&str>) -> Result<(), SaveError> {
        let extra = match self.bonus_for_item(item_id) {
            Some(entry) => ExtraData::Set(pet_extra_data(entry)),
            None => {
                log::debug!("no bonus table entry for pet {item_id:?}");
                ExtraData::Remove
            }
        };
        self.document_mut()?
            .set_equipment(id, EquipmentSlot::Pet, item_id, kind, extra)
    }

    pub fn max_all_special(&mut self) -> Result<usize, SaveError> {
        Ok(self.document_mut()?.max_all_special())
    }

    pub fn heal_all(&mut self) -> Result<usize, SaveError> {
        Ok(self.document_mut()?.heal_all())
    }

    pub fn max_all_happiness(&mut self) -> Result<usize, SaveError> {
        Ok(self.document_mut()?.max_all_happiness())
    }

    pub fn remove_all_radiation(&mut self) -> Result<usize, SaveError> {
        Ok(self.document_mut()?.remove_all_radiation())
    }

    // Vault

    pub fn vault_name(&self) -> Result<Option<String>, SaveError> {
        Ok(self.document()?.vault_name())
    }

    pub fn set_vault_name(&mut self, name: &str) -> Result<(), SaveError> {
        self.document_mut()?.set_vault_name(name);
        Ok(())
    }

    pub fn list_resources(&self) -> Result<BTreeMap<Resource, i64>, SaveError> {
        Ok(self.document()?.list_resources())
    }

    pub fn resource(&self, resource: Resource) -> Result<i64, SaveError> {
        Ok(self.document()?.resource(resource))
    }

    pub fn set_resource(&mut self, resource: Resource, amount: i64) -> Result<i64, SaveError> {
        Ok(self.document_mut()?.set_resource(resource, amount))
    }

    pub fn max_all_resources(&mut self) -> Result<(), SaveError> {
        self.document_mut()?.max_all_resources();
        Ok(())
    }

    pub fn consumables(&self) -> Result<ConsumableCounts, SaveError> {
        self.document()?.consumables()
    }

    pub fn set_consumable_count(&mut self, kind: ConsumableKind, count: i64) -> Result<u32, SaveError> {
        self.document_mut()?.set_consumable_count(kind, count)
    }

    pub fn unlocked(&self, set: UnlockSet) -> Result<Vec<String>, SaveError> {
        Ok(self.document()?.unlocked(set))
    }

    pub fn unlock(&mut self, set: UnlockSet, id: &str) -> Result<bool, SaveError> {
        Ok(self.document_mut()?.unlock(set, id))
    }

    pub fn remove_all_rocks(&mut self) -> Result<usize, SaveError> {
        Ok(self.document_mut()?.remove_all_rocks())
    }
}
