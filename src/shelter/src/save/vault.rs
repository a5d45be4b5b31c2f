//! Vault resources, unlock sets, and obstacles.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::SaveFile;
use crate::clamp;
use crate::schema;

const RESOURCES_PATH: &[&str] = &["vault", "storage", "resources"];

/// Upper bound for every stored resource amount. The game keeps no
/// per-resource limit on disk.
pub const MAX_RESOURCE: i64 = clamp::UNLIMITED;

/// Named vault resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    /// Bottle caps, the vault currency
    Caps,
    Food,
    Energy,
    Water,
    StimPack,
    RadAway,
    NukaColaQuantum,
}

impl Resource {
    pub const ALL: [Resource; 7] = [
        Resource::Caps,
        Resource::Food,
        Resource::Energy,
        Resource::Water,
        Resource::StimPack,
        Resource::RadAway,
        Resource::NukaColaQuantum,
    ];

    /// Key under `vault.storage.resources`. Caps are stored as "Nuka".
    pub fn disk_key(self) -> &'static str {
        match self {
            Resource::Caps => "Nuka",
            Resource::Food => "Food",
            Resource::Energy => "Energy",
            Resource::Water => "Water",
            Resource::StimPack => "StimPack",
            Resource::RadAway => "RadAway",
            Resource::NukaColaQuantum => "NukaColaQuantum",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Resource::Caps => "caps",
            Resource::Food => "food",
            Resource::Energy => "energy",
            Resource::Water => "water",
            Resource::StimPack => "stimpack",
            Resource::RadAway => "radaway",
            Resource::NukaColaQuantum => "quantum",
        }
    }

    /// Parse a logical or on-disk resource name
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "caps" | "currency" | "nuka" => Some(Resource::Caps),
            "food" => Some(Resource::Food),
            "energy" | "power" => Some(Resource::Energy),
            "water" => Some(Resource::Water),
            "stimpack" | "stimpacks" => Some(Resource::StimPack),
            "radaway" => Some(Resource::RadAway),
            "quantum" | "nukacolaquantum" => Some(Resource::NukaColaQuantum),
            _ => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unlock sets tracked by the vault
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnlockSet {
    Rooms,
    Recipes,
    Themes,
}

impl UnlockSet {
    /// Object path holding the list, and the list's key
    fn location(self) -> (&'static [&'static str], &'static str) {
        match self {
            UnlockSet::Rooms => (&["unlockableMgr"], "claimed"),
            UnlockSet::Recipes => (&["survivalW"], "recipes"),
            UnlockSet::Themes => (&["specialTheme"], "themeList"),
        }
    }
}

/// Theme entries are records with an `id`; rooms and recipes are plain strings
fn entry_id(entry: &Value) -> Option<&str> {
    entry
        .as_str()
        .or_else(|| entry.get("id").and_then(Value::as_str))
}

fn new_entry(set: UnlockSet, id: &str) -> Value {
    match set {
        UnlockSet::Themes => serde_json::json!({
            "id": id,
            "extraData": { "partsCollectedCount": 9, "IsNew": true }
        }),
        UnlockSet::Rooms | UnlockSet::Recipes => Value::String(id.to_string()),
    }
}

impl SaveFile {
    pub fn vault_name(&self) -> Option<String> {
        match self.vault()?.get("VaultName")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn set_vault_name(&mut self, name: &str) {
        schema::as_object_mut(self.vault_mut())
            .insert("VaultName".to_string(), Value::String(name.to_string()));
    }

    /// Current amount of a resource (0 when absent)
    pub fn resource(&self, resource: Resource) -> i64 {
        let mut current = Some(&self.data);
        for key in RESOURCES_PATH {
            current = current.and_then(|v| v.get(*key));
        }
        current
            .and_then(|r| r.get(resource.disk_key()))
            .and_then(schema::integer)
            .unwrap_or(0)
    }

    /// Set a resource amount, clamped to `0..=MAX_RESOURCE`. Returns the stored value.
    pub fn set_resource(&mut self, resource: Resource, amount: i64) -> i64 {
        let amount = clamp::clamp(amount, 0, MAX_RESOURCE);
        let resources = schema::ensure_path(self.root_mut(), RESOURCES_PATH);
        schema::as_object_mut(resources)
            .insert(resource.disk_key().to_string(), schema::int_value(amount));
        log::trace!("vault: {resource} = {amount}");
        amount
    }

    pub fn list_resources(&self) -> BTreeMap<Resource, i64> {
        Resource::ALL
            .into_iter()
            .map(|resource| (resource, self.resource(resource)))
            .collect()
    }

    /// Fill every resource to its maximum
    pub fn max_all_resources(&mut self) {
        for resource in Resource::ALL {
            self.set_resource(resource, MAX_RESOURCE);
        }
    }

    /// Ids in an unlock set, in document order
    pub fn unlocked(&self, set: UnlockSet) -> Vec<String> {
        let (path, key) = set.location();
        let mut current = Some(&self.data);
        for segment in path {
            current = current.and_then(|v| v.get(*segment));
        }
        current
            .and_then(|v| v.get(key))
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(entry_id)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Add `id` to an unlock set. Returns false if it was already present.
    pub fn unlock(&mut self, set: UnlockSet, id: &str) -> bool {
        let (path, key) = set.location();
        let parent = schema::ensure_path(self.root_mut(), path);
        let entries = schema::ensure_array(parent, key);
        if entries.iter().any(|entry| entry_id(entry) == Some(id)) {
            return false;
        }
        entries.push(new_entry(set, id));
        true
    }

    pub fn unlock_room(&mut self, id: &str) -> bool {
        self.unlock(UnlockSet::Rooms, id)
    }

    pub fn unlock_recipe(&mut self, id: &str) -> bool {
        self.unlock(UnlockSet::Recipes, id)
    }

    pub fn unlock_theme(&mut self, id: &str) -> bool {
        self.unlock(UnlockSet::Themes, id)
    }

    /// Clear the rocks/obstacles list. Returns how many were removed.
    pub fn remove_all_rocks(&mut self) -> usize {
        let Some(rocks) = self
            .data
            .get_mut("vault")
            .and_then(|v| v.get_mut("rocks"))
            .and_then(Value::as_array_mut)
        else {
            return 0;
        };
        let removed = rocks.len();
        rocks.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_save;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_float_resources() {
        let save = test_save();
        assert_eq!(save.resource(Resource::Caps), 1500);
        assert_eq!(save.resource(Resource::Food), 321);
        assert_eq!(save.resource(Resource::NukaColaQuantum), 0);
    }

    #[test]
    fn test_currency_clamps_to_wrap_point() {
        let mut save = test_save();
        let currency = Resource::parse("currency").unwrap();
        assert_eq!(save.set_resource(currency, 3_000_000_000), 2_147_483_648);
        assert_eq!(
            save.get("vault.storage.resources.Nuka").unwrap(),
            &json!(2_147_483_648i64)
        );
        assert_eq!(save.set_resource(Resource::Water, -10), 0);
    }

    #[test]
    fn test_set_resource_materializes_storage() {
        let mut save = SaveFile::from_json(r#"{"vault":{"VaultName":"7"}}"#).unwrap();
        save.set_resource(Resource::StimPack, 25);
        assert_eq!(save.resource(Resource::StimPack), 25);
        assert_eq!(save.vault_name().as_deref(), Some("7"));
    }

    #[test]
    fn test_list_resources_includes_all() {
        let save = test_save();
        let resources = save.list_resources();
        assert_eq!(resources.len(), Resource::ALL.len());
        assert_eq!(resources[&Resource::Energy], 410);
    }

    #[test]
    fn test_max_all_resources() {
        let mut save = test_save();
        save.max_all_resources();
        assert!(save
            .list_resources()
            .values()
            .all(|&amount| amount == MAX_RESOURCE));
    }

    #[test]
    fn test_resource_names() {
        assert_eq!(Resource::parse("Nuka"), Some(Resource::Caps));
        assert_eq!(Resource::parse("Stim-Pack"), Some(Resource::StimPack));
        assert_eq!(Resource::parse("NukaColaQuantum"), Some(Resource::NukaColaQuantum));
        assert_eq!(Resource::parse("lunchbox"), None);
        assert_eq!(Resource::Caps.disk_key(), "Nuka");
    }

    #[test]
    fn test_vault_name() {
        let mut save = test_save();
        assert_eq!(save.vault_name().as_deref(), Some("101"));
        save.set_vault_name("999");
        assert_eq!(save.vault_name().as_deref(), Some("999"));

        let numeric = SaveFile::from_json(r#"{"vault":{"VaultName":42}}"#).unwrap();
        assert_eq!(numeric.vault_name().as_deref(), Some("42"));
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut save = test_save();
        assert!(save.unlock_room("Nightclub"));
        assert!(!save.unlock_room("Nightclub"));
        assert!(save.unlock_recipe("Jumpsuit"));
        assert_eq!(save.unlocked(UnlockSet::Rooms), vec!["Nightclub"]);
        assert_eq!(save.unlocked(UnlockSet::Recipes), vec!["Jumpsuit"]);
    }

    #[test]
    fn test_unlock_theme_records() {
        let mut save = test_save();
        assert!(save.unlock_theme("Christmas"));
        assert!(!save.unlock_theme("Christmas"));
        assert_eq!(save.unlocked(UnlockSet::Themes), vec!["Christmas"]);
        assert_eq!(
            save.get("specialTheme.themeList[0].id").unwrap(),
            &json!("Christmas")
        );
    }

    #[test]
    fn test_remove_all_rocks() {
        let mut save = test_save();
        assert_eq!(save.remove_all_rocks(), 2);
        assert_eq!(save.remove_all_rocks(), 0);
        assert_eq!(save.get("vault.rocks").unwrap(), &json!([]));
    }
}
