//! Save document parsing, querying, and modification.
//!
//! `SaveFile` owns the parsed JSON tree. Entity-specific mutators live in the
//! submodules and are exposed as methods on `SaveFile`; every write routes
//! through [`crate::clamp`] and [`crate::schema`].

mod consumables;
mod dweller;
mod vault;

pub use consumables::MAX_CONSUMABLES;
pub use dweller::{format_argb, parse_argb, placeholder_experience, ColorField, DwellerSummary, Health};
pub use vault::{Resource, UnlockSet, MAX_RESOURCE};

use serde_json::Value;
use thiserror::Error;

use crate::crypto::{self, CryptoError};
use crate::packed::PackedError;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Failed to decrypt save container: {0}")]
    Decode(#[from] CryptoError),

    #[error("Invalid consumable sequence: {0}")]
    Counter(#[from] PackedError),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No save document loaded")]
    NotLoaded,

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Array index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    #[error("Invalid array index: {0}")]
    InvalidIndex(String),

    #[error("No dweller with id {0}")]
    DwellerNotFound(i64),
}

/// Coarse error classes callers branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Container or packed sequence could not be decoded
    Decode,
    /// Decrypted text is not valid JSON
    Parse,
    /// Operation attempted without a loaded document
    Precondition,
    /// Path or entity lookup failed
    Lookup,
}

impl SaveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SaveError::Decode(_) | SaveError::Counter(_) => ErrorKind::Decode,
            SaveError::Parse(_) => ErrorKind::Parse,
            SaveError::NotLoaded => ErrorKind::Precondition,
            SaveError::KeyNotFound(_)
            | SaveError::IndexOutOfBounds(_)
            | SaveError::InvalidIndex(_)
            | SaveError::DwellerNotFound(_) => ErrorKind::Lookup,
        }
    }
}

/// A loaded save document with query/modify capabilities
#[derive(Debug, Clone, PartialEq)]
pub struct SaveFile {
    data: Value,
}

/// Decrypt (optionally) and parse a save document
pub fn load_document(input: &[u8], encrypted: bool) -> Result<SaveFile, SaveError> {
    let save = if encrypted {
        let text = crypto::decrypt_sav(input)?;
        SaveFile::from_json(&text)?
    } else {
        SaveFile::from_slice(input)?
    };
    log::debug!(
        "loaded save document ({} bytes, encrypted: {}, {} dwellers)",
        input.len(),
        encrypted,
        save.dwellers().len()
    );
    Ok(save)
}

/// Serialize a save document, encrypting it when requested
pub fn export_document(save: &SaveFile, encrypted: bool) -> Result<Vec<u8>, SaveError> {
    let text = save.to_json()?;
    let output = if encrypted {
        crypto::encrypt_sav(&text)
    } else {
        text.into_bytes()
    };
    log::debug!(
        "exported save document ({} bytes, encrypted: {})",
        output.len(),
        encrypted
    );
    Ok(output)
}

impl SaveFile {
    /// Parse a save document from JSON text
    pub fn from_json(text: &str) -> Result<Self, SaveError> {
        let data = serde_json::from_str(text)?;
        Ok(SaveFile { data })
    }

    /// Parse a save document from JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SaveError> {
        let data = serde_json::from_slice(bytes)?;
        Ok(SaveFile { data })
    }

    pub fn from_value(data: Value) -> Self {
        SaveFile { data }
    }

    /// Serialize back to compact JSON
    pub fn to_json(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string(&self.data)?)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String, SaveError> {
        Ok(serde_json::to_string_pretty(&self.data)?)
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Query a value at a path (e.g. "vault.storage.resources.Nuka" or "dwellers.dwellers\[0\].name")
    pub fn get(&self, path: &str) -> Result<&Value, SaveError> {
        query_json_path(&self.data, path)
    }

    /// Set a value at a path. Every segment except the last must already exist.
    pub fn set(&mut self, path: &str, value: Value) -> Result<(), SaveError> {
        set_json_path(&mut self.data, path, value)
    }

    /// Parse a string value into the appropriate JSON type (number, bool, or string)
    pub fn parse_value(value_str: &str) -> Value {
        parse_value(value_str)
    }

    /// Set a raw JSON value from a string (for complex/unknown structures)
    pub fn set_raw(&mut self, path: &str, json_str: &str) -> Result<(), SaveError> {
        let value: Value = serde_json::from_str(json_str)?;
        self.set(path, value)
    }

    /// All dweller records (empty if the document has none)
    pub fn dwellers(&self) -> &[Value] {
        self.data
            .get("dwellers")
            .and_then(|d| d.get("dwellers"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn dwellers_mut(&mut self) -> &mut [Value] {
        match self
            .data
            .get_mut("dwellers")
            .and_then(|d| d.get_mut("dwellers"))
            .and_then(Value::as_array_mut)
        {
            Some(list) => list.as_mut_slice(),
            None => &mut [],
        }
    }

    pub(crate) fn dweller_mut(&mut self, id: i64) -> Result<&mut Value, SaveError> {
        self.dwellers_mut()
            .iter_mut()
            .find(|d| dweller_id(d) == Some(id))
            .ok_or(SaveError::DwellerNotFound(id))
    }

    pub(crate) fn dweller_ref(&self, id: i64) -> Result<&Value, SaveError> {
        self.dwellers()
            .iter()
            .find(|d| dweller_id(d) == Some(id))
            .ok_or(SaveError::DwellerNotFound(id))
    }

    pub(crate) fn vault(&self) -> Option<&Value> {
        self.data.get("vault")
    }

    /// The vault object, created if the document lacks one
    pub(crate) fn vault_mut(&mut self) -> &mut Value {
        crate::schema::ensure_path(&mut self.data, &["vault"])
    }

    pub(crate) fn root_mut(&mut self) -> &mut Value {
        &mut self.data
    }
}

pub(crate) fn dweller_id(dweller: &Value) -> Option<i64> {
    dweller.get("serializeId").and_then(crate::schema::integer)
}

// Internal helper functions

/// Split "key[3]" into ("key", Some(3))
fn split_index(part: &str) -> Result<(&str, Option<usize>), SaveError> {
    let Some(bracket_pos) = part.find('[') else {
        return Ok((part, None));
    };
    let key = &part[..bracket_pos];
    let index_str = part[bracket_pos + 1..].trim_end_matches(']');
    let index = index_str
        .parse()
        .map_err(|_| SaveError::InvalidIndex(index_str.to_string()))?;
    Ok((key, Some(index)))
}

fn query_json_path<'a>(value: &'a Value, path: &str) -> Result<&'a Value, SaveError> {
    let mut current = value;

    for part in path.split('.') {
        let (key, index) = split_index(part)?;

        current = current
            .get(key)
            .ok_or_else(|| SaveError::KeyNotFound(key.to_string()))?;

        if let Some(index) = index {
            current = current
                .get(index)
                .ok_or(SaveError::IndexOutOfBounds(index))?;
        }
    }

    Ok(current)
}

fn set_json_path(value: &mut Value, path: &str, new_value: Value) -> Result<(), SaveError> {
    let parts: Vec<&str> = path.split('.').collect();
    let mut current = value;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;
        let (key, index) = split_index(part)?;

        match index {
            Some(index) => {
                current = current
                    .get_mut(key)
                    .ok_or_else(|| SaveError::KeyNotFound(key.to_string()))?;
                let slot = current
                    .get_mut(index)
                    .ok_or(SaveError::IndexOutOfBounds(index))?;
                if is_last {
                    *slot = new_value;
                    return Ok(());
                }
                current = slot;
            }
            None if is_last => {
                let map = current
                    .as_object_mut()
                    .ok_or_else(|| SaveError::KeyNotFound(key.to_string()))?;
                map.insert(key.to_string(), new_value);
                return Ok(());
            }
            None => {
                current = current
                    .get_mut(key)
                    .ok_or_else(|| SaveError::KeyNotFound(key.to_string()))?;
            }
        }
    }

    Ok(())
}

pub(crate) fn parse_value(value_str: &str) -> Value {
    if let Ok(num) = value_str.parse::<i64>() {
        return Value::Number(num.into());
    }
    if let Ok(num) = value_str.parse::<u64>() {
        return Value::Number(num.into());
    }
    if let Ok(num) = value_str.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(num) {
            return Value::Number(n);
        }
    }

    if value_str.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if value_str.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    Value::String(value_str.to_string())
}
