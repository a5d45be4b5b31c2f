//! # shelter
//!
//! Fallout Shelter save editor library: container codec, document model, and
//! clamped edits.
//!
//! This library provides functionality to:
//! - Decrypt and encrypt `.sav` containers (AES-256-CBC over base64)
//! - Query and modify the decrypted JSON document by path
//! - Edit dwellers (S.P.E.C.I.A.L., health, level, equipment) within game limits
//! - Edit vault resources, packed consumables, and unlock sets
//! - Look up outfit and pet stat bonuses
//!
//! ## Example
//!
//! ```no_run
//! use shelter::{Resource, Session, Special};
//! use std::fs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let container = fs::read("Vault1.sav")?;
//!
//! let mut session = Session::new();
//! session.load_document(&container, true)?;
//!
//! for dweller in session.list_dwellers()? {
//!     println!("{}: {}", dweller.id, dweller.full_name());
//! }
//!
//! session.set_special(1, Special::Luck, 10)?;
//! session.set_resource(Resource::Caps, 999_999)?;
//!
//! fs::write("Vault1.sav", session.export_document(true)?)?;
//! # Ok(())
//! # }
//! ```

pub mod bonus;
pub mod clamp;
pub mod crypto;
pub mod packed;
pub mod save;
pub mod schema;
pub mod session;
pub mod special;

// Re-export commonly used items
#[doc(inline)]
pub use bonus::{BonusEntry, BonusTable};
#[doc(inline)]
pub use crypto::{decrypt_sav, encrypt_sav, CryptoError};
#[doc(inline)]
pub use packed::{ConsumableCounts, ConsumableKind, PackedError};
#[doc(inline)]
pub use save::{
    export_document, load_document, ColorField, DwellerSummary, ErrorKind, Health, Resource,
    SaveError, SaveFile, UnlockSet, MAX_RESOURCE,
};
#[doc(inline)]
pub use schema::{EquipmentSlot, EquippedItem, ExtraData};
#[doc(inline)]
pub use session::{NameLookup, Session};
#[doc(inline)]
pub use special::{Special, SpecialVector};
