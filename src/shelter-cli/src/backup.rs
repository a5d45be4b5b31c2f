//! Smart backups with hash tracking.
//!
//! A backup (`<save>.bak`) is taken the first time a save is modified. The
//! sidecar `<save>.bak.json` records the hash of the file when the backup was
//! made and the hash of our last write, so later edits of our own output do
//! not overwrite the pristine copy. A file whose hash matches neither was put
//! there by someone else (the game, a restore) and gets a fresh backup.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupMetadata {
    /// Hash of the save file when the backup was created
    pub original_hash: String,

    /// Hash of the save file after our last write
    pub last_edit_hash: String,
}

impl BackupMetadata {
    fn new(hash: String) -> Self {
        BackupMetadata {
            original_hash: hash.clone(),
            last_edit_hash: hash,
        }
    }
}

fn hash_file(path: &Path) -> Result<String> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(hex::encode(Sha256::digest(&data)))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Backup file and metadata sidecar for a save path
pub fn backup_paths(save_path: &Path) -> (PathBuf, PathBuf) {
    (
        with_suffix(save_path, ".bak"),
        with_suffix(save_path, ".bak.json"),
    )
}

fn read_metadata(metadata_path: &Path) -> Result<Option<BackupMetadata>> {
    if !metadata_path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(metadata_path)
        .with_context(|| format!("Failed to read {}", metadata_path.display()))?;
    let metadata = serde_json::from_str(&data).context("Invalid backup metadata")?;
    Ok(Some(metadata))
}

fn write_metadata(metadata_path: &Path, metadata: &BackupMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    fs::write(metadata_path, json)
        .with_context(|| format!("Failed to write {}", metadata_path.display()))
}

fn should_create_backup(save_path: &Path, backup_path: &Path, metadata_path: &Path) -> Result<bool> {
    if !backup_path.exists() {
        return Ok(true);
    }

    // A backup without metadata is not ours to overwrite
    let Some(metadata) = read_metadata(metadata_path)? else {
        return Ok(false);
    };

    let current = hash_file(save_path)?;
    Ok(current != metadata.original_hash && current != metadata.last_edit_hash)
}

/// Back up `save_path` if it is not a file we produced. Returns true when a
/// new backup was written.
pub fn smart_backup(save_path: &Path) -> Result<bool> {
    let (backup_path, metadata_path) = backup_paths(save_path);

    if !should_create_backup(save_path, &backup_path, &metadata_path)? {
        log::debug!("keeping existing backup {}", backup_path.display());
        return Ok(false);
    }

    fs::copy(save_path, &backup_path)
        .with_context(|| format!("Failed to create backup {}", backup_path.display()))?;
    write_metadata(&metadata_path, &BackupMetadata::new(hash_file(save_path)?))?;
    log::info!("backed up {} to {}", save_path.display(), backup_path.display());
    Ok(true)
}

/// Record the hash of a file we just wrote
pub fn update_after_edit(save_path: &Path) -> Result<()> {
    let (_, metadata_path) = backup_paths(save_path);
    let current = hash_file(save_path)?;

    let mut metadata =
        read_metadata(&metadata_path)?.unwrap_or_else(|| BackupMetadata::new(current.clone()));
    metadata.last_edit_hash = current;
    write_metadata(&metadata_path, &metadata)
}
