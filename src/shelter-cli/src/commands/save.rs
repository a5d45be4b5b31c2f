//! Save file command handlers

use anyhow::{Context, Result};
use shelter::{NameLookup, Session};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::backup;
use crate::cli::EditArgs;
use crate::config::Config;
use crate::file_io;

/// Read a save from disk into a session. Returns whether it was encrypted.
pub fn open(input: &Path, lookup: Option<Box<dyn NameLookup>>) -> Result<(Session, bool)> {
    let data = file_io::read_input(Some(input))?;
    let encrypted = file_io::is_encrypted(input, &data);

    let mut session = match lookup {
        Some(lookup) => Session::new().with_lookup(lookup),
        None => Session::new(),
    };
    session
        .load_document(&data, encrypted)
        .with_context(|| format!("Failed to load {}", input.display()))?;
    Ok((session, encrypted))
}

/// Load an id -> display name catalog from a JSON object file
pub fn load_names(path: &Path) -> Result<Box<dyn NameLookup>> {
    let data = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let names: BTreeMap<String, String> =
        serde_json::from_slice(&data).context("Name catalog must be a JSON object of strings")?;
    log::debug!("loaded {} item names from {}", names.len(), path.display());
    Ok(Box::new(names))
}

/// Serialize the session document in the form it was read
fn render(session: &Session, encrypted: bool, pretty: bool) -> Result<Vec<u8>> {
    if !encrypted && pretty {
        let text = session.document()?.to_json_pretty()?;
        return Ok(text.into_bytes());
    }
    Ok(session.export_document(encrypted)?)
}

/// Common pattern for write operations: backup -> load -> modify -> export -> write
pub fn with_session(
    args: &EditArgs,
    lookup: Option<Box<dyn NameLookup>>,
    modify: impl FnOnce(&mut Session) -> Result<()>,
) -> Result<()> {
    let config = Config::load()?;
    let backup = config.backup && !args.no_backup;

    let (mut session, encrypted) = open(&args.input, lookup)?;
    modify(&mut session)?;

    if backup {
        backup::smart_backup(&args.input).context("Failed to manage backup")?;
    }

    let output = render(&session, encrypted, config.pretty)?;
    file_io::write_output(Some(&args.input), &output)?;

    if backup {
        backup::update_after_edit(&args.input).context("Failed to update backup metadata")?;
    }

    Ok(())
}

/// Handle `decrypt` command
pub fn decrypt(input: &Path, output: Option<&Path>, pretty: bool) -> Result<()> {
    let pretty = pretty || Config::load()?.pretty;
    let (session, _) = open(input, None)?;
    let mut data = render(&session, false, pretty)?;
    if output.is_none() {
        data.push(b'\n');
    }
    file_io::write_output(output, &data)
}

/// Handle `encrypt` command
pub fn encrypt(json_input: Option<&Path>, sav_path: &Path) -> Result<()> {
    let data = file_io::read_input(json_input)?;
    let mut session = Session::new();
    session
        .load_document(&data, false)
        .context("Input is not valid JSON")?;
    let container = session.export_document(true)?;
    file_io::write_output(Some(sav_path), &container)
}

/// Handle `get` command
pub fn get(input: &Path, query: &str) -> Result<()> {
    let (session, _) = open(input, None)?;
    let value = session.document()?.get(query).context("Query failed")?;
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Handle `set` command
pub fn set(args: &EditArgs, path: &str, value: &str, raw: bool) -> Result<()> {
    with_session(args, None, |session| {
        let save = session.document_mut()?;
        if raw {
            eprintln!("Setting {} = {} (raw JSON)", path, value);
            save.set_raw(path, value).context("Failed to set raw value")?;
        } else {
            eprintln!("Setting {} = {}", path, value);
            save.set(path, shelter::SaveFile::parse_value(value))
                .context("Failed to set value")?;
        }
        Ok(())
    })
}

/// Handle `info` command
pub fn info(input: &Path) -> Result<()> {
    let (session, encrypted) = open(input, None)?;

    println!(
        "Vault: {}",
        session.vault_name()?.as_deref().unwrap_or("(unnamed)")
    );
    println!("Format: {}", if encrypted { "encrypted" } else { "json" });
    println!("Dwellers: {}", session.list_dwellers()?.len());
    println!();

    super::vault::print_resources(&session)?;
    println!();
    super::vault::print_consumables(&session)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{"vault":{"VaultName":"12"},"dwellers":{"dwellers":[]}}"#;

    #[test]
    fn test_open_detects_format() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("Vault1.json");
        fs::write(&json, DOC).unwrap();
        let (session, encrypted) = open(&json, None).unwrap();
        assert!(!encrypted);
        assert_eq!(session.vault_name().unwrap().as_deref(), Some("12"));

        let sav = dir.path().join("Vault1.sav");
        fs::write(&sav, shelter::encrypt_sav(DOC)).unwrap();
        let (session, encrypted) = open(&sav, None).unwrap();
        assert!(encrypted);
        assert_eq!(session.vault_name().unwrap().as_deref(), Some("12"));
    }

    #[test]
    fn test_encrypt_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("in.json");
        let sav = dir.path().join("out.sav");
        fs::write(&json, DOC).unwrap();

        encrypt(Some(&json), &sav).unwrap();
        let (session, encrypted) = open(&sav, None).unwrap();
        assert!(encrypted);
        assert!(session.list_dwellers().unwrap().is_empty());
    }

    #[test]
    fn test_render_keeps_format() {
        let mut session = Session::new();
        session.load_document(DOC.as_bytes(), false).unwrap();

        let plain = render(&session, false, false).unwrap();
        assert_eq!(plain, DOC.as_bytes());

        let pretty = render(&session, false, true).unwrap();
        assert!(pretty.contains(&b'\n'));

        let container = render(&session, true, true).unwrap();
        assert_eq!(shelter::decrypt_sav(&container).unwrap(), DOC);
    }

    #[test]
    fn test_load_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.json");
        fs::write(&path, r#"{"dogmeat_l":"Dogmeat"}"#).unwrap();

        let names = load_names(&path).unwrap();
        assert_eq!(names.display_name("dogmeat_l").as_deref(), Some("Dogmeat"));
        assert_eq!(names.display_name("other"), None);
    }
}
