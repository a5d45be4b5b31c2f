//! I/O helpers for consistent file/stdin/stdout handling

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read bytes from a file path or stdin if path is None
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) => fs::read(p).with_context(|| format!("Failed to read {}", p.display())),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Write bytes to a file path or stdout if path is None
pub fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(p) => fs::write(p, data).with_context(|| format!("Failed to write {}", p.display())),
        None => io::stdout()
            .write_all(data)
            .context("Failed to write to stdout"),
    }
}

/// Whether `data` read from `path` is an encrypted container rather than
/// plain JSON. A `.json` extension or a leading `{` means plain JSON.
pub fn is_encrypted(path: &Path, data: &[u8]) -> bool {
    let json_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if json_ext {
        return false;
    }
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_none_or(|&b| b != b'{')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_plain_json() {
        assert!(!is_encrypted(Path::new("Vault1.json"), b"anything"));
        assert!(!is_encrypted(Path::new("Vault1.sav"), b"  \n{\"vault\":{}}"));
    }

    #[test]
    fn test_detects_container() {
        assert!(is_encrypted(Path::new("Vault1.sav"), b"tIS6zSbzEbgsoMJ0e0Oq6w=="));
        assert!(is_encrypted(Path::new("Vault1"), b""));
    }

    #[test]
    fn test_write_then_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_output(Some(&path), b"{}").unwrap();
        assert_eq!(read_input(Some(&path)).unwrap(), b"{}");
    }
}
