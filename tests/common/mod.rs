//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// GNU MO magic number.
const MO_MAGIC: u32 = 0x9504_12de;

/// What: Encode `(msgid, msgstr)` pairs as a little-endian MO file.
///
/// - Input: Raw entries; an empty msgid is the header
/// - Output: File bytes with sorted originals, as `msgfmt` writes them
pub fn mo_bytes(entries: &[(&[u8], &[u8])]) -> Vec<u8> {
    let mut entries = entries.to_vec();
    entries.sort_unstable();
    let count = u32::try_from(entries.len()).expect("test catalog fits in u32");
    let originals = 28u32;
    let translations = originals + count * 8;
    let mut data_offset = translations + count * 8;

    let mut tables = Vec::new();
    let mut data = Vec::new();
    let strings = entries
        .iter()
        .map(|(msgid, _)| *msgid)
        .chain(entries.iter().map(|(_, msgstr)| *msgstr));
    for string in strings {
        let len = u32::try_from(string.len()).expect("short test string");
        tables.extend_from_slice(&len.to_le_bytes());
        tables.extend_from_slice(&data_offset.to_le_bytes());
        data.extend_from_slice(string);
        data.push(0);
        data_offset += len + 1;
    }

    let mut out = Vec::new();
    for word in [MO_MAGIC, 0, count, originals, translations, 0, 0] {
        out.extend_from_slice(&word.to_le_bytes());
    }
    out.extend_from_slice(&tables);
    out.extend_from_slice(&data);
    out
}

/// What: Write a UTF-8 catalog to `<root>/<language>/LC_MESSAGES/<domain>.mo`.
///
/// - Input: Catalog root, language, domain, and text entries
/// - Output: Path of the written file
pub fn write_catalog(root: &Path, language: &str, domain: &str, entries: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(language).join("LC_MESSAGES");
    fs::create_dir_all(&dir).expect("Failed to create catalog directory");
    let header = format!("Language: {language}\nContent-Type: text/plain; charset=UTF-8\n");
    let mut raw: Vec<(&[u8], &[u8])> = vec![(b"".as_slice(), header.as_bytes())];
    raw.extend(entries.iter().map(|(k, v)| (k.as_bytes(), v.as_bytes())));
    let path = dir.join(format!("{domain}.mo"));
    fs::write(&path, mo_bytes(&raw)).expect("Failed to write test catalog");
    path
}
