//! GNU MO binary catalog reader.
//!
//! Layout (all integers are `u32` in the file's byte order):
//!
//! | offset | field                          |
//! |--------|--------------------------------|
//! | 0      | magic `0x950412de`             |
//! | 4      | revision                       |
//! | 8      | number of strings `N`          |
//! | 12     | offset of original table       |
//! | 16     | offset of translation table    |
//!
//! Each table holds `N` `(length, offset)` pairs pointing at NUL-terminated
//! strings. The entry with an empty msgid is the header.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use super::{Catalog, MessageCatalog};
use crate::error::{I18nError, Result};

/// Magic number as read in the file's native byte order.
const MO_MAGIC: u32 = 0x9504_12de;
/// Size of the fixed header we need to read.
const HEADER_LEN: usize = 20;

/// What: Read and decode an MO file.
///
/// Inputs:
/// - `path`: Path to a `.mo` file
///
/// Output:
/// - The decoded catalog
///
/// # Errors
/// - [`I18nError::Io`] when the file cannot be read
/// - [`I18nError::InvalidCatalog`] when its contents are not a valid MO catalog
pub fn read_mo_file(path: &Path) -> Result<MessageCatalog> {
    let bytes = fs::read(path).map_err(|source| I18nError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_mo(&bytes, path)
}

/// Byte order detected from the magic number.
#[derive(Debug, Clone, Copy)]
enum ByteOrder {
    /// Little endian.
    Little,
    /// Big endian.
    Big,
}

/// Bounds-checked view over the raw file.
struct Reader<'a> {
    /// File contents.
    bytes: &'a [u8],
    /// Detected byte order.
    order: ByteOrder,
    /// File name for error messages.
    path: &'a Path,
}

impl<'a> Reader<'a> {
    fn corrupt(&self, reason: impl Into<String>) -> I18nError {
        I18nError::InvalidCatalog {
            path: self.path.to_path_buf(),
            reason: reason.into(),
        }
    }

    fn u32_at(&self, offset: usize) -> Result<u32> {
        let raw: [u8; 4] = offset
            .checked_add(4)
            .and_then(|end| self.bytes.get(offset..end))
            .and_then(|slice| slice.try_into().ok())
            .ok_or_else(|| self.corrupt(format!("truncated at byte {offset}")))?;
        Ok(match self.order {
            ByteOrder::Little => u32::from_le_bytes(raw),
            ByteOrder::Big => u32::from_be_bytes(raw),
        })
    }

    /// The string described by the `(length, offset)` pair at `entry`.
    fn string_at(&self, entry: usize) -> Result<&'a [u8]> {
        let len = self.u32_at(entry)? as usize;
        let start = self.u32_at(entry + 4)? as usize;
        start
            .checked_add(len)
            .and_then(|end| self.bytes.get(start..end))
            .ok_or_else(|| self.corrupt(format!("string at {start}+{len} is out of range")))
    }
}

/// What: Decode MO bytes into a [`MessageCatalog`].
///
/// Inputs:
/// - `bytes`: Raw file contents
/// - `path`: Source path, only used in error messages
///
/// Output:
/// - The decoded catalog, with metadata and charset from the header entry
///
/// # Errors
/// - [`I18nError::InvalidCatalog`] for a bad magic number, an unsupported
///   major revision, or tables and strings that point outside the file.
///
/// Details:
/// - Strings are decoded with the header's charset through `encoding_rs`;
///   a missing or unknown charset falls back to lossy UTF-8.
/// - Plural entries are stored under their singular msgid with the first form.
/// - Context-qualified msgids (`ctxt\x04msgid`) are kept verbatim.
pub fn parse_mo(bytes: &[u8], path: &Path) -> Result<MessageCatalog> {
    let magic = bytes
        .get(..4)
        .and_then(|slice| <[u8; 4]>::try_from(slice).ok())
        .ok_or_else(|| I18nError::InvalidCatalog {
            path: path.to_path_buf(),
            reason: "file is too short".to_string(),
        })?;
    let order = if u32::from_le_bytes(magic) == MO_MAGIC {
        ByteOrder::Little
    } else if u32::from_be_bytes(magic) == MO_MAGIC {
        ByteOrder::Big
    } else {
        return Err(I18nError::InvalidCatalog {
            path: path.to_path_buf(),
            reason: "bad magic number".to_string(),
        });
    };
    let reader = Reader { bytes, order, path };
    if bytes.len() < HEADER_LEN {
        return Err(reader.corrupt("header is truncated"));
    }

    let revision = reader.u32_at(4)?;
    if !matches!(revision >> 16, 0 | 1) {
        return Err(reader.corrupt(format!("unsupported revision {}", revision >> 16)));
    }
    let count = reader.u32_at(8)? as usize;
    let originals = reader.u32_at(12)? as usize;
    let translations = reader.u32_at(16)? as usize;

    let mut raw = Vec::with_capacity(count.min(bytes.len() / 16));
    for index in 0..count {
        let msgid = reader.string_at(originals + index * 8)?;
        let msgstr = reader.string_at(translations + index * 8)?;
        raw.push((msgid, msgstr));
    }

    let mut catalog = MessageCatalog::new();
    let header = raw
        .iter()
        .find(|(msgid, _)| msgid.is_empty())
        .map(|(_, msgstr)| *msgstr);
    if let Some(header) = header {
        catalog.apply_header(&String::from_utf8_lossy(header));
    }
    let encoding = resolve_encoding(catalog.charset(), path);
    // The charset is only known after a first pass; decode the header properly now.
    if let Some(header) = header
        && encoding != UTF_8
    {
        catalog.apply_header(&decode(encoding, header));
    }

    for (msgid, msgstr) in raw {
        if msgid.is_empty() {
            continue;
        }
        let msgid = first_form(msgid);
        let msgstr = first_form(msgstr);
        catalog.insert(decode(encoding, msgid), decode(encoding, msgstr));
    }
    tracing::debug!(
        path = %path.display(),
        entries = catalog.messages.len(),
        charset = encoding.name(),
        "decoded MO catalog"
    );
    Ok(catalog)
}

/// Map a declared charset to an encoding, defaulting to UTF-8.
fn resolve_encoding(charset: Option<&str>, path: &Path) -> &'static Encoding {
    let Some(label) = charset else {
        return UTF_8;
    };
    Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
        tracing::warn!(
            path = %path.display(),
            charset = label,
            "unknown catalog charset, decoding as UTF-8"
        );
        UTF_8
    })
}

/// Plural entries separate their forms with NUL; keep the first.
fn first_form(bytes: &[u8]) -> &[u8] {
    bytes.split(|b| *b == 0).next().unwrap_or(bytes)
}

fn decode(encoding: &'static Encoding, bytes: &[u8]) -> String {
    let (text, had_errors): (Cow<'_, str>, bool) = encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "replaced undecodable catalog bytes");
    }
    text.into_owned()
}

/// Little-endian MO image writer used by the tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MoBuilder {
    entries: Vec<(Vec<u8>, Vec<u8>)>,
}

#[cfg(test)]
impl MoBuilder {
    pub(crate) fn entry(mut self, msgid: impl AsRef<[u8]>, msgstr: impl AsRef<[u8]>) -> Self {
        self.entries
            .push((msgid.as_ref().to_vec(), msgstr.as_ref().to_vec()));
        self
    }

    pub(crate) fn build(mut self) -> Vec<u8> {
        self.entries.sort_unstable();
        let count = u32::try_from(self.entries.len()).expect("test catalog fits in u32");
        let originals = 28u32;
        let translations = originals + count * 8;
        let mut data_offset = translations + count * 8;

        let mut tables = Vec::new();
        let mut data = Vec::new();
        let strings = self
            .entries
            .iter()
            .map(|(msgid, _)| msgid)
            .chain(self.entries.iter().map(|(_, msgstr)| msgstr));
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    const UTF8_HEADER: &str = "Language: fr\nContent-Type: text/plain; charset=utf-8\n";

    fn path() -> &'static Path {
        Path::new("test.mo")
    }

    #[test]
    fn parses_entries_and_header() {
        let bytes = MoBuilder::default()
            .entry("", UTF8_HEADER)
            .entry("English", "Anglais")
            .entry("French", "Français")
            .build();
        let catalog = parse_mo(&bytes, path()).expect("valid catalog");

        assert_eq!(catalog.gettext("English"), "Anglais");
        assert_eq!(catalog.gettext("French"), "Français");
        assert_eq!(catalog.charset(), Some("utf-8"));
        assert_eq!(catalog.metadata("Language"), Some("fr"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    /// What: Latin-1 catalogs are decoded with the declared charset.
    fn decodes_declared_charset() {
        let bytes = MoBuilder::default()
            .entry("", "Content-Type: text/plain; charset=ISO-8859-1\n")
            .entry("French", b"Fran\xe7ais")
            .build();
        let catalog = parse_mo(&bytes, path()).expect("valid catalog");
        assert_eq!(catalog.gettext("French"), "Français");
    }

    #[test]
    /// What: Header metadata is decoded with the charset the header declares.
    fn decodes_latin1_header_metadata() {
        let bytes = MoBuilder::default()
            .entry(
                "",
                b"Last-Translator: Ren\xe9e Dupr\xe9\nContent-Type: text/plain; charset=ISO-8859-1\n",
            )
            .entry("French", b"Fran\xe7ais")
            .build();
        let catalog = parse_mo(&bytes, path()).expect("valid catalog");
        assert_eq!(catalog.metadata("Last-Translator"), Some("Renée Dupré"));
        assert_eq!(catalog.charset(), Some("ISO-8859-1"));
    }

    #[test]
    fn reads_big_endian_files() {
        let little = MoBuilder::default().entry("English", "Anglais").build();
        // 7 header words plus one (length, offset) pair in each table.
        let mut bytes: Vec<u8> = little[..44]
            .chunks(4)
            .flat_map(|word| word.iter().rev().copied())
            .collect();
        bytes.extend_from_slice(&little[44..]);

        let catalog = parse_mo(&bytes, path()).expect("valid catalog");
        assert_eq!(catalog.gettext("English"), "Anglais");
    }

    #[test]
    fn plural_entries_keep_first_form() {
        let bytes = MoBuilder::default()
            .entry("file\0files", "fichier\0fichiers")
            .build();
        let catalog = parse_mo(&bytes, path()).expect("valid catalog");
        assert_eq!(catalog.gettext("file"), "fichier");
    }

    #[test]
    fn rejects_bad_magic_and_truncation() {
        assert!(matches!(
            parse_mo(b"nope, not a catalog", path()),
            Err(I18nError::InvalidCatalog { .. })
        ));
        assert!(parse_mo(b"\xde", path()).is_err());

        let mut bytes = MoBuilder::default().entry("English", "Anglais").build();
        bytes.truncate(bytes.len() - 4);
        assert!(matches!(
            parse_mo(&bytes, path()),
            Err(I18nError::InvalidCatalog { .. })
        ));
    }

    #[test]
    fn rejects_unknown_major_revision() {
        let mut bytes = MoBuilder::default().build();
        bytes[4..8].copy_from_slice(&(2u32 << 16).to_le_bytes());
        let err = parse_mo(&bytes, path()).expect_err("revision 2 is unsupported");
        assert!(err.to_string().contains("unsupported revision"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp directory for test");
        let result = read_mo_file(&dir.path().join("absent.mo"));
        assert!(matches!(result, Err(I18nError::Io { .. })));
    }
}
