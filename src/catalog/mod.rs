//! Message catalogs.
//!
//! A catalog maps original (source-language) strings to their translation for
//! one language. Lookups never fail: a msgid the catalog does not know comes
//! back unchanged, which is also the whole behavior of [`NullCatalog`].

mod mo;

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub use mo::{parse_mo, read_mo_file};

#[cfg(test)]
pub(crate) use mo::MoBuilder;

/// Read-only translation lookup for a single language.
pub trait Catalog: Send + Sync + fmt::Debug {
    /// Translation of `msgid`, or `msgid` itself when there is none.
    fn gettext<'a>(&'a self, msgid: &'a str) -> Cow<'a, str>;

    /// Character set declared by the catalog, if any.
    fn charset(&self) -> Option<&str>;

    /// Translated entries, sorted by msgid.
    fn entries(&self) -> Vec<(&str, &str)>;

    /// Number of translated entries.
    fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether the catalog translates nothing.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Identity catalog used whenever no real catalog is available.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullCatalog;

impl Catalog for NullCatalog {
    fn gettext<'a>(&'a self, msgid: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(msgid)
    }

    fn charset(&self) -> Option<&str> {
        None
    }

    fn entries(&self) -> Vec<(&str, &str)> {
        Vec::new()
    }

    fn len(&self) -> usize {
        0
    }
}

/// In-memory catalog, either built by hand or decoded from an MO file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
    metadata: BTreeMap<String, String>,
    charset: Option<String>,
}

impl MessageCatalog {
    /// Create an empty catalog with no declared charset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from `(msgid, msgstr)` pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut catalog = Self::new();
        for (msgid, msgstr) in pairs {
            catalog.insert(msgid, msgstr);
        }
        catalog
    }

    /// Add or replace a translation.
    pub fn insert(&mut self, msgid: impl Into<String>, msgstr: impl Into<String>) {
        self.messages.insert(msgid.into(), msgstr.into());
    }

    /// Translation stored for `msgid`, if any.
    #[must_use]
    pub fn get(&self, msgid: &str) -> Option<&str> {
        self.messages
            .get(msgid)
            .map(String::as_str)
            .filter(|msgstr| !msgstr.is_empty())
    }

    /// Declare the catalog's character set.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// A header field such as `Language` or `Content-Type`.
    #[must_use]
    pub fn metadata(&self, field: &str) -> Option<&str> {
        self.metadata.get(field).map(String::as_str)
    }

    /// What: Populate metadata and charset from a gettext header entry.
    ///
    /// Inputs:
    /// - `header`: The msgstr of the empty msgid, `Field: value` per line
    ///
    /// Details:
    /// - Lines without a colon are ignored.
    /// - `charset=` is taken from the `Content-Type` field.
    pub fn apply_header(&mut self, header: &str) {
        for line in header.lines() {
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            self.metadata
                .insert(field.trim().to_string(), value.trim().to_string());
        }
        if let Some(charset) = self.metadata("Content-Type").and_then(charset_param) {
            self.charset = Some(charset.to_string());
        }
    }
}

impl Catalog for MessageCatalog {
    fn gettext<'a>(&'a self, msgid: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(self.get(msgid).unwrap_or(msgid))
    }

    fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .messages
            .iter()
            .filter(|(_, msgstr)| !msgstr.is_empty())
            .map(|(msgid, msgstr)| (msgid.as_str(), msgstr.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    fn len(&self) -> usize {
        self.messages
            .values()
            .filter(|msgstr| !msgstr.is_empty())
            .count()
    }
}

/// Extract the `charset=` parameter of a `Content-Type` value.
fn charset_param(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .filter_map(|param| param.trim().split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
}
