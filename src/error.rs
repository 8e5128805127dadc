//! Error type shared by the library.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, I18nError>;

/// What: Failures surfaced by catalog loading, configuration and strict translation.
///
/// Details:
/// - Unresolved placeholders are never errors; they stay in the output verbatim.
/// - Catalog lookups through a `CatalogProvider` never fail; only the explicit
///   loaders (`read_mo_file`, `I18nConfig::load`) return these.
#[derive(Debug, Error)]
pub enum I18nError {
    /// A blank (whitespace-only) msgid was handed to the translator.
    #[error("cannot translate blank key {0:?}")]
    EmptyKey(String),
    /// A `${` opened at `offset` was never closed by `identifier}`.
    #[error("malformed template at byte {offset}: {template:?}")]
    MalformedTemplate {
        /// The offending template text.
        template: String,
        /// Byte offset of the `$` that starts the broken placeholder.
        offset: usize,
    },
    /// A binary catalog could not be decoded.
    #[error("invalid catalog {}: {reason}", path.display())]
    InvalidCatalog {
        /// File the catalog was read from.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },
    /// Reading a catalog or config file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A value bound into a scope could not be serialized.
    #[error("cannot bind {name:?}: {source}")]
    Serialize {
        /// Variable name the value was bound under.
        name: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The configuration file was unreadable as YAML.
    #[error("invalid configuration {}: {reason}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}
