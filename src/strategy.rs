//! Catalog lookup strategies.
//!
//! A strategy knows an application's name and how to turn a language code into
//! a catalog. Strategies never fail: whenever no usable catalog exists they hand
//! back a [`NullCatalog`] so untranslated source strings show through.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::catalog::{Catalog, MessageCatalog, NullCatalog, read_mo_file};

/// Environment variable naming the catalog directory for [`SimpleStrategy`].
pub const LOCPATH_ENV: &str = "LOCPATH";

/// Resolves language codes to catalogs for one application.
pub trait CatalogProvider: Send + Sync {
    /// The application (gettext domain) name.
    fn name(&self) -> &str;

    /// Catalog for `language`, or the identity catalog when there is none.
    fn lookup(&self, language: Option<&str>) -> Arc<dyn Catalog>;
}

/// What: Validate a language code before it is used to build a path.
///
/// Inputs:
/// - `code`: Language code such as `fr`, `pt_BR` or `sr@latin`
///
/// Output:
/// - `true` if the code is safe to use as a directory name
fn is_valid_language_code(code: &str) -> bool {
    if code.is_empty() || code.len() > 32 {
        return false;
    }
    let separator = |c: char| matches!(c, '-' | '_' | '@' | '.');
    code.chars().all(|c| c.is_ascii_alphanumeric() || separator(c))
        && !code.starts_with(separator)
        && !code.ends_with(separator)
        && !code.contains("..")
}

/// Reads `<dir>/<language>/LC_MESSAGES/<name>.mo`.
#[derive(Debug, Clone)]
pub struct DirectoryStrategy {
    name: String,
    messages_dir: Option<PathBuf>,
}

impl DirectoryStrategy {
    /// Create a strategy reading catalogs below `messages_dir`.
    #[must_use]
    pub fn new(name: impl Into<String>, messages_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            messages_dir: Some(messages_dir.into()),
        }
    }

    /// The catalog directory, if any.
    #[must_use]
    pub fn messages_dir(&self) -> Option<&Path> {
        self.messages_dir.as_deref()
    }

    /// What: Path of the catalog file for `language`.
    ///
    /// Inputs:
    /// - `language`: Language code
    ///
    /// Output:
    /// - `Some(path)` when a directory is configured and the code is valid
    #[must_use]
    pub fn catalog_path(&self, language: &str) -> Option<PathBuf> {
        let dir = self.messages_dir.as_ref()?;
        if !is_valid_language_code(language) {
            tracing::warn!(language, "rejecting malformed language code");
            return None;
        }
        Some(
            dir.join(language)
                .join("LC_MESSAGES")
                .join(format!("{}.mo", self.name)),
        )
    }
}

impl CatalogProvider for DirectoryStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, language: Option<&str>) -> Arc<dyn Catalog> {
        let Some(path) = language.and_then(|code| self.catalog_path(code)) else {
            return Arc::new(NullCatalog);
        };
        if !path.exists() {
            tracing::debug!(
                domain = %self.name,
                path = %path.display(),
                "no catalog file, falling back to source strings"
            );
            return Arc::new(NullCatalog);
        }
        match read_mo_file(&path) {
            Ok(catalog) => {
                tracing::debug!(
                    domain = %self.name,
                    language = language.unwrap_or_default(),
                    entries = catalog.len(),
                    "loaded catalog"
                );
                Arc::new(catalog)
            }
            Err(err) => {
                tracing::warn!(
                    domain = %self.name,
                    error = %err,
                    "unreadable catalog, falling back to source strings"
                );
                Arc::new(NullCatalog)
            }
        }
    }
}

/// Directory strategy configured from the `LOCPATH` environment variable.
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    inner: DirectoryStrategy,
}

impl SimpleStrategy {
    /// What: Create a strategy whose directory comes from `LOCPATH`.
    ///
    /// Inputs:
    /// - `name`: Application name
    ///
    /// Details:
    /// - Without `LOCPATH` every lookup yields the identity catalog.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_dir(name, env::var_os(LOCPATH_ENV).map(PathBuf::from))
    }

    /// Create a strategy with an explicit (possibly absent) directory.
    #[must_use]
    pub fn from_dir(name: impl Into<String>, messages_dir: Option<PathBuf>) -> Self {
        Self {
            inner: DirectoryStrategy {
                name: name.into(),
                messages_dir,
            },
        }
    }

    /// The catalog directory, if any.
    #[must_use]
    pub fn messages_dir(&self) -> Option<&Path> {
        self.inner.messages_dir()
    }
}

impl CatalogProvider for SimpleStrategy {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn lookup(&self, language: Option<&str>) -> Arc<dyn Catalog> {
        self.inner.lookup(language)
    }
}

/// Catalogs held in memory, keyed by language code.
#[derive(Debug, Default)]
pub struct MemoryStrategy {
    name: String,
    catalogs: HashMap<String, Arc<MessageCatalog>>,
    lookups: AtomicUsize,
}

impl MemoryStrategy {
    /// Create an empty in-memory strategy.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Register `catalog` for `language`.
    #[must_use]
    pub fn with_catalog(mut self, language: impl Into<String>, catalog: MessageCatalog) -> Self {
        self.catalogs.insert(language.into(), Arc::new(catalog));
        self
    }

    /// How many times [`CatalogProvider::lookup`] has been called.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl CatalogProvider for MemoryStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, language: Option<&str>) -> Arc<dyn Catalog> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        match language.and_then(|code| self.catalogs.get(code)) {
            Some(catalog) => catalog.clone(),
            None => Arc::new(NullCatalog),
        }
    }
}
