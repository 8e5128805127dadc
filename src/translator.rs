//! A translation context bound to one catalog.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, NullCatalog};
use crate::error::{I18nError, Result};
use crate::scope::{Scope, Vars};
use crate::template;
use crate::text::dedent;

/// Charset assumed when a catalog declares none.
pub const DEFAULT_CHARSET: &str = "us-ascii";

/// How [`Translator::translate`] reacts to a malformed template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateErrors {
    /// Log the failure and return an empty string.
    #[default]
    Degrade,
    /// Log the failure and return the unexpanded catalog template.
    Surface,
}

/// Looks strings up in a catalog and interpolates the caller's scope.
///
/// Cloning is cheap; the catalog is shared.
#[derive(Clone)]
pub struct Translator {
    catalog: Arc<dyn Catalog>,
    dedent: bool,
    template_errors: TemplateErrors,
}

impl fmt::Debug for Translator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("entries", &self.catalog.len())
            .field("charset", &self.charset())
            .field("dedent", &self.dedent)
            .field("template_errors", &self.template_errors)
            .finish()
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Arc::new(NullCatalog))
    }
}

impl Translator {
    /// Create a translator with dedenting on and degrading template errors.
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self {
            catalog,
            dedent: true,
            template_errors: TemplateErrors::default(),
        }
    }

    /// Enable or disable dedenting of results.
    #[must_use]
    pub const fn with_dedent(mut self, dedent: bool) -> Self {
        self.dedent = dedent;
        self
    }

    /// Choose the malformed-template policy.
    #[must_use]
    pub const fn with_template_errors(mut self, policy: TemplateErrors) -> Self {
        self.template_errors = policy;
        self
    }

    /// Whether results are dedented.
    #[must_use]
    pub const fn dedent(&self) -> bool {
        self.dedent
    }

    /// The malformed-template policy.
    #[must_use]
    pub const fn template_errors(&self) -> TemplateErrors {
        self.template_errors
    }

    /// The underlying catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<dyn Catalog> {
        &self.catalog
    }

    /// Declared catalog charset, or [`DEFAULT_CHARSET`].
    #[must_use]
    pub fn charset(&self) -> &str {
        self.catalog.charset().unwrap_or(DEFAULT_CHARSET)
    }

    /// What: Translate `original` and interpolate `scope` and `extras` into it.
    ///
    /// Inputs:
    /// - `original`: Source-language msgid
    /// - `scope`: Caller bindings (`inner` over `outer`)
    /// - `extras`: Optional overrides, highest precedence
    ///
    /// Output:
    /// - The translated, expanded and (optionally) dedented string
    ///
    /// # Panics
    /// - If `original` is non-empty but consists only of whitespace.
    ///
    /// Details:
    /// - `""` translates to `""` without touching the catalog.
    /// - A malformed template is logged and handled per [`TemplateErrors`].
    #[must_use]
    pub fn translate(&self, original: &str, scope: &Scope, extras: Option<&Vars>) -> String {
        if original.is_empty() {
            return String::new();
        }
        assert!(
            !original.trim().is_empty(),
            "cannot translate blank key {original:?}"
        );
        let catalog_template = self.catalog.gettext(original);
        let substitutions = scope.substitutions(extras);
        match template::expand(&catalog_template, &substitutions) {
            Some(expanded) => self.finish(expanded),
            None => match self.template_errors {
                TemplateErrors::Degrade => String::new(),
                TemplateErrors::Surface => self.finish(catalog_template.into_owned()),
            },
        }
    }

    /// What: Strict form of [`Translator::translate`].
    ///
    /// Inputs:
    /// - Same as [`Translator::translate`]
    ///
    /// Output:
    /// - The translated string
    ///
    /// # Errors
    /// - [`I18nError::EmptyKey`] for a whitespace-only `original`
    /// - [`I18nError::MalformedTemplate`] when the catalog template is broken,
    ///   regardless of the configured [`TemplateErrors`] policy
    pub fn try_translate(
        &self,
        original: &str,
        scope: &Scope,
        extras: Option<&Vars>,
    ) -> Result<String> {
        if original.is_empty() {
            return Ok(String::new());
        }
        if original.trim().is_empty() {
            return Err(I18nError::EmptyKey(original.to_string()));
        }
        let catalog_template = self.catalog.gettext(original);
        let expanded = template::try_expand(&catalog_template, &scope.substitutions(extras))?;
        Ok(self.finish(expanded))
    }

    fn finish(&self, expanded: String) -> String {
        if self.dedent {
            dedent(&expanded)
        } else {
            expanded
        }
    }
}
