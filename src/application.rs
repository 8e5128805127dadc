//! Per-application catalog cache and language-context stack.
//!
//! # Invariants
//!
//! 1. **Current translator**: the top of the stack, or the default translator
//!    when the stack is empty.
//! 2. **Memoized catalogs**: a language code is resolved through the provider
//!    at most once per `Application`.
//! 3. **Balanced scopes**: [`Application::using`] pops exactly what it pushed,
//!    on every exit path including unwinding.
//!
//! `Application` is `Send + Sync` so it can be shared behind an `Arc`, but the
//! stack is a single shared "current language". Code running on several
//! threads should prefer [`Application::translator`] and pass the returned
//! [`Translator`] along explicitly.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::catalog::Catalog;
use crate::error::Result;
use crate::scope::{Scope, Vars};
use crate::strategy::CatalogProvider;
use crate::translator::{TemplateErrors, Translator};

/// Mutable translation context.
struct ContextState {
    /// Pushed `(language code, translator)` pairs, last is current.
    stack: Vec<(String, Translator)>,
    /// Default language code, `None` when the null catalog is the default.
    default_language: Option<String>,
    /// Translator used while the stack is empty.
    default_translator: Translator,
    /// Passed to every translator built from now on.
    dedent: bool,
    /// Passed to every translator built from now on.
    template_errors: TemplateErrors,
}

impl ContextState {
    fn translator(&self, catalog: Arc<dyn Catalog>) -> Translator {
        Translator::new(catalog)
            .with_dedent(self.dedent)
            .with_template_errors(self.template_errors)
    }
}

/// All catalogs and translation state of one application.
pub struct Application {
    provider: Arc<dyn CatalogProvider>,
    catalogs: Mutex<HashMap<String, Arc<dyn Catalog>>>,
    state: Mutex<ContextState>,
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("Application")
            .field("name", &self.name())
            .field("stack", &state.stack.iter().map(|(code, _)| code).collect::<Vec<_>>())
            .field("default", &state.default_language)
            .finish_non_exhaustive()
    }
}

impl Application {
    /// What: Create an application around a catalog provider.
    ///
    /// Inputs:
    /// - `provider`: Strategy used to fetch catalogs
    ///
    /// Output:
    /// - An application with an empty stack and the provider's catalog for
    ///   "no language" (normally the identity catalog) as default
    #[must_use]
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        let default_translator = Translator::new(provider.lookup(None));
        Self {
            provider,
            catalogs: Mutex::new(HashMap::new()),
            state: Mutex::new(ContextState {
                stack: Vec::new(),
                default_language: None,
                default_translator,
                dedent: true,
                template_errors: TemplateErrors::default(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ContextState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The application name, as reported by its provider.
    #[must_use]
    pub fn name(&self) -> &str {
        self.provider.name()
    }

    /// Whether translators created from now on dedent their output.
    pub fn set_dedent(&self, dedent: bool) {
        self.state().dedent = dedent;
    }

    /// Template error policy for translators created from now on.
    pub fn set_template_errors(&self, policy: TemplateErrors) {
        self.state().template_errors = policy;
    }

    /// What: Catalog for `language`, fetched once and memoized.
    ///
    /// Inputs:
    /// - `language`: Language code
    ///
    /// Output:
    /// - The cached or freshly fetched catalog
    #[must_use]
    pub fn get(&self, language: &str) -> Arc<dyn Catalog> {
        let mut catalogs = self.catalogs.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(catalog) = catalogs.get(language) {
            return catalog.clone();
        }
        tracing::debug!(app = self.name(), language, "fetching catalog");
        let catalog = self.provider.lookup(Some(language));
        catalogs.insert(language.to_string(), catalog.clone());
        catalog
    }

    /// What: A translator for `language` that does not touch the stack.
    ///
    /// Output:
    /// - Translator using the application's current dedent/template settings
    ///
    /// Details:
    /// - Preferred over push/pop when the active language can be passed along
    ///   explicitly, e.g. across threads.
    #[must_use]
    pub fn translator(&self, language: &str) -> Translator {
        let catalog = self.get(language);
        self.state().translator(catalog)
    }

    /// Make `language` the current translation context.
    pub fn push(&self, language: &str) {
        let catalog = self.get(language);
        let mut state = self.state();
        let translator = state.translator(catalog);
        state.stack.push((language.to_string(), translator));
        tracing::debug!(app = self.name(), language, depth = state.stack.len(), "pushed language");
    }

    /// What: Drop the current translation context.
    ///
    /// Output:
    /// - The language code that was popped, `None` on an empty stack
    ///
    /// Details:
    /// - Under-runs are not errors; the default translator simply stays current.
    #[must_use = "returns the popped language code"]
    pub fn pop(&self) -> Option<String> {
        let popped = self.state().stack.pop().map(|(code, _)| code);
        if popped.is_none() {
            tracing::debug!(app = self.name(), "pop on empty language stack");
        }
        popped
    }

    /// Number of pushed contexts.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.state().stack.len()
    }

    /// The translator currently in effect.
    #[must_use]
    pub fn current(&self) -> Translator {
        let state = self.state();
        state
            .stack
            .last()
            .map_or_else(|| state.default_translator.clone(), |(_, t)| t.clone())
    }

    /// Language code on top of the stack, `None` when the stack is empty.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        self.state().stack.last().map(|(code, _)| code.clone())
    }

    /// Language code in effect: the stack top, else the default language.
    #[must_use]
    pub fn effective_code(&self) -> Option<String> {
        let state = self.state();
        state
            .stack
            .last()
            .map(|(code, _)| code.clone())
            .or_else(|| state.default_language.clone())
    }

    /// The default language code, if one is set.
    #[must_use]
    pub fn default(&self) -> Option<String> {
        self.state().default_language.clone()
    }

    /// What: Install `language` as the default context.
    ///
    /// Details:
    /// - The catalog is fetched immediately, not on first use.
    pub fn set_default(&self, language: &str) {
        let catalog = self.get(language);
        let mut state = self.state();
        state.default_translator = state.translator(catalog);
        state.default_language = Some(language.to_string());
        tracing::debug!(app = self.name(), language, "default language set");
    }

    /// Reinstall the provider's "no language" catalog as the default.
    pub fn clear_default(&self) {
        let catalog = self.provider.lookup(None);
        let mut state = self.state();
        state.default_translator = state.translator(catalog);
        state.default_language = None;
    }

    /// Translate with the current translator; see [`Translator::translate`].
    #[must_use]
    pub fn translate(&self, original: &str, scope: &Scope, extras: Option<&Vars>) -> String {
        self.current().translate(original, scope, extras)
    }

    /// Strict translation with the current translator.
    ///
    /// # Errors
    /// - See [`Translator::try_translate`].
    pub fn try_translate(
        &self,
        original: &str,
        scope: &Scope,
        extras: Option<&Vars>,
    ) -> Result<String> {
        self.current().try_translate(original, scope, extras)
    }

    /// What: Push `language` for as long as the returned guard lives.
    ///
    /// Output:
    /// - A guard that pops on drop and derefs to the application
    ///
    /// Details:
    /// - Guards nest; dropping them in reverse order restores each previous code.
    pub fn using(&self, language: &str) -> Using<'_> {
        self.push(language);
        Using { application: self }
    }

    /// What: Run `f` with `language` pushed.
    ///
    /// Output:
    /// - Whatever `f` returns; errors and panics pass through after the pop
    pub fn with_language<R>(&self, language: &str, f: impl FnOnce(&Self) -> R) -> R {
        let _scoped = self.using(language);
        f(self)
    }
}

/// Scoped language context created by [`Application::using`].
#[must_use = "the language is popped as soon as the guard is dropped"]
pub struct Using<'a> {
    application: &'a Application,
}

impl Deref for Using<'_> {
    type Target = Application;

    fn deref(&self) -> &Application {
        self.application
    }
}

impl Drop for Using<'_> {
    fn drop(&mut self) {
        let _ = self.application.pop();
    }
}
