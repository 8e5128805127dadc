//! Name-to-application registry.
//!
//! The registry is an ordinary value owned by the embedding program; create one
//! at startup and hand out the `Arc<Application>` handles it returns.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::Application;
use crate::config::I18nConfig;
use crate::strategy::{CatalogProvider, DirectoryStrategy, SimpleStrategy};

/// Applications keyed by name.
#[derive(Debug, Default)]
pub struct Registry {
    applications: HashMap<String, Arc<Application>>,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Register a catalog provider and create its application.
    ///
    /// Inputs:
    /// - `provider`: Lookup strategy; its name becomes the registry key
    ///
    /// Output:
    /// - Handle to the new application
    ///
    /// Details:
    /// - A previous application under the same name is replaced. Handles to it
    ///   that are still held elsewhere keep working but are no longer reachable
    ///   through the registry.
    pub fn register(&mut self, provider: impl CatalogProvider + 'static) -> Arc<Application> {
        self.register_shared(Arc::new(provider))
    }

    /// Like [`Registry::register`], for a provider that is already shared.
    pub fn register_shared(&mut self, provider: Arc<dyn CatalogProvider>) -> Arc<Application> {
        let name = provider.name().to_string();
        let application = Arc::new(Application::new(provider));
        if self
            .applications
            .insert(name.clone(), application.clone())
            .is_some()
        {
            tracing::debug!(app = %name, "replaced registered application");
        } else {
            tracing::debug!(app = %name, "registered application");
        }
        application
    }

    /// Register a [`SimpleStrategy`] for `domain` (catalogs under `$LOCPATH`).
    pub fn initialize(&mut self, domain: &str) -> Arc<Application> {
        self.register(SimpleStrategy::new(domain))
    }

    /// What: Register an application described by a configuration file.
    ///
    /// Inputs:
    /// - `config`: Loaded configuration
    ///
    /// Output:
    /// - Handle to the new application, with settings and default language applied
    ///
    /// Details:
    /// - `messages_dir` selects a [`DirectoryStrategy`]; otherwise a
    ///   [`SimpleStrategy`] reads `$LOCPATH`.
    pub fn register_config(&mut self, config: &I18nConfig) -> Arc<Application> {
        let application = match &config.messages_dir {
            Some(dir) => self.register(DirectoryStrategy::new(&config.domain, dir)),
            None => self.initialize(&config.domain),
        };
        application.set_dedent(config.dedent);
        application.set_template_errors(config.template_errors);
        // Rebuild the default translator so it picks up the settings above.
        match &config.default_language {
            Some(language) => application.set_default(language),
            None => application.clear_default(),
        }
        application
    }

    /// The application registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<Application>> {
        self.applications.get(name).cloned()
    }

    /// Registered application names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.applications.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered applications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.applications.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }
}
