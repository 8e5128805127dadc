//! Gettext catalogs with a push/pop language stack and `$`-placeholder interpolation.
//!
//! # Overview
//!
//! - **Catalogs** ([`catalog`]): identity and in-memory catalogs plus a GNU MO reader
//! - **Strategies** ([`strategy`]): turn `(application, language)` into a catalog,
//!   falling back to the identity catalog
//! - **Templates** ([`template`]): PEP 292 `$name` / `${name}` expansion with dotted
//!   attribute paths and safe substitution
//! - **Scopes** ([`scope`]): the variables a call site offers to its template
//! - **Translator** ([`translator`]): catalog lookup + expansion + dedent
//! - **Application** ([`application`]): catalog cache and language-context stack
//! - **Registry** ([`registry`]): applications by name
//!
//! # Usage
//!
//! ```
//! use stacked_i18n::{MemoryStrategy, MessageCatalog, Registry, Scope, vars};
//!
//! let mut registry = Registry::new();
//! let app = registry.register(
//!     MemoryStrategy::new("demo")
//!         .with_catalog("fr", MessageCatalog::from_pairs([("Hello $name", "Bonjour $name")])),
//! );
//!
//! let name = "Ann";
//! let scope = Scope::from(vars!(name));
//! {
//!     let _fr = app.using("fr");
//!     assert_eq!(app.translate("Hello $name", &scope, None), "Bonjour Ann");
//! }
//! assert_eq!(app.translate("Hello $name", &scope, None), "Hello Ann");
//! ```
//!
//! # Error Handling
//!
//! - Missing catalogs fall back to the source strings and are logged
//! - Unresolved placeholders stay in the output verbatim
//! - Malformed templates are logged and degrade per [`TemplateErrors`]; the
//!   `try_*` methods surface them as [`I18nError::MalformedTemplate`]

pub mod application;
pub mod catalog;
pub mod config;
pub mod error;
pub mod registry;
pub mod scope;
pub mod strategy;
pub mod template;
pub mod text;
pub mod translator;

pub use application::{Application, Using};
pub use catalog::{Catalog, MessageCatalog, NullCatalog};
pub use config::{I18nConfig, find_config_file};
pub use error::{I18nError, Result};
pub use registry::Registry;
pub use scope::{Scope, Substitutions, Vars};
pub use strategy::{CatalogProvider, DirectoryStrategy, MemoryStrategy, SimpleStrategy};
pub use template::{expand, try_expand};
pub use translator::{TemplateErrors, Translator};
