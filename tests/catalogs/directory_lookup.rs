//! Catalog lookup through `DirectoryStrategy` and `SimpleStrategy`.

use std::sync::Arc;

use stacked_i18n::{
    DirectoryStrategy, Registry, Scope, SimpleStrategy, TemplateErrors, vars,
};
use tempfile::TempDir;

use crate::common::write_catalog;

/// Root with `fr` and `de` catalogs for the `test` domain.
fn catalog_root() -> TempDir {
    let root = TempDir::new().expect("Failed to create temp directory for test");
    write_catalog(
        root.path(),
        "fr",
        "test",
        &[
            ("A test message", "Un message de test"),
            ("Hello $name", "Bonjour $name"),
            ("You have $count messages", "Vous avez $count messages"),
            ("Broken", "Cass${"),
        ],
    );
    write_catalog(
        root.path(),
        "de",
        "test",
        &[("A test message", "Eine Testnachricht")],
    );
    root
}

#[test]
/// What: Nested language contexts resolve against the files on disk.
///
/// - Input: `fr` and `de` catalogs, nested `using` guards
/// - Output: Each scope translates with its own catalog and unwinds in order
fn nested_contexts_use_catalogs_from_disk() {
    let root = catalog_root();
    let mut registry = Registry::new();
    let app = registry.register(DirectoryStrategy::new("test", root.path()));
    let scope = Scope::new();

    assert_eq!(app.translate("A test message", &scope, None), "A test message");
    {
        let _fr = app.using("fr");
        assert_eq!(
            app.translate("A test message", &scope, None),
            "Un message de test"
        );
        {
            let _de = app.using("de");
            assert_eq!(
                app.translate("A test message", &scope, None),
                "Eine Testnachricht"
            );
            // Missing from the de catalog: identity, then expansion.
            let name = "Ann";
            assert_eq!(
                app.translate("Hello $name", &Scope::from(vars!(name)), None),
                "Hello Ann"
            );
        }
        assert_eq!(app.code().as_deref(), Some("fr"));
    }
    assert_eq!(app.depth(), 0);
}

#[test]
fn interpolation_uses_the_translated_template() {
    let root = catalog_root();
    let mut registry = Registry::new();
    let app = registry.register(DirectoryStrategy::new("test", root.path()));

    let count = 3;
    let name = "Ann";
    let scope = Scope::new().with_outer(vars!(count)).with_inner(vars!(name));
    let translated = app.with_language("fr", |app| {
        (
            app.translate("Hello $name", &scope, None),
            app.translate("You have $count messages", &scope, None),
        )
    });
    assert_eq!(
        translated,
        ("Bonjour Ann".to_string(), "Vous avez 3 messages".to_string())
    );
}

#[test]
fn unknown_languages_and_domains_fall_back_to_identity() {
    let root = catalog_root();
    let mut registry = Registry::new();
    let app = registry.register(DirectoryStrategy::new("test", root.path()));
    let other = registry.register(DirectoryStrategy::new("other", root.path()));

    app.push("xx");
    assert_eq!(app.translate("A test message", &Scope::new(), None), "A test message");
    other.push("fr");
    assert_eq!(
        other.translate("A test message", &Scope::new(), None),
        "A test message"
    );
    // Path traversal in a language code never reaches the filesystem.
    app.push("../fr");
    assert_eq!(app.translate("A test message", &Scope::new(), None), "A test message");
}

#[test]
fn broken_catalog_template_follows_policy() {
    let root = catalog_root();
    let mut registry = Registry::new();
    let app = registry.register(DirectoryStrategy::new("test", root.path()));
    app.push("fr");
    assert_eq!(app.translate("Broken", &Scope::new(), None), "");
    assert!(app.try_translate("Broken", &Scope::new(), None).is_err());

    app.set_template_errors(TemplateErrors::Surface);
    let translator = app.translator("fr");
    assert_eq!(translator.translate("Broken", &Scope::new(), None), "Cass${");
}

#[test]
fn simple_strategy_reads_the_given_root() {
    let root = catalog_root();
    let strategy = Arc::new(SimpleStrategy::from_dir("test", Some(root.path().to_path_buf())));
    let mut registry = Registry::new();
    let app = registry.register_shared(strategy.clone());

    assert_eq!(strategy.messages_dir(), Some(root.path()));
    let translator = app.translator("de");
    assert_eq!(translator.charset(), "UTF-8");
    assert_eq!(
        translator.translate("A test message", &Scope::new(), None),
        "Eine Testnachricht"
    );
}

#[test]
fn corrupt_file_degrades_to_identity() {
    let root = TempDir::new().expect("Failed to create temp directory for test");
    let dir = root.path().join("fr").join("LC_MESSAGES");
    std::fs::create_dir_all(&dir).expect("Failed to create catalog directory");
    std::fs::write(dir.join("test.mo"), b"not an mo file").expect("Failed to write test file");

    let mut registry = Registry::new();
    let app = registry.register(DirectoryStrategy::new("test", root.path()));
    let translator = app.translator("fr");
    assert!(translator.catalog().is_empty());
    assert_eq!(translator.translate("Anything", &Scope::new(), None), "Anything");
}
