//! Integration tests for the language-context stack seen through the public API.

use std::sync::Arc;
use std::thread;

use stacked_i18n::{MemoryStrategy, MessageCatalog, Registry, Scope, Vars, vars};

fn registry_with_test_app() -> (Registry, Arc<MemoryStrategy>) {
    let strategy = Arc::new(
        MemoryStrategy::new("test")
            .with_catalog(
                "fr",
                MessageCatalog::from_pairs([
                    ("A test message", "Un message de test"),
                    ("$who says hi", "$who dit bonjour"),
                ]),
            )
            .with_catalog(
                "de",
                MessageCatalog::from_pairs([("A test message", "Eine Testnachricht")]),
            ),
    );
    let mut registry = Registry::new();
    registry.register_shared(strategy.clone());
    (registry, strategy)
}

#[test]
/// What: Push/pop walks the stack and the default translator shows through.
///
/// - Input: `fr` default, pushes of `de` and `fr`
/// - Output: Each state translates with the top of the stack
fn push_pop_and_default() {
    let (registry, _) = registry_with_test_app();
    let app = registry.get("test").expect("application was registered");
    let scope = Scope::new();

    app.set_default("fr");
    assert_eq!(app.translate("A test message", &scope, None), "Un message de test");
    app.push("de");
    app.push("fr");
    assert_eq!(app.code().as_deref(), Some("fr"));
    assert_eq!(app.pop().as_deref(), Some("fr"));
    assert_eq!(
        app.translate("A test message", &scope, None),
        "Eine Testnachricht"
    );
    assert_eq!(app.pop().as_deref(), Some("de"));
    assert_eq!(app.pop(), None);
    assert_eq!(app.code(), None);
    assert_eq!(app.effective_code().as_deref(), Some("fr"));

    app.clear_default();
    assert_eq!(app.translate("A test message", &scope, None), "A test message");
}

#[test]
fn catalogs_are_fetched_once_per_language() {
    let (registry, strategy) = registry_with_test_app();
    let app = registry.get("test").expect("application was registered");
    let baseline = strategy.lookups();

    for _ in 0..3 {
        let _fr = app.using("fr");
        let _de = app.using("de");
    }
    let _ = app.translator("fr");
    assert_eq!(strategy.lookups(), baseline + 2);
}

#[test]
/// What: Extras win over the scope and are only used for that call.
fn extras_override_scope_for_one_call() {
    let (registry, _) = registry_with_test_app();
    let app = registry.get("test").expect("application was registered");
    let who = "Ann";
    let scope = Scope::from(vars!(who));
    let extras = Vars::new().with("who", "Bob");

    let _fr = app.using("fr");
    assert_eq!(app.translate("$who says hi", &scope, Some(&extras)), "Bob dit bonjour");
    assert_eq!(app.translate("$who says hi", &scope, None), "Ann dit bonjour");
}

#[test]
/// What: Explicit translators can be moved to other threads.
///
/// - Input: Translators for `fr` and `de` built on the main thread
/// - Output: Worker threads translate independently of the shared stack
fn translators_work_across_threads() {
    let (registry, _) = registry_with_test_app();
    let app = registry.get("test").expect("application was registered");

    let handles: Vec<_> = ["fr", "de"]
        .into_iter()
        .map(|language| {
            let translator = app.translator(language);
            thread::spawn(move || translator.translate("A test message", &Scope::new(), None))
        })
        .collect();
    let results: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().expect("worker thread panicked"))
        .collect();

    assert_eq!(results, vec!["Un message de test", "Eine Testnachricht"]);
    assert_eq!(app.depth(), 0);
}

#[test]
fn blank_keys_are_rejected() {
    let (registry, _) = registry_with_test_app();
    let app = registry.get("test").expect("application was registered");
    assert_eq!(app.translate("", &Scope::new(), None), "");
    assert!(app.try_translate(" \t", &Scope::new(), None).is_err());
    let panicked = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        app.translate(" ", &Scope::new(), None)
    }));
    assert!(panicked.is_err());
}
