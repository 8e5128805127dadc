//! Applications registered from YAML configuration files.

use std::fs;

use stacked_i18n::{I18nConfig, I18nError, Registry, Scope, TemplateErrors, vars};
use tempfile::TempDir;

use crate::common::write_catalog;

#[test]
/// What: A config file with a relative catalog root and a default language.
///
/// - Input: `config.yml` next to a `locale/` tree
/// - Output: The default language is active without any push
fn config_file_drives_registration() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    write_catalog(
        &temp_dir.path().join("locale"),
        "fr",
        "shop",
        &[(
            "\n    Your cart holds $count items\n    ",
            "\n    Votre panier contient $count articles\n    ",
        )],
    );
    let config_path = temp_dir.path().join("config.yml");
    fs::write(
        &config_path,
        "domain: shop\nmessages_dir: locale\ndefault_language: fr\n",
    )
    .expect("Failed to write test config");

    let config = I18nConfig::load(&config_path).expect("Failed to load test config");
    let mut registry = Registry::new();
    let app = registry.register_config(&config);

    let count = 2;
    let scope = Scope::from(vars!(count));
    assert_eq!(app.effective_code().as_deref(), Some("fr"));
    assert_eq!(
        app.translate("\n    Your cart holds $count items\n    ", &scope, None),
        "\nVotre panier contient 2 articles\n"
    );
    assert_eq!(registry.names(), vec!["shop"]);
}

#[test]
/// What: `dedent: false` and `template_errors: surface` reach the translators.
fn config_settings_reach_translators() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory for test");
    let config = I18nConfig::from_yaml(
        "domain: shop\ndedent: false\ntemplate_errors: surface\n",
        &temp_dir.path().join("inline.yml"),
    )
    .expect("valid config");
    let config = I18nConfig {
        messages_dir: Some(temp_dir.path().to_path_buf()),
        ..config
    };
    let mut registry = Registry::new();
    let app = registry.register_config(&config);

    assert_eq!(app.translate("  kept", &Scope::new(), None), "  kept");
    assert_eq!(app.translate("bad ${", &Scope::new(), None), "bad ${");
    assert!(matches!(
        app.try_translate("bad ${", &Scope::new(), None),
        Err(I18nError::MalformedTemplate { offset: 4, .. })
    ));
    assert_eq!(app.current().template_errors(), TemplateErrors::Surface);
}
