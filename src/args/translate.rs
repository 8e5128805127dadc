//! The `translate` subcommand.

use stacked_i18n::{I18nConfig, I18nError, Registry, Result, Scope, Vars};

use crate::args::definition::TranslateArgs;

/// What: Collect `--var` and `--json-var` bindings into caller variables.
///
/// Details:
/// - JSON bindings are added last and win over a string binding of the same name.
pub fn collect_vars(args: &TranslateArgs) -> Vars {
    let mut vars: Vars = args
        .vars
        .iter()
        .map(|(name, value)| (name.clone(), serde_json::Value::from(value.as_str())))
        .collect();
    for (name, value) in &args.json_vars {
        vars.insert(name.clone(), value.clone());
    }
    vars
}

/// What: Translate one msgid and return the text to print.
///
/// Inputs:
/// - `config`: Effective configuration
/// - `args`: Subcommand arguments
///
/// Output:
/// - The translated string
///
/// # Errors
/// - [`I18nError::EmptyKey`] for a whitespace-only msgid
/// - [`I18nError::MalformedTemplate`] with `--strict` when the template is broken
pub fn render_translation(config: &I18nConfig, args: &TranslateArgs) -> Result<String> {
    if !args.msgid.is_empty() && args.msgid.trim().is_empty() {
        return Err(I18nError::EmptyKey(args.msgid.clone()));
    }
    let mut config = config.clone();
    if args.no_dedent {
        config.dedent = false;
    }
    let mut registry = Registry::new();
    let application = registry.register_config(&config);
    let scope = Scope::from(collect_vars(args));

    let translate = |app: &stacked_i18n::Application| {
        if args.strict {
            app.try_translate(&args.msgid, &scope, None)
        } else {
            Ok(app.translate(&args.msgid, &scope, None))
        }
    };
    match &args.language {
        Some(language) => application.with_language(language, translate),
        None => translate(application.as_ref()),
    }
}

/// Run `translate` and print the result on stdout.
///
/// # Errors
/// - See [`render_translation`].
pub fn handle_translate(config: &I18nConfig, args: &TranslateArgs) -> Result<()> {
    let translated = render_translation(config, args)?;
    tracing::debug!(msgid = %args.msgid, "translated");
    println!("{translated}");
    Ok(())
}
