//! `$`-placeholder expansion.
//!
//! Templates use the PEP 292 syntax with a broadened identifier:
//!
//! - `$name` and `${name}` where `name` matches `[_a-zA-Z][_a-zA-Z0-9.]*`;
//!   dots select attributes (`$user.name`)
//! - `$$` is a literal `$`
//! - a `$` not followed by one of the above is kept as-is
//!
//! Substitution is safe: a placeholder that does not resolve is copied to the
//! output unchanged. Note that a trailing period is part of the identifier, so
//! `"Hi $name."` looks up the path `name.` and stays literal; write `${name}.`.
//!
//! The only malformed input is a `${` that is not closed by `identifier}`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{I18nError, Result};
use crate::scope::Substitutions;

/// Placeholder grammar; alternatives are tried left to right.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_a-zA-Z][_a-zA-Z0-9.]*)|\{(?P<braced>[_a-zA-Z][_a-zA-Z0-9.]*)\}|(?P<invalid>))",
    )
    .expect("placeholder pattern is a valid regex")
});

/// What: Expand `template`, surfacing malformed placeholders as errors.
///
/// Inputs:
/// - `template`: Template text
/// - `substitutions`: Flattened substitution source
///
/// Output:
/// - The expanded text
///
/// # Errors
/// - [`I18nError::MalformedTemplate`] for a `${` with no matching `identifier}`.
pub fn try_expand(template: &str, substitutions: &Substitutions) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&template[last..whole.start()]);
        last = whole.end();

        if caps.name("escaped").is_some() {
            out.push('$');
        } else if let Some(path) = caps.name("named").or_else(|| caps.name("braced")) {
            match substitutions.render(path.as_str()) {
                Some(text) => out.push_str(&text),
                None => out.push_str(whole.as_str()),
            }
        } else if template[whole.end()..].starts_with('{') {
            return Err(I18nError::MalformedTemplate {
                template: template.to_string(),
                offset: whole.start(),
            });
        } else {
            out.push('$');
        }
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// What: Expand `template`, degrading to `None` when it is malformed.
///
/// Inputs:
/// - `template`: Template text
/// - `substitutions`: Flattened substitution source
///
/// Output:
/// - `Some(expanded)`, or `None` after logging when the template is broken
#[must_use]
pub fn expand(template: &str, substitutions: &Substitutions) -> Option<String> {
    match try_expand(template, substitutions) {
        Ok(expanded) => Some(expanded),
        Err(err) => {
            tracing::error!(error = %err, "broken template");
            None
        }
    }
}
