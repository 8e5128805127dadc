//! The `catalog` subcommand.

use std::fmt::Write as _;
use std::sync::Arc;

use stacked_i18n::catalog::read_mo_file;
use stacked_i18n::translator::DEFAULT_CHARSET;
use stacked_i18n::{Catalog, I18nConfig, Registry, Result};

use crate::args::definition::CatalogArgs;

/// What: Resolve the catalog selected by the arguments.
///
/// Output:
/// - `(label, catalog)`, where the label names the file or language
///
/// # Errors
/// - Returns `Err` only for `--file`, when the file cannot be read or parsed.
///
/// Details:
/// - Language lookups never fail; a missing catalog lists as empty.
pub fn resolve_catalog(
    config: &I18nConfig,
    args: &CatalogArgs,
) -> Result<(String, Arc<dyn Catalog>)> {
    if let Some(path) = &args.file {
        let catalog: Arc<dyn Catalog> = Arc::new(read_mo_file(path)?);
        return Ok((path.display().to_string(), catalog));
    }
    let mut registry = Registry::new();
    let application = registry.register_config(config);
    Ok(match &args.language {
        Some(language) => (language.clone(), application.get(language)),
        None => (
            application
                .default()
                .unwrap_or_else(|| "(no language)".to_string()),
            application.current().catalog().clone(),
        ),
    })
}

/// What: Format a catalog listing.
///
/// Output:
/// - A header block followed by one `msgid = msgstr` line per entry, sorted by msgid
pub fn format_listing(domain: &str, label: &str, catalog: &dyn Catalog) -> String {
    let mut entries = catalog.entries();
    entries.sort_unstable();
    let mut out = String::new();
    let _ = writeln!(out, "domain:   {domain}");
    let _ = writeln!(out, "source:   {label}");
    let _ = writeln!(out, "charset:  {}", catalog.charset().unwrap_or(DEFAULT_CHARSET));
    let _ = writeln!(out, "entries:  {}", entries.len());
    for (msgid, msgstr) in entries {
        let _ = writeln!(out, "{msgid:?} = {msgstr:?}");
    }
    out
}

/// Run `catalog` and print the listing on stdout.
///
/// # Errors
/// - See [`resolve_catalog`].
pub fn handle_catalog(config: &I18nConfig, args: &CatalogArgs) -> Result<()> {
    let (label, catalog) = resolve_catalog(config, args)?;
    print!("{}", format_listing(&config.domain, &label, catalog.as_ref()));
    Ok(())
}
