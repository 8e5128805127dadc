//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stacked_i18n::{I18nConfig, Result, find_config_file};

use crate::args::utils::{parse_json_var, parse_var};
use crate::args::{catalog, translate};

/// Config file name looked up in the user's config directories.
const CONFIG_FILE_NAME: &str = "config.yml";

/// stacked-i18n - translate strings through gettext catalogs
#[derive(Parser, Debug)]
#[command(name = "stacked-i18n")]
#[command(version)]
#[command(about = "Translate strings through gettext catalogs with $-placeholder interpolation", long_about = None)]
pub struct Args {
    /// YAML config file (default: ~/.config/stacked-i18n/config.yml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Application (gettext domain) name, overrides the config file
    #[arg(long, global = true)]
    pub domain: Option<String>,

    /// Catalog root containing <lang>/LC_MESSAGES/<domain>.mo
    #[arg(long, global = true)]
    pub messages_dir: Option<PathBuf>,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a msgid and interpolate variables into it
    Translate(TranslateArgs),
    /// List the entries of a catalog
    Catalog(CatalogArgs),
}

/// Arguments of `translate`.
#[derive(clap::Args, Debug)]
pub struct TranslateArgs {
    /// Source-language string to translate
    pub msgid: String,

    /// Language to translate into (default: the configured default language)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Bind a string variable (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, String)>,

    /// Bind a JSON value, e.g. --json-var 'user={"name":"Ann"}' for $user.name
    #[arg(long = "json-var", value_name = "NAME=JSON", value_parser = parse_json_var)]
    pub json_vars: Vec<(String, serde_json::Value)>,

    /// Keep the translated text's indentation
    #[arg(long)]
    pub no_dedent: bool,

    /// Fail on malformed templates instead of printing an empty line
    #[arg(long)]
    pub strict: bool,
}

/// Arguments of `catalog`.
#[derive(clap::Args, Debug)]
pub struct CatalogArgs {
    /// Language whose catalog to list (default: the configured default language)
    #[arg(short, long, conflicts_with = "file")]
    pub language: Option<String>,

    /// Read this .mo file directly instead of resolving a language
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// What: Resolve the effective configuration from file and flags.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// Output:
/// - The configuration to register the application with.
///
/// # Errors
/// - Returns `Err` when an explicit or discovered config file cannot be loaded.
///
/// Details:
/// - `--config` wins over the discovered file; without either the defaults apply.
/// - `--domain` and `--messages-dir` override the file's values.
pub fn load_config(args: &Args) -> Result<I18nConfig> {
    let path = args
        .config
        .clone()
        .or_else(|| find_config_file(CONFIG_FILE_NAME));
    let mut config = match path {
        Some(path) => I18nConfig::load(&path)?,
        None => I18nConfig::default(),
    };
    if let Some(domain) = &args.domain {
        config.domain.clone_from(domain);
    }
    if let Some(dir) = &args.messages_dir {
        config.messages_dir = Some(dir.clone());
    }
    Ok(config)
}

/// What: Run the selected subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments.
///
/// # Errors
/// - Propagates configuration, catalog and strict translation errors.
pub fn process_args(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    match &args.command {
        Command::Translate(translate_args) => translate::handle_translate(&config, translate_args),
        Command::Catalog(catalog_args) => catalog::handle_catalog(&config, catalog_args),
    }
}
