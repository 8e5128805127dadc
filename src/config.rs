//! YAML configuration for an application's catalogs.
//!
//! ```yaml
//! domain: test
//! messages_dir: /usr/share/locale
//! default_language: fr
//! dedent: true
//! template_errors: degrade   # or "surface"
//! ```
//!
//! Every field is optional; see [`I18nConfig::default`].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{I18nError, Result};
use crate::translator::TemplateErrors;

/// Directory name used below the XDG config base.
const CONFIG_DIR_NAME: &str = "stacked-i18n";

/// Settings used to register an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Application name; also the catalog file stem (`<domain>.mo`).
    pub domain: String,
    /// Catalog root; `$LOCPATH` is used when absent.
    pub messages_dir: Option<PathBuf>,
    /// Language installed as default at registration time.
    pub default_language: Option<String>,
    /// Whether translated strings are dedented.
    pub dedent: bool,
    /// Malformed template policy.
    pub template_errors: TemplateErrors,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            domain: "messages".to_string(),
            messages_dir: None,
            default_language: None,
            dedent: true,
            template_errors: TemplateErrors::default(),
        }
    }
}

impl I18nConfig {
    /// What: Load configuration from a YAML file.
    ///
    /// Inputs:
    /// - `path`: Config file path
    ///
    /// Output:
    /// - The parsed configuration
    ///
    /// # Errors
    /// - [`I18nError::Io`] when the file cannot be read
    /// - [`I18nError::Config`] when it is not valid YAML for this schema
    ///
    /// Details:
    /// - A relative `messages_dir` is resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml(&contents, path)?;
        if let (Some(dir), Some(base)) = (config.messages_dir.as_ref(), path.parent())
            && dir.is_relative()
        {
            config.messages_dir = Some(base.join(dir));
        }
        tracing::debug!(path = %path.display(), domain = %config.domain, "loaded i18n config");
        Ok(config)
    }

    /// What: Parse configuration from YAML text.
    ///
    /// Inputs:
    /// - `yaml`: Document text; empty text yields the defaults
    /// - `origin`: Path reported in errors
    ///
    /// # Errors
    /// - [`I18nError::Config`] on invalid YAML or unknown fields
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_norway::from_str(yaml).map_err(|e| I18nError::Config {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// What: Find a config file in the user's configuration directories.
///
/// Inputs:
/// - `file_name`: File name such as `config.yml`
///
/// Output:
/// - The first existing candidate, or `None`
///
/// Details:
/// - Looks in `$XDG_CONFIG_HOME/stacked-i18n/` first, then `$HOME/.config/stacked-i18n/`.
#[must_use]
pub fn find_config_file(file_name: &str) -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME").ok();
    let home = env::var("HOME").ok();
    config_candidates(xdg_config.as_deref(), home.as_deref(), file_name)
        .into_iter()
        .find(|p| p.is_file())
}

/// Candidate config paths in priority order.
fn config_candidates(xdg_config: Option<&str>, home: Option<&str>, file_name: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(xdg) = xdg_config.filter(|x| !x.trim().is_empty()) {
        candidates.push(Path::new(xdg).join(CONFIG_DIR_NAME).join(file_name));
    }
    if let Some(h) = home {
        candidates.push(
            Path::new(h)
                .join(".config")
                .join(CONFIG_DIR_NAME)
                .join(file_name),
        );
    }
    candidates
}
