//! User preferences: locale and color theme.
//!
//! Stored in `<root>/.folio/preferences.json`. This is the only place
//! that reads or writes it; everything else receives a [`Preferences`]
//! value.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::I18nConfig;

const FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub locale: Option<String>,
    pub theme: Theme,
}

impl Preferences {
    pub fn path(state_dir: &Path) -> PathBuf {
        state_dir.join(FILE_NAME)
    }

    /// Load saved preferences; a missing file yields the defaults.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = Self::path(state_dir);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("invalid {}", path.display()))
    }

    pub fn save(&self, state_dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(state_dir)
            .with_context(|| format!("failed to create {}", state_dir.display()))?;
        let path = Self::path(state_dir);
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Locale to use: the saved one, then the environment language's
    /// primary subtag, then the default locale. Unsupported values are
    /// skipped.
    pub fn negotiate_locale(&self, i18n: &I18nConfig, env_lang: Option<&str>) -> String {
        self.locale
            .as_deref()
            .filter(|l| i18n.is_supported(l))
            .map(str::to_owned)
            .or_else(|| env_lang.and_then(primary_subtag).filter(|l| i18n.is_supported(l)))
            .unwrap_or_else(|| i18n.default_locale.clone())
    }
}

/// `vi_VN.UTF-8` → `vi`
fn primary_subtag(lang: &str) -> Option<String> {
    let primary = lang.split(['_', '-', '.', '@']).next()?.trim();
    (!primary.is_empty() && primary != "C" && primary != "POSIX")
        .then(|| primary.to_ascii_lowercase())
}

/// The `LANG` environment variable, if set.
pub fn env_lang() -> Option<String> {
    std::env::var("LANG").ok()
}
