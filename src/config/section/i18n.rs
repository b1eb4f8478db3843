//! `[i18n]` configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Supported locales and where their catalogs live.
///
/// The default locale doubles as the canonical catalog: its keys are the
/// superset every other locale is checked against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Default and canonical locale.
    pub default_locale: String,

    /// All supported locales, default included.
    pub locales: Vec<String>,

    /// Catalog namespaces; the first one is the default namespace.
    pub namespaces: Vec<String>,

    /// Directory holding `<locale>/<namespace>.json`.
    pub dir: PathBuf,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".into(),
            locales: vec!["en".into(), "vi".into()],
            namespaces: vec!["common".into()],
            dir: "public/locales".into(),
        }
    }
}

impl I18nConfig {
    const DEFAULT_LOCALE: FieldPath = FieldPath::new("i18n.default_locale");
    const LOCALES: FieldPath = FieldPath::new("i18n.locales");
    const NAMESPACES: FieldPath = FieldPath::new("i18n.namespaces");

    /// Namespace used for unqualified keys.
    pub fn default_namespace(&self) -> &str {
        self.namespaces.first().map_or("common", String::as_str)
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.locales.is_empty() {
            diag.error(Self::LOCALES, "at least one locale is required");
        }

        for locale in &self.locales {
            if !is_locale_tag(locale) {
                diag.error_with_hint(
                    Self::LOCALES,
                    format!("'{locale}' is not a valid locale tag"),
                    "use tags like \"en\", \"vi\" or \"pt-BR\"",
                );
            }
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for locale in &self.locales {
            if !seen.insert(locale.as_str()) {
                diag.error(Self::LOCALES, format!("'{locale}' is listed twice"));
            }
        }

        if !self.is_supported(&self.default_locale) {
            diag.error_with_hint(
                Self::DEFAULT_LOCALE,
                format!("'{}' is not in {}", self.default_locale, Self::LOCALES),
                format!("add \"{}\" to {}", self.default_locale, Self::LOCALES),
            );
        }

        if self.namespaces.is_empty() {
            diag.error(Self::NAMESPACES, "at least one namespace is required");
        }
    }
}

/// `en`, `vi`, `pt-BR`: ASCII alphanumeric subtags joined by `-`.
fn is_locale_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()))
}
