//! Key coverage of each locale against the canonical catalog.

use std::path::PathBuf;

use super::CatalogStore;

/// Coverage of one `(locale, namespace)` catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleCoverage {
    pub locale: String,
    pub namespace: String,
    /// Canonical keys this locale lacks.
    pub missing: Vec<String>,
    /// Keys present with an empty value.
    pub empty: Vec<String>,
    /// Keys the canonical catalog does not have.
    pub extra: Vec<String>,
    /// Set when the catalog file itself does not exist.
    pub missing_file: Option<PathBuf>,
    /// Number of canonical keys.
    pub total: usize,
}

impl LocaleCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing_file.is_none()
            && self.missing.is_empty()
            && self.empty.is_empty()
            && self.extra.is_empty()
    }

    /// Share of canonical keys with a non-empty translation, in percent.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        let untranslated = if self.missing_file.is_some() {
            self.total
        } else {
            self.missing.len() + self.empty.len()
        };
        (self.total - untranslated.min(self.total)) as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverageReport {
    pub catalogs: Vec<LocaleCoverage>,
}

impl CoverageReport {
    /// Missing catalog files are errors; everything else is a warning.
    pub fn has_errors(&self) -> bool {
        self.catalogs.iter().any(|c| c.missing_file.is_some())
    }

    pub fn warning_count(&self) -> usize {
        self.catalogs
            .iter()
            .map(|c| c.missing.len() + c.empty.len() + c.extra.len())
            .sum()
    }

    pub fn is_clean(&self) -> bool {
        self.catalogs.iter().all(LocaleCoverage::is_complete)
    }
}

/// Check every locale (the canonical one only for empty values).
pub fn check(store: &CatalogStore) -> CoverageReport {
    let mut catalogs = Vec::new();

    for ns in store.namespaces() {
        let canonical = store.canonical(ns);
        let total = canonical.map_or(0, |c| c.len());

        for locale in store.locales() {
            let mut coverage = LocaleCoverage {
                locale: locale.clone(),
                namespace: ns.clone(),
                total,
                ..Default::default()
            };

            let Some(catalog) = store.catalog(locale, ns) else {
                coverage.missing_file = Some(store.path_of(locale, ns));
                catalogs.push(coverage);
                continue;
            };

            coverage.empty = catalog
                .keys()
                .filter(|k| catalog.raw(k) == Some(""))
                .map(str::to_owned)
                .collect();

            if locale != store.default_locale()
                && let Some(canonical) = canonical
            {
                coverage.missing = canonical
                    .keys()
                    .filter(|k| !catalog.contains(k))
                    .map(str::to_owned)
                    .collect();
                coverage.extra = catalog
                    .keys()
                    .filter(|k| !canonical.contains(k))
                    .map(str::to_owned)
                    .collect();
            }

            catalogs.push(coverage);
        }
    }

    CoverageReport { catalogs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::I18nConfig;
    use crate::i18n::Catalog;
    use serde_json::json;

    fn store(vi: Option<serde_json::Value>) -> CatalogStore {
        let mut catalogs = vec![(
            "en".to_string(),
            "common".to_string(),
            Catalog::from_json(&json!({"a": "A", "b": "B", "c": "C"})),
        )];
        if let Some(vi) = vi {
            catalogs.push(("vi".into(), "common".into(), Catalog::from_json(&vi)));
        }
        CatalogStore::from_catalogs(&I18nConfig::default(), catalogs)
    }

    #[test]
    fn test_missing_empty_and_extra() {
        let report = check(&store(Some(json!({"a": "Á", "b": "", "z": "extra"}))));
        let vi = report.catalogs.iter().find(|c| c.locale == "vi").unwrap();

        assert_eq!(vi.missing, ["c"]);
        assert_eq!(vi.empty, ["b"]);
        assert_eq!(vi.extra, ["z"]);
        assert!((vi.percent() - 100.0 / 3.0).abs() < 1e-9);
        assert!(!report.has_errors());
        assert_eq!(report.warning_count(), 3);
    }

    #[test]
    fn test_canonical_is_complete() {
        let report = check(&store(Some(json!({"a": "Á", "b": "B", "c": "C"}))));
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_file_is_error_for_that_locale() {
        let report = check(&store(None));
        assert!(report.has_errors());
        let en = report.catalogs.iter().find(|c| c.locale == "en").unwrap();
        assert!(en.is_complete());
        let vi = report.catalogs.iter().find(|c| c.locale == "vi").unwrap();
        assert_eq!(vi.percent(), 0.0);
    }
}
