//! All locale catalogs of a run.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::{Catalog, I18nError};
use crate::config::I18nConfig;

/// Catalogs keyed by `(locale, namespace)`, loaded once and then read-only.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    dir: PathBuf,
    default_locale: String,
    locales: Vec<String>,
    namespaces: Vec<String>,
    catalogs: FxHashMap<(String, String), Catalog>,
    /// Non-canonical catalog files that do not exist.
    missing: Vec<PathBuf>,
}

impl CatalogStore {
    /// Load every `<dir>/<locale>/<namespace>.json`.
    ///
    /// A missing canonical catalog aborts. A missing catalog for another
    /// locale is recorded and that locale falls back to canonical values.
    pub fn load(config: &I18nConfig) -> Result<Self, I18nError> {
        let pairs: Vec<_> = config
            .locales
            .iter()
            .flat_map(|l| config.namespaces.iter().map(move |ns| (l.clone(), ns.clone())))
            .collect();

        let loaded: Vec<_> = pairs
            .into_par_iter()
            .map(|(locale, ns)| {
                let path = catalog_path(&config.dir, &locale, &ns);
                let result = if path.is_file() {
                    Catalog::load(&path).map(Some)
                } else {
                    Ok(None)
                };
                (locale, ns, path, result)
            })
            .collect();

        let mut store = Self::empty(config);
        for (locale, ns, path, result) in loaded {
            match result? {
                Some(catalog) => {
                    crate::debug!("i18n"; "loaded {} ({} keys)", path.display(), catalog.len());
                    store.catalogs.insert((locale, ns), catalog);
                }
                None if locale == config.default_locale => {
                    return Err(I18nError::MissingCanonical(path));
                }
                None => store.missing.push(path),
            }
        }

        Ok(store)
    }

    fn empty(config: &I18nConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            default_locale: config.default_locale.clone(),
            locales: config.locales.clone(),
            namespaces: config.namespaces.clone(),
            catalogs: FxHashMap::default(),
            missing: Vec::new(),
        }
    }

    /// Build a store from in-memory catalogs.
    #[cfg(test)]
    pub fn from_catalogs(
        config: &I18nConfig,
        catalogs: impl IntoIterator<Item = (String, String, Catalog)>,
    ) -> Self {
        let mut store = Self::empty(config);
        for (locale, ns, catalog) in catalogs {
            store.catalogs.insert((locale, ns), catalog);
        }
        store
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn default_namespace(&self) -> &str {
        self.namespaces.first().map_or("common", String::as_str)
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }

    pub fn catalog(&self, locale: &str, namespace: &str) -> Option<&Catalog> {
        self.catalogs
            .get(&(locale.to_string(), namespace.to_string()))
    }

    /// The default locale's catalog, the key superset.
    pub fn canonical(&self, namespace: &str) -> Option<&Catalog> {
        self.catalog(&self.default_locale, namespace)
    }

    pub fn missing_files(&self) -> &[PathBuf] {
        &self.missing
    }

    pub fn path_of(&self, locale: &str, namespace: &str) -> PathBuf {
        catalog_path(&self.dir, locale, namespace)
    }
}

/// `<dir>/<locale>/<namespace>.json`
pub fn catalog_path(dir: &Path, locale: &str, namespace: &str) -> PathBuf {
    dir.join(locale).join(format!("{namespace}.json"))
}
