//! Translation lookup with fallback.
//!
//! Resolution order for `(locale, key, default)`:
//!
//! 1. the key in the requested locale
//! 2. the caller's default
//! 3. the key in the canonical locale
//! 4. the key itself
//!
//! Empty strings count as absent at every step. Keys may name a namespace
//! as `ns:key`; unqualified keys use the default namespace.

use serde_json::{Map, Value};

use super::CatalogStore;
use super::catalog::unflatten;

/// Which step of the fallback chain produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Locale,
    Default,
    Canonical,
    Key,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub value: String,
    pub source: Source,
}

/// Resolves keys for one locale against a loaded [`CatalogStore`].
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    store: &'a CatalogStore,
    locale: &'a str,
}

impl<'a> Translator<'a> {
    pub fn new(store: &'a CatalogStore, locale: &'a str) -> Self {
        Self { store, locale }
    }

    /// Translate `key` with no caller default.
    #[cfg(test)]
    pub fn t(&self, key: &str) -> String {
        self.resolve(key, None).value
    }

    pub fn resolve(&self, key: &str, default: Option<&str>) -> Resolution {
        let (namespace, bare) = self.split_key(key);

        let hit = |locale: &str| {
            self.store
                .catalog(locale, namespace)
                .and_then(|c| c.get(bare))
                .map(str::to_owned)
        };

        if let Some(value) = hit(self.locale) {
            return Resolution {
                value,
                source: Source::Locale,
            };
        }
        if let Some(default) = default.filter(|d| !d.is_empty()) {
            return Resolution {
                value: default.to_string(),
                source: Source::Default,
            };
        }
        if let Some(value) = hit(self.store.default_locale()) {
            return Resolution {
                value,
                source: Source::Canonical,
            };
        }
        Resolution {
            value: key.to_string(),
            source: Source::Key,
        }
    }

    /// `ns:key` → `(ns, key)` when `ns` is a known namespace.
    fn split_key<'k>(&self, key: &'k str) -> (&'k str, &'k str)
    where
        'a: 'k,
    {
        if let Some((ns, bare)) = key.split_once(':')
            && self.store.namespaces().iter().any(|n| n == ns)
        {
            return (ns, bare);
        }
        (self.store.default_namespace(), key)
    }

    /// Every key resolved for this locale, nested per namespace.
    ///
    /// Covers the canonical keys plus keys that exist only in this locale.
    pub fn dictionary(&self) -> Value {
        let mut out = Map::new();
        for ns in self.store.namespaces() {
            let mut keys: Vec<&str> = Vec::new();
            if let Some(canonical) = self.store.canonical(ns) {
                keys.extend(canonical.keys());
            }
            if let Some(own) = self.store.catalog(self.locale, ns) {
                let canonical = self.store.canonical(ns);
                keys.extend(own.keys().filter(|k| canonical.is_none_or(|c| !c.contains(k))));
            }

            let resolved: Vec<(String, String)> = keys
                .into_iter()
                .map(|k| (k.to_string(), self.resolve(&format!("{ns}:{k}"), None).value))
                .collect();
            out.insert(
                ns.clone(),
                unflatten(resolved.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
            );
        }
        Value::Object(out)
    }
}

/// Replace `{{name}}` (inner whitespace allowed) with values from `args`.
///
/// Unknown placeholders are left untouched.
pub fn interpolate(text: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = after[..end].trim();
        match args.iter().find(|(k, _)| *k == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::I18nConfig;
    use crate::i18n::Catalog;
    use serde_json::json;

    fn store() -> CatalogStore {
        let config = I18nConfig {
            namespaces: vec!["common".into(), "blog".into()],
            ..Default::default()
        };
        CatalogStore::from_catalogs(
            &config,
            [
                (
                    "en".to_string(),
                    "common".to_string(),
                    Catalog::from_json(&json!({
                        "nav": {"library": "Library", "blog": "Blog"},
                        "footer": {"privacyPolicy": "Privacy Policy"},
                        "greeting": "Hello, {{name}}!"
                    })),
                ),
                (
                    "vi".to_string(),
                    "common".to_string(),
                    Catalog::from_json(&json!({
                        "nav": {"library": "Thư viện", "blog": ""},
                        "viOnly": "Chỉ tiếng Việt"
                    })),
                ),
                (
                    "en".to_string(),
                    "blog".to_string(),
                    Catalog::from_json(&json!({"readMore": "Read more"})),
                ),
            ],
        )
    }

    #[test]
    fn test_exact_match() {
        let store = store();
        let r = Translator::new(&store, "vi").resolve("nav.library", None);
        assert_eq!(r.value, "Thư viện");
        assert_eq!(r.source, Source::Locale);
    }

    #[test]
    fn test_missing_key_falls_back_to_canonical() {
        let store = store();
        let r = Translator::new(&store, "vi").resolve("footer.privacyPolicy", None);
        assert_eq!(r.value, "Privacy Policy");
        assert_eq!(r.source, Source::Canonical);
    }

    #[test]
    fn test_empty_string_is_absent() {
        let store = store();
        assert_eq!(Translator::new(&store, "vi").t("nav.blog"), "Blog");
    }

    #[test]
    fn test_caller_default_before_canonical() {
        let store = store();
        let vi = Translator::new(&store, "vi");
        let t_or = |key: &str, default: &str| vi.resolve(key, Some(default)).value;
        assert_eq!(t_or("footer.privacyPolicy", "Chính sách"), "Chính sách");
        // Locale hit still wins over the default.
        assert_eq!(t_or("nav.library", "ignored"), "Thư viện");
        // Empty default is skipped.
        assert_eq!(t_or("footer.privacyPolicy", ""), "Privacy Policy");
    }

    #[test]
    fn test_unknown_key_returns_key() {
        let store = store();
        let r = Translator::new(&store, "vi").resolve("nope.missing", None);
        assert_eq!(r.value, "nope.missing");
        assert_eq!(r.source, Source::Key);
    }

    #[test]
    fn test_namespaced_keys() {
        let store = store();
        let vi = Translator::new(&store, "vi");
        assert_eq!(vi.t("blog:readMore"), "Read more");
        // Unknown namespace prefix is part of the key.
        assert_eq!(vi.t("other:thing"), "other:thing");
    }

    #[test]
    fn test_interpolation() {
        let store = store();
        let en = Translator::new(&store, "en");
        assert_eq!(interpolate(&en.t("greeting"), &[("name", "Vu")]), "Hello, Vu!");
        assert_eq!(interpolate("{{ a }}-{{b}}-{{c", &[("a", "1")]), "1-{{b}}-{{c");
    }

    #[test]
    fn test_canonical_keys_resolve_non_empty_in_every_locale() {
        let store = store();
        for locale in store.locales() {
            let t = Translator::new(&store, locale);
            for ns in store.namespaces() {
                for key in store.canonical(ns).unwrap().keys() {
                    assert!(!t.t(&format!("{ns}:{key}")).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_dictionary() {
        let store = store();
        let dict = Translator::new(&store, "vi").dictionary();
        assert_eq!(dict["common"]["nav"]["library"], "Thư viện");
        assert_eq!(dict["common"]["nav"]["blog"], "Blog");
        assert_eq!(dict["common"]["footer"]["privacyPolicy"], "Privacy Policy");
        assert_eq!(dict["common"]["viOnly"], "Chỉ tiếng Việt");
        assert_eq!(dict["blog"]["readMore"], "Read more");
    }
}
