//! A single locale catalog, flattened to dotted keys.
//!
//! ```text
//! {"nav": {"library": "Library"}}  ──►  nav.library = "Library"
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use super::I18nError;

/// Flattened `(key, value)` pairs of one `<locale>/<namespace>.json`.
///
/// Keys keep file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    keys: Vec<String>,
    values: FxHashMap<String, String>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, I18nError> {
        let value = read_json(path)?;
        if !value.is_object() {
            return Err(I18nError::NotAnObject(path.to_path_buf()));
        }
        Ok(Self::from_json(&value))
    }

    pub fn from_json(value: &Value) -> Self {
        Self::from_pairs(flatten(value))
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut catalog = Self::default();
        for (key, value) in pairs {
            if catalog.values.insert(key.clone(), value).is_none() {
                catalog.keys.push(key);
            }
        }
        catalog
    }

    /// Value for `key`; empty strings count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw(key).filter(|v| !v.is_empty())
    }

    /// Value for `key`, empty or not.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

pub(super) fn read_json(path: &Path) -> Result<Value, I18nError> {
    let text = std::fs::read_to_string(path).map_err(|err| I18nError::Io(path.to_path_buf(), err))?;
    serde_json::from_str(&text).map_err(|err| I18nError::Json(path.to_path_buf(), err))
}

/// Flatten nested objects into dotted keys.
///
/// Strings are kept, numbers and booleans stringified; arrays and nulls
/// are not translatable and are skipped.
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut out = Vec::new();
    if let Value::Object(map) = value {
        flatten_into(map, "", &mut out);
    }
    out
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, out: &mut Vec<(String, String)>) {
    for (k, v) in map {
        let key = if prefix.is_empty() {
            k.clone()
        } else {
            format!("{prefix}.{k}")
        };
        match v {
            Value::Object(inner) => flatten_into(inner, &key, out),
            Value::String(s) => out.push((key, s.clone())),
            Value::Number(n) => out.push((key, n.to_string())),
            Value::Bool(b) => out.push((key, b.to_string())),
            Value::Array(_) | Value::Null => {
                crate::debug!("i18n"; "skipping non-scalar value at `{}`", key);
            }
        }
    }
}

/// Rebuild a nested object from dotted keys.
///
/// A key that would descend through an existing string replaces it.
pub fn unflatten<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Value {
    let mut root = Map::new();
    for (key, value) in pairs {
        let mut parts = key.split('.').peekable();
        let mut current = &mut root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                current.insert(part.to_string(), Value::String(value.to_string()));
                break;
            }
            let slot = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            match slot {
                Value::Object(next) => current = next,
                _ => break,
            }
        }
    }
    Value::Object(root)
}

/// Merge `patch` into `base`, recursing into objects on both sides.
///
/// Keys only in `base` are preserved.
pub fn deep_merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base), Value::Object(patch)) => {
            for (k, v) in patch {
                match base.get_mut(&k) {
                    Some(existing) => deep_merge(existing, v),
                    None => {
                        base.insert(k, v);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}
