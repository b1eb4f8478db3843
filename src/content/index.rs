//! The content index: listing entries and the route key map of a collection.
//!
//! Both listing pages and detail pages are served from one [`ContentIndex`].
//! Generated collections derive their entries from the documents;
//! hand-authored ones (`generate = false`) read them from the configured
//! manifest and are only checked against the documents.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::Author;
use super::excerpt;
use super::image::CoverResolver;
use super::{ContentError, ContentStore, ContentWarning, Document};
use crate::config::{CollectionConfig, RouteKey, SiteConfig};
use crate::utils::date::ContentDate;

/// Listing id: front-matter `id`, else the 1-based file position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Num(u64),
    Text(String),
}

impl EntryId {
    fn from_meta(id: Option<&str>, position: usize) -> Self {
        match id {
            Some(id) => id
                .parse()
                .map_or_else(|_| Self::Text(id.to_string()), Self::Num),
            None => Self::Num(position as u64),
        }
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Denormalized listing metadata for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    pub id: EntryId,
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub date: String,
    pub read_time: String,
    pub category: String,
    pub author: Author,
    pub excerpt: String,
    pub cover_image: String,
    pub tags: Vec<String>,
}

/// Where a collection's listing entries come from.
#[derive(Debug, Clone)]
enum Entries {
    Generated(Vec<IndexEntry>),
    Authored(Vec<Value>),
}

/// What regenerating a manifest changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestDiff {
    /// Keys present now but not in the previous manifest.
    pub added: Vec<String>,
    /// Keys of the previous manifest whose document is gone.
    pub stale: Vec<String>,
    /// Whether the bytes on disk changed.
    pub changed: bool,
}

/// Mismatches between a manifest and the documents on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestReport {
    /// Manifest entries with no document.
    pub orphan_entries: Vec<String>,
    /// Documents with no manifest entry.
    pub orphan_files: Vec<String>,
}

impl ManifestReport {
    pub fn is_clean(&self) -> bool {
        self.orphan_entries.is_empty() && self.orphan_files.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ContentIndex {
    collection: CollectionConfig,
    manifest_path: PathBuf,
    documents: Vec<Document>,
    entries: Entries,
    /// Route key → position in `documents`.
    keys: FxHashMap<String, usize>,
    warnings: Vec<ContentWarning>,
}

impl ContentIndex {
    /// Index a loaded store.
    ///
    /// Fails on duplicate route keys, and for hand-authored collections when
    /// the manifest cannot be read.
    pub fn build(store: ContentStore, config: &SiteConfig) -> Result<Self, ContentError> {
        let (collection, documents, mut warnings) = store.into_parts();
        let keys = key_map(&collection, &documents, &mut warnings)?;
        let manifest_path = collection.manifest_path(&config.build.output);

        let entries = if collection.generate {
            let derived: Vec<_> = documents
                .par_iter()
                .map(|doc| derive_entry(doc, config))
                .collect();

            let mut dated = Vec::with_capacity(derived.len());
            for (entry, date, entry_warnings) in derived {
                warnings.extend(entry_warnings);
                dated.push((entry, date));
            }
            // Stable: equal dates keep file order, unparseable dates go last.
            dated.sort_by(|a, b| b.1.cmp(&a.1));
            Entries::Generated(dated.into_iter().map(|(entry, _)| entry).collect())
        } else {
            Entries::Authored(read_manifest(&manifest_path, &collection.name)?)
        };

        Ok(Self {
            collection,
            manifest_path,
            documents,
            entries,
            keys,
            warnings,
        })
    }

    pub fn collection(&self) -> &CollectionConfig {
        &self.collection
    }

    pub fn name(&self) -> &str {
        &self.collection.name
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn warnings(&self) -> &[ContentWarning] {
        &self.warnings
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Generated entries, newest first. Empty for hand-authored collections.
    pub fn entries(&self) -> &[IndexEntry] {
        match &self.entries {
            Entries::Generated(entries) => entries,
            Entries::Authored(_) => &[],
        }
    }

    /// Listing entries as JSON, in listing order.
    pub fn listing(&self) -> Vec<Value> {
        match &self.entries {
            Entries::Generated(entries) => entries
                .iter()
                .filter_map(|e| serde_json::to_value(e).ok())
                .collect(),
            Entries::Authored(entries) => entries.clone(),
        }
    }

    /// Resolve a detail route key to its document.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.keys.get(key).map(|&i| &self.documents[i])
    }

    /// Route keys in file order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.keys.iter().map(|(k, &i)| (i, k.as_str())).collect();
        keys.sort_unstable_by_key(|(i, _)| *i);
        keys.into_iter().map(|(_, k)| k).collect()
    }

    /// Pretty `{"<collection>": [...]}` with a trailing newline.
    pub fn manifest_json(&self) -> Result<String, serde_json::Error> {
        let mut root = serde_json::Map::new();
        root.insert(self.collection.name.clone(), Value::Array(self.listing()));
        let mut json = serde_json::to_string_pretty(&Value::Object(root))?;
        json.push('\n');
        Ok(json)
    }

    /// Write the generated manifest and report what changed.
    ///
    /// Untouched when the content is byte-identical. Hand-authored
    /// manifests are never written.
    pub fn write_manifest(&self) -> Result<ManifestDiff, ContentError> {
        let path = &self.manifest_path;
        if !self.collection.generate {
            return Ok(ManifestDiff::default());
        }

        let json = self
            .manifest_json()
            .map_err(|err| ContentError::Manifest(path.clone(), err))?;

        let previous = match fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(ContentError::Io(path.clone(), err)),
        };

        let old_keys: FxHashSet<String> = previous
            .as_deref()
            .and_then(|text| serde_json::from_str::<Value>(text).ok())
            .and_then(|value| entries_of(value, &self.collection.name))
            .map(|entries| self.entry_keys(&entries).into_iter().collect())
            .unwrap_or_default();
        let new_keys = self.entry_keys(&self.listing());

        let diff = ManifestDiff {
            added: new_keys
                .iter()
                .filter(|k| !old_keys.contains(*k))
                .cloned()
                .collect(),
            stale: {
                let current: FxHashSet<_> = new_keys.iter().collect();
                let mut stale: Vec<_> =
                    old_keys.iter().filter(|k| !current.contains(k)).cloned().collect();
                stale.sort();
                stale
            },
            changed: previous.as_deref() != Some(json.as_str()),
        };

        if diff.changed {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|err| ContentError::Io(parent.into(), err))?;
            }
            fs::write(path, json).map_err(|err| ContentError::Io(path.clone(), err))?;
        }

        Ok(diff)
    }

    /// Compare the manifest on disk with the documents.
    ///
    /// Generated collections compare the file as last written, so a stale
    /// manifest shows up until `folio index` runs again.
    pub fn check_manifest(&self) -> Result<ManifestReport, ContentError> {
        let entries = match &self.entries {
            Entries::Authored(entries) => entries.clone(),
            Entries::Generated(_) => match fs::read_to_string(&self.manifest_path) {
                Ok(text) => {
                    let value: Value = serde_json::from_str(&text)
                        .map_err(|err| ContentError::Manifest(self.manifest_path.clone(), err))?;
                    entries_of(value, &self.collection.name).unwrap_or_default()
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
                Err(err) => return Err(ContentError::Io(self.manifest_path.clone(), err)),
            },
        };

        let listed: FxHashSet<String> = self.entry_keys(&entries).into_iter().collect();
        let mut orphan_entries: Vec<_> = listed
            .iter()
            .filter(|k| !self.keys.contains_key(k.as_str()))
            .cloned()
            .collect();
        orphan_entries.sort();

        let orphan_files = self
            .keys()
            .into_iter()
            .filter(|k| !listed.contains(*k))
            .map(str::to_owned)
            .collect();

        Ok(ManifestReport {
            orphan_entries,
            orphan_files,
        })
    }

    /// Route keys of manifest entries, per the collection's key field.
    fn entry_keys(&self, entries: &[Value]) -> Vec<String> {
        let field = match self.collection.key {
            RouteKey::Slug => "slug",
            RouteKey::Id => "id",
        };
        entries
            .iter()
            .filter_map(|e| match e.get(field)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()
    }
}

/// Map route keys to document positions, rejecting duplicates.
fn key_map(
    collection: &CollectionConfig,
    documents: &[Document],
    warnings: &mut Vec<ContentWarning>,
) -> Result<FxHashMap<String, usize>, ContentError> {
    let mut keys = FxHashMap::default();
    for (i, doc) in documents.iter().enumerate() {
        let Some(key) = doc.route_key(collection.key) else {
            warnings.push(ContentWarning::new(
                &doc.path,
                "missing `id`, document is not routable",
            ));
            continue;
        };
        if !is_routable(&key) {
            warnings.push(ContentWarning::new(
                &doc.path,
                format!("key '{key}' is not routable, document skipped"),
            ));
            continue;
        }
        if let Some(&first) = keys.get(&key) {
            let first: &Document = &documents[first];
            return Err(ContentError::DuplicateKey {
                collection: collection.name.clone(),
                key,
                first: first.path.clone(),
                second: doc.path.clone(),
            });
        }
        keys.insert(key, i);
    }
    Ok(keys)
}

/// A route key becomes one path segment of the output file.
fn is_routable(key: &str) -> bool {
    !key.is_empty() && !key.contains(['/', '\\']) && !key.contains("..")
}

/// Listing entry for one document, its sort date, and any warnings.
fn derive_entry(
    doc: &Document,
    config: &SiteConfig,
) -> (IndexEntry, Option<ContentDate>, Vec<ContentWarning>) {
    let content = &config.content;
    let mut warnings = Vec::new();

    let title = match doc.title() {
        Some(title) => title.to_string(),
        None => {
            warnings.push(ContentWarning::new(&doc.path, "missing title"));
            content.untitled.clone()
        }
    };

    let (date, sort_date) = match doc.meta.date.as_deref() {
        None => {
            let today = config.build.today();
            (today.to_iso(), Some(today))
        }
        Some(raw) => match ContentDate::parse(raw) {
            Some(date) => (date.to_iso(), Some(date)),
            None => {
                warnings.push(ContentWarning::new(
                    &doc.path,
                    format!("unparseable date '{raw}', sorted last"),
                ));
                (raw.to_string(), None)
            }
        },
    };

    let category = doc
        .category()
        .unwrap_or(&content.default_category)
        .to_string();

    let excerpt = match doc.meta.excerpt.as_deref().or(doc.meta.summary.as_deref()) {
        Some(excerpt) if !excerpt.trim().is_empty() => excerpt.to_string(),
        _ => excerpt::derive(&doc.body, &title, content.excerpt_length),
    };

    let read_time = match doc.meta.read_time.as_deref() {
        Some(rt) if !rt.trim().is_empty() => rt.to_string(),
        _ => excerpt::read_time(&doc.body, content.words_per_minute),
    };

    let cover = CoverResolver::new(content).resolve(
        doc.meta.cover_image.as_deref(),
        &doc.body,
        &category,
    );
    warnings.extend(
        cover
            .warnings
            .into_iter()
            .map(|message| ContentWarning::new(&doc.path, message)),
    );

    let entry = IndexEntry {
        id: EntryId::from_meta(doc.meta.id.as_deref(), doc.position),
        slug: doc.slug.clone(),
        title,
        subtitle: doc.meta.subtitle.clone().unwrap_or_default(),
        date,
        read_time,
        category,
        author: doc.author(&config.site.author),
        excerpt,
        cover_image: cover.src,
        tags: doc.meta.tags.clone(),
    };

    (entry, sort_date, warnings)
}

/// Read a hand-authored manifest: `{"<name>": [...]}` or a bare list.
fn read_manifest(path: &Path, name: &str) -> Result<Vec<Value>, ContentError> {
    let text = fs::read_to_string(path).map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
    let value: Value =
        serde_json::from_str(&text).map_err(|err| ContentError::Manifest(path.to_path_buf(), err))?;
    entries_of(value, name).ok_or_else(|| {
        ContentError::Manifest(
            path.to_path_buf(),
            serde::de::Error::custom(format!("expected a list or {{\"{name}\": [...]}}")),
        )
    })
}

fn entries_of(value: Value, name: &str) -> Option<Vec<Value>> {
    match value {
        Value::Array(entries) => Some(entries),
        Value::Object(mut map) => match map.remove(name)? {
            Value::Array(entries) => Some(entries),
            _ => None,
        },
        _ => None,
    }
}
