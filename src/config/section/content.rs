//! `[content]` configuration.
//!
//! Describes the content collections (`posts`, `books`, ...) and the
//! defaults the indexer substitutes for missing front-matter.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory that site-root image references resolve against.
    pub public_dir: PathBuf,

    /// Reading speed used for `readTime`.
    pub words_per_minute: u32,

    /// Maximum derived excerpt length in characters (before the ellipsis).
    pub excerpt_length: usize,

    /// Title substituted when a document has none.
    pub untitled: String,

    /// Category substituted when a document has none.
    pub default_category: String,

    /// Cover image used when nothing better is found.
    pub default_image: String,

    /// Category → cover image.
    pub default_images: BTreeMap<String, String>,

    pub collections: Vec<CollectionConfig>,
}

/// How a collection's detail routes are keyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKey {
    /// File stem (`hello-world.mdx` → `hello-world`).
    #[default]
    Slug,
    /// Front-matter `id` field.
    Id,
}

/// One directory of content documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Collection name, also the manifest's top-level key.
    pub name: String,

    /// Source directory.
    pub dir: PathBuf,

    /// URL segment of listing and detail routes (defaults to `name`).
    pub route: Option<String>,

    /// Detail route key.
    pub key: RouteKey,

    /// Manifest location; defaults to `<output>/index/<name>.json`.
    pub manifest: Option<PathBuf>,

    /// Whether `folio index` writes the manifest. Hand-authored
    /// manifests set this to `false` and are only checked.
    pub generate: bool,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            dir: PathBuf::new(),
            route: None,
            key: RouteKey::Slug,
            manifest: None,
            generate: true,
        }
    }
}

impl CollectionConfig {
    /// URL segment for this collection's routes.
    pub fn route_segment(&self) -> &str {
        self.route.as_deref().unwrap_or(&self.name)
    }

    /// Manifest path, given the build output directory.
    pub fn manifest_path(&self, output: &Path) -> PathBuf {
        self.manifest
            .clone()
            .unwrap_or_else(|| output.join("index").join(format!("{}.json", self.name)))
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        let default_images = [
            ("Technology", "/images/blog/ai-research.svg"),
            ("Engineering", "/images/blog/blogs.jpg"),
            ("Product Management", "/images/blog/product-management.jpg"),
            ("Social Impact", "/images/blog/social-impact.jpg"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            public_dir: "public".into(),
            words_per_minute: 200,
            excerpt_length: 160,
            untitled: "Untitled Post".into(),
            default_category: "Uncategorized".into(),
            default_image: "/images/blog/blogs.jpg".into(),
            default_images,
            collections: vec![
                CollectionConfig {
                    name: "posts".into(),
                    dir: "content/posts".into(),
                    route: Some("blog".into()),
                    ..Default::default()
                },
                CollectionConfig {
                    name: "books".into(),
                    dir: "content/books".into(),
                    route: Some("library".into()),
                    key: RouteKey::Id,
                    manifest: Some("data/books.json".into()),
                    generate: false,
                },
            ],
        }
    }
}

impl ContentConfig {
    const WORDS_PER_MINUTE: FieldPath = FieldPath::new("content.words_per_minute");
    const EXCERPT_LENGTH: FieldPath = FieldPath::new("content.excerpt_length");
    const COLLECTIONS: FieldPath = FieldPath::new("content.collections");

    pub fn collection(&self, name: &str) -> Option<&CollectionConfig> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Find a collection by name or route segment (`posts` or `blog`).
    pub fn collection_by_route(&self, segment: &str) -> Option<&CollectionConfig> {
        self.collections
            .iter()
            .find(|c| c.route_segment() == segment)
            .or_else(|| self.collection(segment))
    }

    /// Cover image for a category, falling back to the global default.
    pub fn image_for_category(&self, category: &str) -> &str {
        self.default_images
            .get(category)
            .map_or(self.default_image.as_str(), String::as_str)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.words_per_minute == 0 {
            diag.error(Self::WORDS_PER_MINUTE, "must be greater than 0");
        }
        if self.excerpt_length == 0 {
            diag.error(Self::EXCERPT_LENGTH, "must be greater than 0");
        }

        let mut names = rustc_hash::FxHashSet::default();
        let mut routes = rustc_hash::FxHashSet::default();
        for collection in &self.collections {
            if collection.name.is_empty() {
                diag.error(Self::COLLECTIONS, "collection name must not be empty");
                continue;
            }
            if !names.insert(collection.name.as_str()) {
                diag.error(
                    Self::COLLECTIONS,
                    format!("collection '{}' is defined twice", collection.name),
                );
            }
            if !routes.insert(collection.route_segment()) {
                diag.error(
                    Self::COLLECTIONS,
                    format!("route '{}' is used by two collections", collection.route_segment()),
                );
            }
            if collection.dir.as_os_str().is_empty() {
                diag.error_with_hint(
                    Self::COLLECTIONS,
                    format!("collection '{}' has no dir", collection.name),
                    format!("e.g. dir = \"content/{}\"", collection.name),
                );
            }
            if !collection.generate && collection.manifest.is_none() {
                diag.error_with_hint(
                    Self::COLLECTIONS,
                    format!(
                        "collection '{}' has generate = false but no manifest",
                        collection.name
                    ),
                    "point manifest at the hand-authored list",
                );
            }
        }
    }

    /// Resolve relative paths against the project root.
    pub fn normalize(&mut self, root: &Path) {
        use crate::utils::path::normalize_path;

        self.public_dir = normalize_path(&root.join(&self.public_dir));
        for collection in &mut self.collections {
            collection.dir = normalize_path(&root.join(&collection.dir));
            if let Some(manifest) = collection.manifest.take() {
                collection.manifest = Some(normalize_path(&root.join(manifest)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_default_collections() {
        let config = test_parse_config("");
        let posts = config.content.collection("posts").unwrap();
        assert_eq!(posts.route_segment(), "blog");
        assert_eq!(posts.key, RouteKey::Slug);
        assert!(posts.generate);

        let books = config.content.collection_by_route("library").unwrap();
        assert_eq!(books.name, "books");
        assert_eq!(books.key, RouteKey::Id);
        assert!(!books.generate);
    }

    #[test]
    fn test_custom_collections_replace_defaults() {
        let config = test_parse_config(
            "[[content.collections]]\nname = \"notes\"\ndir = \"content/notes\"\n",
        );
        assert_eq!(config.content.collections.len(), 1);
        assert_eq!(config.content.collections[0].route_segment(), "notes");
    }

    #[test]
    fn test_image_for_category() {
        let config = test_parse_config("");
        assert_eq!(
            config.content.image_for_category("Technology"),
            "/images/blog/ai-research.svg"
        );
        assert_eq!(
            config.content.image_for_category("Cooking"),
            "/images/blog/blogs.jpg"
        );
    }

    #[test]
    fn test_manifest_path_default() {
        let collection = CollectionConfig {
            name: "posts".into(),
            ..Default::default()
        };
        assert_eq!(
            collection.manifest_path(Path::new("/out")),
            PathBuf::from("/out/index/posts.json")
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = test_parse_config(
            "[[content.collections]]\nname = \"a\"\ndir = \"x\"\n\
             [[content.collections]]\nname = \"a\"\ndir = \"y\"\n",
        );
        let mut diag = ConfigDiagnostics::new();
        config.content.validate(&mut diag);
        assert_eq!(diag.len(), 2); // name and route both collide
    }
}
