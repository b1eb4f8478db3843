//! Content collections: documents on disk and the index derived from them.
//!
//! ```text
//! content/posts/*.mdx ──► ContentStore ──► ContentIndex ──► manifest JSON
//!                                              │
//!                                              └──► detail lookups (page builder)
//! ```
//!
//! Listing pages and detail pages resolve through the same [`ContentIndex`],
//! so a route that appears in a listing always resolves to a document.

pub mod document;
pub mod excerpt;
pub mod frontmatter;
pub mod image;
pub mod index;
pub mod listing;
pub mod mdx;
pub mod store;

pub use document::{Author, Document};
pub use index::ContentIndex;
pub use listing::Listing;
pub use store::ContentStore;

use std::path::PathBuf;
use thiserror::Error;

/// A recoverable problem with one document, reported and skipped over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWarning {
    pub path: PathBuf,
    pub message: String,
}

impl ContentWarning {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while loading or indexing a collection.
///
/// Only [`ContentError::FrontMatter`] and [`ContentError::Io`] on a single
/// file are recoverable: the store skips that document with a warning.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("collection directory `{0}` not found")]
    MissingDir(PathBuf),

    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed front-matter in `{path}`: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("duplicate route key '{key}' in collection '{collection}' (`{first}` and `{second}`)")]
    DuplicateKey {
        collection: String,
        key: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("invalid manifest `{0}`")]
    Manifest(PathBuf, #[source] serde_json::Error),
}
