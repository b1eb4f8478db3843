//! Loading a collection directory into memory.

use std::path::{Path, PathBuf};

use jwalk::WalkDir;
use rayon::prelude::*;

use super::{ContentError, ContentWarning, Document};
use crate::config::CollectionConfig;

/// Extensions treated as content documents.
const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// All readable documents of one collection, in file-name order.
#[derive(Debug, Clone)]
pub struct ContentStore {
    collection: CollectionConfig,
    documents: Vec<Document>,
    warnings: Vec<ContentWarning>,
    draft_count: usize,
}

impl ContentStore {
    /// Load every document under the collection's directory.
    ///
    /// A missing directory aborts; an unreadable or malformed file is
    /// skipped with a warning. Drafts are dropped unless `include_drafts`.
    pub fn load(collection: &CollectionConfig, include_drafts: bool) -> Result<Self, ContentError> {
        if !collection.dir.is_dir() {
            return Err(ContentError::MissingDir(collection.dir.clone()));
        }

        let files = content_files(&collection.dir);
        let loaded: Vec<_> = files
            .par_iter()
            .enumerate()
            .map(|(i, path)| Document::load(path, i + 1))
            .collect();

        let mut documents = Vec::with_capacity(loaded.len());
        let mut warnings = Vec::new();
        let mut draft_count = 0;

        for (path, result) in files.iter().zip(loaded) {
            match result {
                Ok(doc) if doc.is_draft() && !include_drafts => draft_count += 1,
                Ok(doc) => documents.push(doc),
                Err(err) => warnings.push(ContentWarning::new(
                    path,
                    format!("{}, skipped", error_chain(&err)),
                )),
            }
        }

        crate::debug!(
            "index";
            "{}: {} documents, {} drafts, {} skipped",
            collection.name,
            documents.len(),
            draft_count,
            warnings.len()
        );

        Ok(Self {
            collection: collection.clone(),
            documents,
            warnings,
            draft_count,
        })
    }

    #[cfg(test)]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    #[cfg(test)]
    pub fn warnings(&self) -> &[ContentWarning] {
        &self.warnings
    }

    pub fn draft_count(&self) -> usize {
        self.draft_count
    }

    pub(super) fn into_parts(self) -> (CollectionConfig, Vec<Document>, Vec<ContentWarning>) {
        (self.collection, self.documents, self.warnings)
    }
}

/// `*.md` / `*.mdx` directly inside `dir`, sorted by file name.
pub fn content_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .max_depth(1)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| is_content_file(p))
        .collect()
}

fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext))
}

/// Render an error with its sources on one line.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn collection(dir: &Path) -> CollectionConfig {
        CollectionConfig {
            name: "posts".into(),
            dir: dir.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_dir_is_structural() {
        let dir = TempDir::new().unwrap();
        let err = ContentStore::load(&collection(&dir.path().join("nope")), false).unwrap_err();
        assert!(matches!(err, ContentError::MissingDir(_)));
    }

    #[test]
    fn test_loads_in_file_name_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.mdx"), "---\ntitle: B\n---\nbody").unwrap();
        fs::write(dir.path().join("a.md"), "---\ntitle: A\n---\nbody").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("drafts")).unwrap();
        fs::write(dir.path().join("drafts/c.mdx"), "nested, ignored").unwrap();

        let store = ContentStore::load(&collection(dir.path()), false).unwrap();
        let slugs: Vec<_> = store.documents().iter().map(|d| d.slug.as_str()).collect();
        assert_eq!(slugs, ["a", "b"]);
        assert_eq!(store.documents()[1].position, 2);
    }

    #[test]
    fn test_malformed_file_skipped_with_warning() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good.mdx"), "---\ntitle: Good\n---\nbody").unwrap();
        fs::write(dir.path().join("bad.mdx"), "---\ntitle: [oops\n---\nbody").unwrap();

        let store = ContentStore::load(&collection(dir.path()), false).unwrap();
        assert_eq!(store.documents().len(), 1);
        assert_eq!(store.warnings().len(), 1);
        assert!(store.warnings()[0].path.ends_with("bad.mdx"));
    }

    #[test]
    fn test_drafts_excluded_unless_requested() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.mdx"), "---\ndraft: true\n---\nbody").unwrap();
        fs::write(dir.path().join("b.mdx"), "body").unwrap();

        let store = ContentStore::load(&collection(dir.path()), false).unwrap();
        assert_eq!(store.documents().len(), 1);
        assert_eq!(store.draft_count(), 1);

        let store = ContentStore::load(&collection(dir.path()), true).unwrap();
        assert_eq!(store.documents().len(), 2);
    }
}
