//! A single content document: front-matter plus Markdown/MDX body.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ContentError;
use super::frontmatter::{self, AuthorField, FrontMatter};
use crate::config::{AuthorConfig, RouteKey};
use crate::utils::date::ContentDate;

/// Author as it appears in listings and page props.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone)]
pub struct Document {
    /// File stem, unique within the collection directory.
    pub slug: String,
    pub path: PathBuf,
    /// 1-based position in file-name order.
    pub position: usize,
    pub meta: FrontMatter,
    pub body: String,
}

impl Document {
    /// Read and parse the document at `path`.
    pub fn load(path: &Path, position: usize) -> Result<Self, ContentError> {
        let source = std::fs::read_to_string(path)
            .map_err(|err| ContentError::Io(path.to_path_buf(), err))?;
        Self::parse(path, position, &source)
    }

    pub fn parse(path: &Path, position: usize, source: &str) -> Result<Self, ContentError> {
        let (meta, body) =
            frontmatter::parse(source).map_err(|message| ContentError::FrontMatter {
                path: path.to_path_buf(),
                message,
            })?;

        Ok(Self {
            slug: slug_of(path),
            path: path.to_path_buf(),
            position,
            meta,
            body: body.to_string(),
        })
    }

    /// Key this document is routed by.
    ///
    /// `None` when the collection is keyed by `id` and the document has none.
    pub fn route_key(&self, key: RouteKey) -> Option<String> {
        match key {
            RouteKey::Slug => Some(self.slug.clone()),
            RouteKey::Id => self
                .meta
                .id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_owned),
        }
    }

    /// Non-blank title from front-matter.
    pub fn title(&self) -> Option<&str> {
        non_blank(self.meta.title.as_deref())
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(self.meta.category.as_deref())
    }

    /// Parsed `date`; `None` if absent or unparseable.
    pub fn date(&self) -> Option<ContentDate> {
        self.meta.date.as_deref().and_then(ContentDate::parse)
    }

    pub fn is_draft(&self) -> bool {
        self.meta.draft
    }

    /// Author with per-field fallback to the site default.
    pub fn author(&self, default: &AuthorConfig) -> Author {
        let (name, avatar) = match &self.meta.author {
            Some(AuthorField::Name(name)) => (non_blank(Some(name)), None),
            Some(AuthorField::Full { name, avatar }) => {
                (non_blank(name.as_deref()), non_blank(avatar.as_deref()))
            }
            None => (None, None),
        };

        Author {
            name: name.unwrap_or(&default.name).to_string(),
            avatar: avatar.unwrap_or(&default.avatar).to_string(),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// `content/posts/hello-world.mdx` → `hello-world`
pub fn slug_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(source: &str) -> Document {
        Document::parse(Path::new("content/posts/hello-world.mdx"), 1, source).unwrap()
    }

    #[test]
    fn test_slug_from_file_stem() {
        assert_eq!(doc("body").slug, "hello-world");
        assert_eq!(slug_of(Path::new("a/b/notes.md")), "notes");
    }

    #[test]
    fn test_route_key() {
        let d = doc("---\nid: 7\n---\nbody");
        assert_eq!(d.route_key(RouteKey::Slug).as_deref(), Some("hello-world"));
        assert_eq!(d.route_key(RouteKey::Id).as_deref(), Some("7"));
        assert_eq!(doc("body").route_key(RouteKey::Id), None);
    }

    #[test]
    fn test_author_fallback() {
        let default = AuthorConfig::default();

        let d = doc("---\nauthor: Jane\n---\n");
        let author = d.author(&default);
        assert_eq!(author.name, "Jane");
        assert_eq!(author.avatar, default.avatar);

        let d = doc("---\nauthor:\n  avatar: /me.png\n---\n");
        let author = d.author(&default);
        assert_eq!(author.name, default.name);
        assert_eq!(author.avatar, "/me.png");
    }

    #[test]
    fn test_blank_title_is_missing() {
        assert_eq!(doc("---\ntitle: \"  \"\n---\n").title(), None);
        assert_eq!(doc("---\ntitle: Hi\n---\n").title(), Some("Hi"));
    }

    #[test]
    fn test_malformed_front_matter() {
        let err = Document::parse(Path::new("bad.md"), 1, "---\ntitle: [x\n---\n").unwrap_err();
        assert!(matches!(err, ContentError::FrontMatter { .. }));
    }
}
