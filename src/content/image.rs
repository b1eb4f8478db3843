//! Cover image selection.
//!
//! Order of preference:
//!
//! 1. front-matter `coverImage`, if it exists (or is external)
//! 2. the first `![..](..)` image in the body, if it exists
//! 3. the category's default image
//! 4. the global default image
//!
//! Every miss is reported so authors can fix the reference, including
//! body images that are not candidates for the cover.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::ContentConfig;
use crate::utils::path::{is_external, public_file};

/// `![alt](src "title")` → `src`
static RE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"!\[[^\]]*\]\(\s*<?([^)\s>]+)>?(?:\s+"[^"]*")?\s*\)"#).unwrap());

/// Image references in a Markdown body, in document order.
pub fn body_images(body: &str) -> impl Iterator<Item = &str> {
    RE_IMAGE
        .captures_iter(body)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
}

/// Chosen image plus the misses encountered on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    pub src: String,
    pub warnings: Vec<String>,
}

pub struct CoverResolver<'a> {
    config: &'a ContentConfig,
}

impl<'a> CoverResolver<'a> {
    pub fn new(config: &'a ContentConfig) -> Self {
        Self { config }
    }

    /// External references are trusted; site-root ones must exist under
    /// the public directory.
    pub fn exists(&self, reference: &str) -> bool {
        is_external(reference) || public_file(&self.config.public_dir, reference).is_file()
    }

    pub fn resolve(&self, cover: Option<&str>, body: &str, category: &str) -> CoverImage {
        let mut warnings = Vec::new();
        let mut src = None;

        if let Some(cover) = cover.filter(|c| !c.trim().is_empty()) {
            if self.exists(cover) {
                src = Some(cover.to_string());
            } else {
                warnings.push(format!("cover image `{cover}` not found in public directory"));
            }
        }

        // Every embedded image is checked; only the first can become the cover.
        let mut missing: Vec<&str> = Vec::new();
        for (i, image) in body_images(body).enumerate() {
            if !self.exists(image) {
                if !missing.contains(&image) {
                    missing.push(image);
                    warnings.push(format!("image `{image}` referenced in content not found"));
                }
            } else if i == 0 && src.is_none() {
                src = Some(image.to_string());
            }
        }

        if let Some(src) = src {
            return CoverImage { src, warnings };
        }

        let fallback = self.config.image_for_category(category);
        if !self.exists(fallback) {
            warnings.push(format!(
                "default image `{fallback}` for category '{category}' not found"
            ));
            return CoverImage {
                src: self.config.default_image.clone(),
                warnings,
            };
        }

        CoverImage {
            src: fallback.to_string(),
            warnings,
        }
    }
}
