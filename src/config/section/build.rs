//! `[build]` configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::date::ContentDate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Output directory for manifests and page props.
    pub output: PathBuf,

    /// Static (non-content) pages built once per locale.
    pub pages: Vec<String>,

    /// Fixed "today" (`YYYY-MM-DD`) substituted for missing dates.
    ///
    /// Pinning it makes manifests reproducible across days.
    pub today: Option<String>,

    /// Include documents marked `draft: true`.
    pub drafts: bool,

    /// Remove the output directory before building.
    pub clean: bool,

    /// Heading anchor slugs.
    pub slug: SlugConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "build".into(),
            pages: ["index", "about", "finance", "impact", "mentoring", "start-learning"]
                .into_iter()
                .map(String::from)
                .collect(),
            today: None,
            drafts: false,
            clean: false,
            slug: SlugConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    const TODAY: FieldPath = FieldPath::new("build.today");
    const PAGES: FieldPath = FieldPath::new("build.pages");

    /// The date substituted for documents without one.
    pub fn today(&self) -> ContentDate {
        self.today
            .as_deref()
            .and_then(ContentDate::parse)
            .unwrap_or_else(ContentDate::today)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(today) = &self.today
            && ContentDate::parse(today).is_none()
        {
            diag.error_with_hint(
                Self::TODAY,
                format!("'{today}' is not a date"),
                "use YYYY-MM-DD, e.g. \"2024-02-08\"",
            );
        }

        for page in &self.pages {
            if page.is_empty() || page.starts_with('/') || page.contains("..") {
                diag.error_with_hint(
                    Self::PAGES,
                    format!("invalid page name '{page}'"),
                    "use relative names like \"about\" or \"start-learning\"",
                );
            }
        }
    }

    pub fn normalize(&mut self, root: &Path) {
        self.output = crate::utils::path::normalize_path(&root.join(&self.output));
    }
}

/// Slug generation mode for heading anchors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Transliterate to ASCII, lowercase, use separator (default).
    #[default]
    Full,
    /// Remove dangerous chars, preserve Unicode, lowercase, use separator.
    Safe,
    /// No modification; preserve original text.
    No,
}

/// Separator character for slugs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugSeparator {
    /// Dash separator (`-`) (default).
    #[default]
    Dash,
    /// Underscore separator (`_`).
    Underscore,
}

impl SlugSeparator {
    /// Get the character representation.
    pub const fn as_char(&self) -> char {
        match self {
            Self::Dash => '-',
            Self::Underscore => '_',
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    /// Slugify heading anchors.
    pub fragment: SlugMode,
    /// Separator character for spaces.
    pub separator: SlugSeparator,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.slug.fragment, SlugMode::Full);
        assert_eq!(config.build.slug.separator, SlugSeparator::Dash);
        assert!(config.build.pages.contains(&"index".to_string()));
        assert!(!config.build.drafts);
    }

    #[test]
    fn test_mode_parsing() {
        for (input, expected) in [
            ("full", SlugMode::Full),
            ("safe", SlugMode::Safe),
            ("no", SlugMode::No),
        ] {
            let config = test_parse_config(&format!("[build.slug]\nfragment = \"{input}\""));
            assert_eq!(config.build.slug.fragment, expected, "failed for {input}");
        }
    }

    #[test]
    fn test_separator_parsing() {
        let config = test_parse_config("[build.slug]\nseparator = \"underscore\"");
        assert_eq!(config.build.slug.separator.as_char(), '_');
    }

    #[test]
    fn test_pinned_today() {
        let config = test_parse_config("[build]\ntoday = \"2024-02-08\"");
        assert_eq!(config.build.today().to_iso(), "2024-02-08");
    }

    #[test]
    fn test_invalid_today_rejected() {
        let config = test_parse_config("[build]\ntoday = \"tomorrow\"");
        let mut diag = ConfigDiagnostics::new();
        config.build.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
