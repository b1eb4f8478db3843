//! `[site]` configuration.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Site metadata injected into every page's props.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title.
    pub title: String,

    /// Public site URL (e.g., "https://example.com").
    pub url: Option<String>,

    /// Author used when a document does not name one.
    pub author: AuthorConfig,
}

/// Default author for content documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    pub avatar: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            url: None,
            author: AuthorConfig::default(),
        }
    }
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "Jonathan Vu".into(),
            avatar: "/images/avatar/avatar.jpg".into(),
        }
    }
}

impl SiteSectionConfig {
    const URL: FieldPath = FieldPath::new("site.url");

    /// `url` must be an http(s) URL with a host.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        let Some(url_str) = &self.url else {
            return;
        };

        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.error_with_hint(
                        Self::URL,
                        format!(
                            "scheme '{}' not supported, must be http or https",
                            parsed.scheme()
                        ),
                        "use format like https://example.com",
                    );
                }
                if parsed.host_str().is_none() {
                    diag.error_with_hint(
                        Self::URL,
                        "URL must have a valid host",
                        "use format like https://example.com",
                    );
                }
            }
            Err(e) => {
                diag.error_with_hint(
                    Self::URL,
                    format!("invalid URL: {e}"),
                    "use format like https://example.com",
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_default_author() {
        let config = test_parse_config("");
        assert_eq!(config.site.author.name, "Jonathan Vu");
        assert_eq!(config.site.author.avatar, "/images/avatar/avatar.jpg");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = test_parse_config("url = \"ftp://example.com\"");
        let mut diag = crate::config::ConfigDiagnostics::new();
        config.site.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
