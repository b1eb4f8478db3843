//! Front-matter detection and parsing.
//!
//! Two fences are recognized at the top of a document:
//!
//! ```text
//! ---            +++
//! title: Hello   title = "Hello"
//! ---            +++
//! ```
//!
//! `---` is YAML, `+++` is TOML. A document without a fence has empty
//! metadata and its whole text is the body.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub type JsonMap = serde_json::Map<String, Value>;

/// Metadata block of a content document.
///
/// Known fields are typed; anything else lands in `extra` and is carried
/// through to page props untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub author: Option<AuthorField>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub summary: Option<String>,
    pub category: Option<String>,
    #[serde(deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub read_time: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub id: Option<String>,
    pub draft: bool,
    #[serde(flatten)]
    pub extra: JsonMap,
}

/// `author: Jane` or `author: {name: Jane, avatar: /a.jpg}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorField {
    Name(String),
    Full {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        avatar: Option<String>,
    },
}

/// Accept strings, numbers and booleans as text.
///
/// YAML `id: 3` and `readTime: 5` are numbers; TOML datetimes arrive as a
/// single-entry table.
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Object(map)) if map.len() == 1 => map
            .into_iter()
            .next()
            .and_then(|(_, v)| v.as_str().map(str::to_owned)),
        _ => None,
    })
}

/// Tags as a list, or a comma-separated string; `null` is empty.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        List(Vec<String>),
        Csv(String),
    }

    Ok(match Option::<Tags>::deserialize(deserializer)? {
        Some(Tags::List(list)) => list,
        Some(Tags::Csv(s)) => s
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        None => Vec::new(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fence {
    Yaml,
    Toml,
}

/// Split `content` into front-matter and body.
///
/// Returns the parsed metadata (default when there is no fence) and the
/// body text. A fence that is present but does not parse is an error.
pub fn parse(content: &str) -> Result<(FrontMatter, &str), String> {
    let Some((raw, body, fence)) = detect(content) else {
        return Ok((FrontMatter::default(), content));
    };

    if raw.trim().is_empty() {
        return Ok((FrontMatter::default(), body));
    }

    let meta = match fence {
        Fence::Yaml => serde_yaml_ng::from_str(raw).map_err(|e| e.to_string())?,
        Fence::Toml => toml::from_str(raw).map_err(|e| e.to_string())?,
    };
    Ok((meta, body))
}

/// Returns `(front-matter, body, fence)` if a fence opens the document.
fn detect(content: &str) -> Option<(&str, &str, Fence)> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for (marker, fence) in [("---", Fence::Yaml), ("+++", Fence::Toml)] {
        if trimmed.starts_with(marker)
            && let Some(end) = trimmed[3..].find(&format!("\n{marker}"))
        {
            let fm = &trimmed[3..3 + end];
            let rest = &trimmed[3 + end + 4..];
            // Drop the remainder of the closing fence line.
            let body = rest.split_once('\n').map_or("", |(_, b)| b);
            return Some((fm, body.trim_start_matches('\n'), fence));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: Hello\ndate: 2024-01-01\ntags: [a, b]\n---\n\n# Body";
        let (meta, body) = parse(content).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert!(body.starts_with("# Body"));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ntags = [\"a\", \"b\"]\ndate = 2024-02-08\n+++\n\n# Body";
        let (meta, body) = parse(content).unwrap();

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.tags, vec!["a", "b"]);
        assert_eq!(meta.date.as_deref(), Some("2024-02-08"));
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_no_frontmatter() {
        let (meta, body) = parse("# Just content").unwrap();
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "# Just content");
    }

    #[test]
    fn test_author_forms() {
        let (meta, _) = parse("---\nauthor: Jane\n---\n").unwrap();
        assert_eq!(meta.author, Some(AuthorField::Name("Jane".into())));

        let (meta, _) = parse("---\nauthor:\n  name: Jane\n  avatar: /a.jpg\n---\n").unwrap();
        assert_eq!(
            meta.author,
            Some(AuthorField::Full {
                name: Some("Jane".into()),
                avatar: Some("/a.jpg".into()),
            })
        );
    }

    #[test]
    fn test_numeric_scalars_become_text() {
        let (meta, _) = parse("---\nid: 3\nreadTime: 5 min read\ndraft: true\n---\n").unwrap();
        assert_eq!(meta.id.as_deref(), Some("3"));
        assert_eq!(meta.read_time.as_deref(), Some("5 min read"));
        assert!(meta.draft);
    }

    #[test]
    fn test_extra_fields_and_csv_tags() {
        let content = "---\ntitle: Hello\nrating: 4.8\ntags: rust, i18n\n---\n";
        let (meta, _) = parse(content).unwrap();
        assert_eq!(meta.extra.get("rating"), Some(&json!(4.8)));
        assert_eq!(meta.tags, vec!["rust", "i18n"]);
    }

    #[test]
    fn test_malformed_frontmatter_is_error() {
        assert!(parse("---\ntitle: [unclosed\n---\nbody").is_err());
        assert!(parse("+++\ntitle = \n+++\nbody").is_err());
    }
}
