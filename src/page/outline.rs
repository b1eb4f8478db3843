//! Heading outline (table of contents) of a document body.

use pulldown_cmark::{Event, HeadingLevel, Tag, TagEnd};
use serde::Serialize;

use crate::config::SlugConfig;
use crate::utils::slug::{UniqueIds, slugify_fragment};

/// Id used when a heading slugifies to nothing.
const FALLBACK_ID: &str = "section";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub id: String,
}

/// Assign unique ids to h2/h3 start tags and collect the outline.
///
/// An explicit `{#id}` attribute is kept, but still takes part in
/// de-duplication.
pub(super) fn anchor<'a>(
    mut events: Vec<Event<'a>>,
    slug: &SlugConfig,
) -> (Vec<Event<'a>>, Vec<Heading>) {
    struct Open {
        start: usize,
        level: u8,
        text: String,
        explicit: Option<String>,
    }

    let mut found = Vec::new();
    let mut current: Option<Open> = None;

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { level, id, .. }) => {
                let level = match level {
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    _ => continue,
                };
                current = Some(Open {
                    start: i,
                    level,
                    text: String::new(),
                    explicit: id.as_ref().map(|id| id.to_string()),
                });
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some(open) = &mut current {
                    open.text.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => found.extend(current.take()),
            _ => {}
        }
    }

    let mut ids = UniqueIds::new();
    let mut outline = Vec::with_capacity(found.len());
    for open in found {
        let text = open.text.trim().to_string();
        let base = open
            .explicit
            .unwrap_or_else(|| slugify_fragment(&text, slug));
        let id = ids.assign(if base.is_empty() {
            FALLBACK_ID.to_string()
        } else {
            base
        });

        if let Event::Start(Tag::Heading { id: slot, .. }) = &mut events[open.start] {
            *slot = Some(id.clone().into());
        }
        outline.push(Heading {
            level: open.level,
            text,
            id,
        });
    }

    (events, outline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SlugMode;
    use crate::page::render::render;

    /// Level-2 and level-3 headings of `body` in document order.
    fn outline(body: &str, slug: &SlugConfig) -> Vec<Heading> {
        render(body, slug).outline
    }

    fn ids(headings: &[Heading]) -> Vec<&str> {
        headings.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn test_h2_and_h3_only() {
        let body = "# Title\n\n## Section One\n\ntext\n\n### Sub Part\n\n#### Deep\n";
        let outline = outline(body, &SlugConfig::default());
        assert_eq!(
            outline,
            vec![
                Heading {
                    level: 2,
                    text: "Section One".into(),
                    id: "section-one".into()
                },
                Heading {
                    level: 3,
                    text: "Sub Part".into(),
                    id: "sub-part".into()
                },
            ]
        );
    }

    #[test]
    fn test_repeated_headings_get_suffixes() {
        let body = "## Notes\n\n## Notes\n\n### Notes\n";
        assert_eq!(
            ids(&outline(body, &SlugConfig::default())),
            ["notes", "notes-2", "notes-3"]
        );
    }

    #[test]
    fn test_inline_markup_text() {
        let body = "## Using `serde` **well**\n";
        let outline = outline(body, &SlugConfig::default());
        assert_eq!(outline[0].text, "Using serde well");
        assert_eq!(outline[0].id, "using-serde-well");
    }

    #[test]
    fn test_vietnamese_and_symbol_headings() {
        let body = "## Tiếng Việt\n\n## !!!\n";
        assert_eq!(
            ids(&outline(body, &SlugConfig::default())),
            ["tieng-viet", "section"]
        );

        let safe = SlugConfig {
            fragment: SlugMode::Safe,
            ..Default::default()
        };
        assert_eq!(ids(&outline("## Tiếng Việt\n", &safe)), ["tiếng-việt"]);
    }

    #[test]
    fn test_explicit_id_kept() {
        let body = "## Intro {#start}\n\n## Start\n";
        assert_eq!(
            ids(&outline(body, &SlugConfig::default())),
            ["start", "start-2"]
        );
    }
}
