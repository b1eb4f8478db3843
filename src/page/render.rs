//! Markdown/MDX body to HTML using pulldown-cmark.

use pulldown_cmark::{Event, Options, Parser, html};

use super::outline::{Heading, anchor};
use crate::config::SlugConfig;
use crate::content::mdx::strip_esm;

/// Options for markdown conversion
#[derive(Debug, Clone, Default)]
pub struct MarkdownOptions {
    /// Enable tables extension
    pub tables: bool,
    /// Enable footnotes extension
    pub footnotes: bool,
    /// Enable strikethrough extension
    pub strikethrough: bool,
    /// Enable task lists extension
    pub task_lists: bool,
    /// Enable heading attributes extension (e.g., `## Heading {#custom-id}`)
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    /// Create options with all extensions enabled
    pub fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    fn to_pulldown_options(&self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Rendered body with the outline whose ids the HTML carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    pub outline: Vec<Heading>,
}

/// Render `body` to HTML; h2/h3 get the outline ids.
pub fn render(body: &str, slug: &SlugConfig) -> Rendered {
    let source = strip_esm(body);
    let events = parse(&source, &MarkdownOptions::all());
    let (events, outline) = anchor(events, slug);

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    Rendered { html: out, outline }
}

fn parse<'a>(source: &'a str, options: &MarkdownOptions) -> Vec<Event<'a>> {
    Parser::new_ext(source, options.to_pulldown_options()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(body: &str) -> String {
        render(body, &SlugConfig::default()).html
    }

    #[test]
    fn test_heading_ids_injected() {
        let out = html("## Section One\n\n### Sub Part\n\n#### Deep\n");
        assert!(out.contains(r#"<h2 id="section-one">Section One</h2>"#));
        assert!(out.contains(r#"<h3 id="sub-part">Sub Part</h3>"#));
        assert!(out.contains("<h4>Deep</h4>"));
    }

    #[test]
    fn test_extensions() {
        let out = html("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n\n- [x] done\n");
        assert!(out.contains("<table>"));
        assert!(out.contains("<del>old</del>"));
        assert!(out.contains(r#"type="checkbox""#));

        let out = html("Claim[^1]\n\n[^1]: Source\n");
        assert!(out.contains("footnote-definition"));
    }

    #[test]
    fn test_mdx_statements_stripped() {
        let body = "import Chart from '../components/Chart'\n\n# Hi\n\n```js\nimport x from 'y'\n```\n\nexport const meta = {}\n";
        let out = html(body);
        assert!(!out.contains("Chart"));
        assert!(!out.contains("meta"));
        assert!(out.contains("import x from"));
    }

    #[test]
    fn test_multi_line_export_not_rendered() {
        let out = html("export const meta = {\n  title: 'x'\n}\n\n## Intro\n\nBody\n");
        assert!(!out.contains("title"));
        assert!(!out.contains('}'));
        assert!(out.contains(r#"<h2 id="intro">Intro</h2>"#));
        assert!(out.contains("<p>Body</p>"));
    }

    #[test]
    fn test_rendered_outline_matches_html() {
        let rendered = render("## Notes\n\n## Notes\n", &SlugConfig::default());
        for heading in &rendered.outline {
            assert!(rendered.html.contains(&format!(r#"id="{}""#, heading.id)));
        }
    }
}
