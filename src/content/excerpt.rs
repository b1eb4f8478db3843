//! Listing excerpts and reading time derived from a document body.

use regex::Regex;
use std::sync::LazyLock;

use super::mdx::strip_esm;

/// `[text](url)` → `text`
static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\([^)]*\)").unwrap());

/// A line break, optional indentation, another line break.
static RE_BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").unwrap());

/// Shortest block that counts as a paragraph.
const MIN_PARAGRAPH: usize = 10;

/// First prose paragraph of `body`, cleaned and truncated to `max_chars`
/// at a word boundary, with `...` appended.
///
/// Falls back to `Learn more about {title}...` when the body has no prose.
pub fn derive(body: &str, title: &str, max_chars: usize) -> String {
    match first_paragraph(body) {
        Some(text) => format!("{}...", truncate_words(&clean(&text), max_chars)),
        None => format!("Learn more about {title}..."),
    }
}

/// Blank-line separated blocks of the body without its MDX `import`/`export`
/// blocks, skipping headings, images and JSX.
fn first_paragraph(body: &str) -> Option<String> {
    let body = strip_esm(body);
    RE_BLANK_LINE
        .split(&body)
        .map(str::trim)
        .find(|block| {
            block.chars().count() > MIN_PARAGRAPH
                && !block.starts_with('#')
                && !block.starts_with("![")
                && !block.starts_with('<')
        })
        .map(str::to_owned)
}

/// Strip inline markup and fold the block onto one line.
fn clean(text: &str) -> String {
    let text = RE_LINK.replace_all(text, "$1");
    let text: String = text.chars().filter(|c| !matches!(c, '#' | '*' | '`')).collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut at the last word boundary within `max_chars`.
fn truncate_words(text: &str, max_chars: usize) -> &str {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text.trim_end();
    };

    let head = &text[..cut];
    // A cut that lands exactly between words keeps the whole last word.
    if text[cut..].starts_with(' ') {
        return head.trim_end();
    }
    match head.rfind(' ') {
        Some(space) => head[..space].trim_end(),
        None => head,
    }
}

/// `"N min read"` at `words_per_minute`, never less than one minute.
pub fn read_time(body: &str, words_per_minute: u32) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.max(1) as usize).max(1);
    format!("{minutes} min read")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_paragraph_kept_whole() {
        assert_eq!(
            derive("Hello world, this is a test.", "T", 160),
            "Hello world, this is a test...."
        );
    }

    #[test]
    fn test_skips_headings_images_and_mdx() {
        let body = "import Chart from '../c'\n\n# Title\n\n![cover](/a.png)\n\n<Chart />\n\n\
                    Short\n\nThe **real** first paragraph with `code`.";
        assert_eq!(
            derive(body, "T", 160),
            "The real first paragraph with code...."
        );
    }

    #[test]
    fn test_multi_line_export_skipped() {
        let body = "export const meta = {\n  title: 'A long title here',\n}\n\nActual opening paragraph.";
        assert_eq!(derive(body, "T", 160), "Actual opening paragraph....");
    }

    #[test]
    fn test_links_reduced_to_text() {
        let body = "Read [the guide](https://example.com/guide) before starting.";
        assert_eq!(
            derive(body, "T", 160),
            "Read the guide before starting...."
        );
    }

    #[test]
    fn test_truncates_at_word_boundary() {
        let body = "alpha beta gamma delta epsilon";
        // 13 chars lands inside "gamma"
        assert_eq!(derive(body, "T", 13), "alpha beta...");
        // 10 chars lands right after "beta"
        assert_eq!(derive(body, "T", 10), "alpha beta...");
    }

    #[test]
    fn test_fallback_when_no_prose() {
        assert_eq!(
            derive("# Only a heading\n\n![img](/x.png)", "My Post", 160),
            "Learn more about My Post..."
        );
    }

    #[test]
    fn test_read_time() {
        assert_eq!(read_time("", 200), "1 min read");
        assert_eq!(read_time(&"word ".repeat(200), 200), "1 min read");
        assert_eq!(read_time(&"word ".repeat(201), 200), "2 min read");
    }
}
