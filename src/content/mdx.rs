//! MDX module syntax in document bodies.
//!
//! A top-level line starting with `import ` or `export ` opens an ESM
//! block that runs up to the next blank line, so multi-line statements
//! such as `export const meta = {` ... `}` are dropped whole. Fenced code
//! is never touched.

/// `body` without its ESM blocks.
pub fn strip_esm(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut fence: Option<&str> = None;
    let mut in_esm = false;

    for line in body.lines() {
        if in_esm {
            in_esm = !line.trim().is_empty();
            continue;
        }

        let trimmed = line.trim_start();
        let marker = ["```", "~~~"].into_iter().find(|m| trimmed.starts_with(m));
        match (fence, marker) {
            (None, Some(m)) => fence = Some(m),
            (Some(open), Some(m)) if open == m => fence = None,
            (None, None) if is_esm_start(line) => {
                in_esm = true;
                continue;
            }
            _ => {}
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}

fn is_esm_start(line: &str) -> bool {
    line.starts_with("import ") || line.starts_with("export ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_statements() {
        let body = "import Chart from '../components/Chart'\n\nText\n\nexport const draft = false\n";
        assert_eq!(strip_esm(body), "Text\n\n");
    }

    #[test]
    fn test_multi_line_export_dropped_whole() {
        let body = "export const meta = {\n  title: 'x',\n  tags: ['a', 'b'],\n}\n\nBody text\n";
        assert_eq!(strip_esm(body), "Body text\n");
    }

    #[test]
    fn test_multi_line_import() {
        let body = "import {\n  Chart,\n  Table,\n} from '../components'\n\n## Heading\n";
        assert_eq!(strip_esm(body), "## Heading\n");
    }

    #[test]
    fn test_fenced_code_kept() {
        let body = "```js\nimport x from 'y'\nexport default x\n```\n";
        assert_eq!(strip_esm(body), body);
    }

    #[test]
    fn test_indented_or_inline_words_kept() {
        let body = "We import goods.\n  import indented\n";
        assert_eq!(strip_esm(body), body);
    }
}
