//! Slugification for heading anchors and route keys.

use crate::config::{SlugConfig, SlugMode};

/// Characters forbidden in paths and fragments
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '(', ')', '[', ']', '"', '\'', '`', '\t', '\r', '\n',
];

/// Convert heading text to an anchor id based on config.
pub fn slugify_fragment(text: &str, config: &SlugConfig) -> String {
    slugify(text, &config.fragment, config.separator.as_char())
}

/// Slugify `text` with an explicit mode and separator.
pub fn slugify(text: &str, mode: &SlugMode, separator: char) -> String {
    match mode {
        SlugMode::Full => full(text, separator),
        SlugMode::Safe => safe(text, separator),
        SlugMode::No => text.trim().to_owned(),
    }
}

/// Transliterate to ASCII, lowercase, and collapse every run of
/// non-alphanumerics into one separator.
fn full(text: &str, separator: char) -> String {
    let ascii = deunicode::deunicode(text);
    let mut out = String::with_capacity(ascii.len());
    let mut pending = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending && !out.is_empty() {
                out.push(separator);
            }
            pending = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending = true;
        }
    }

    out
}

/// Keep Unicode, lowercase, drop forbidden characters, and join words with
/// the separator.
fn safe(text: &str, separator: char) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .flat_map(char::to_lowercase)
        .collect();

    let sep = separator.to_string();
    cleaned.split_whitespace().collect::<Vec<_>>().join(&sep)
}

/// Hands out unique ids within one document.
///
/// The first occurrence keeps the plain id; repeats get `-2`, `-3`, ...
#[derive(Debug, Default)]
pub struct UniqueIds {
    seen: rustc_hash::FxHashMap<String, usize>,
}

impl UniqueIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, base: String) -> String {
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            return base;
        }

        // A generated id may itself collide with a literal heading ("a-2").
        let mut n = *count;
        loop {
            let candidate = format!("{base}-{n}");
            if !self.seen.contains_key(&candidate) {
                self.seen.insert(candidate.clone(), 1);
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_basic() {
        assert_eq!(full("Section One", '-'), "section-one");
        assert_eq!(full("Sub Part", '-'), "sub-part");
    }

    #[test]
    fn test_full_punctuation_collapses() {
        assert_eq!(full("  What's new? (2024) ", '-'), "what-s-new-2024");
        assert_eq!(full("C++ & Rust", '_'), "c_rust");
    }

    #[test]
    fn test_full_transliterates_vietnamese() {
        assert_eq!(full("Giới thiệu", '-'), "gioi-thieu");
    }

    #[test]
    fn test_safe_preserves_unicode() {
        assert_eq!(safe("Giới Thiệu (mở đầu)", '-'), "giới-thiệu-mở-đầu");
    }

    #[test]
    fn test_no_mode_only_trims() {
        assert_eq!(slugify("  Keep Me ", &SlugMode::No, '-'), "Keep Me");
    }

    #[test]
    fn test_unique_ids_suffix_repeats() {
        let mut ids = UniqueIds::new();
        assert_eq!(ids.assign("intro".into()), "intro");
        assert_eq!(ids.assign("intro".into()), "intro-2");
        assert_eq!(ids.assign("intro".into()), "intro-3");
        assert_eq!(ids.assign("other".into()), "other");
    }

    #[test]
    fn test_unique_ids_avoid_literal_collision() {
        let mut ids = UniqueIds::new();
        assert_eq!(ids.assign("a-2".into()), "a-2");
        assert_eq!(ids.assign("a".into()), "a");
        assert_eq!(ids.assign("a".into()), "a-3");
    }
}
