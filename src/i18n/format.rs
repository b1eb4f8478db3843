//! Locale-aware formatting of dates and numbers.
//!
//! | Locale | Date               | Number    |
//! |--------|--------------------|-----------|
//! | `en`   | `February 8, 2024` | `1,234.5` |
//! | `vi`   | `8 tháng 2, 2024`  | `1.234,5` |
//!
//! Other locales use the English forms.

use crate::utils::date::ContentDate;

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Fraction digits kept before trailing zeros are dropped.
const MAX_FRACTION_DIGITS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    English,
    Vietnamese,
}

impl Style {
    /// Match on the primary subtag (`vi-VN` → `vi`).
    fn of(locale: &str) -> Self {
        match locale.split(['-', '_']).next() {
            Some(primary) if primary.eq_ignore_ascii_case("vi") => Self::Vietnamese,
            _ => Self::English,
        }
    }

    const fn separators(self) -> (char, char) {
        match self {
            Self::English => (',', '.'),
            Self::Vietnamese => ('.', ','),
        }
    }
}

/// Long date form for `locale`.
pub fn format_date(date: ContentDate, locale: &str) -> String {
    match Style::of(locale) {
        Style::English => format!(
            "{} {}, {}",
            EN_MONTHS[date.month() as usize - 1],
            date.day(),
            date.year()
        ),
        Style::Vietnamese => format!("{} tháng {}, {}", date.day(), date.month(), date.year()),
    }
}

/// Parse `raw` and format it; unparseable input is returned unchanged.
pub fn format_date_str(raw: &str, locale: &str) -> String {
    ContentDate::parse(raw).map_or_else(|| raw.to_string(), |d| format_date(d, locale))
}

/// Grouped number with at most three fraction digits.
pub fn format_number(value: f64, locale: &str) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let (group, decimal) = Style::of(locale).separators();
    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int.len() / 3 + 1);
    if value < 0.0 && (int != "0" || !frac.is_empty()) {
        out.push('-');
    }
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(group);
        }
        out.push(c);
    }
    if !frac.is_empty() {
        out.push(decimal);
        out.push_str(frac);
    }
    out
}
