//! Content dates from front-matter.
//!
//! Authors write dates in a few shapes; all of them normalize to a
//! calendar date used for ordering and locale formatting.
//!
//! ```ignore
//! ContentDate::parse("2024-02-08")            // ISO date
//! ContentDate::parse("2024-02-08T10:00:00Z")  // RFC 3339
//! ContentDate::parse("February 8, 2024")      // long English form
//! ```

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate};

/// Accepted `strftime` shapes, tried in order after RFC 3339.
const FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

/// A calendar date without time or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentDate(NaiveDate);

impl ContentDate {
    #[cfg(test)]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a front-matter date string.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.date_naive()));
        }

        FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .map(Self)
    }

    /// Local calendar date of the running process.
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// `YYYY-MM-DD`
    pub fn to_iso(self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for ContentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
