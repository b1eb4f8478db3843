//! Listing view: featured entry, grid, and category filter.

use serde::Serialize;
use serde_json::Value;

/// Category filter value that selects everything.
pub const ALL: &str = "all";

/// A collection listing as page props.
///
/// The featured entry is the most recent one and never appears in the
/// grid, whether or not a category filter is active.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub featured: Option<Value>,
    pub grid: Vec<Value>,
    /// Distinct categories in listing order.
    pub categories: Vec<String>,
    pub active_category: String,
}

impl Listing {
    /// `entries` must already be in listing order (newest first).
    pub fn new(entries: Vec<Value>, category: Option<&str>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for entry in &entries {
            if let Some(c) = category_of(entry)
                && !categories.iter().any(|known| known == c)
            {
                categories.push(c.to_string());
            }
        }

        let filter = category.filter(|c| !c.eq_ignore_ascii_case(ALL));
        let mut entries = entries.into_iter();
        let featured = entries.next();
        let grid = entries
            .filter(|entry| filter.is_none_or(|f| category_of(entry) == Some(f)))
            .collect();

        Self {
            featured,
            grid,
            categories,
            active_category: filter.unwrap_or(ALL).to_string(),
        }
    }
}

fn category_of(entry: &Value) -> Option<&str> {
    entry.get("category").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries() -> Vec<Value> {
        vec![
            json!({"slug": "newest", "category": "Technology"}),
            json!({"slug": "b", "category": "Engineering"}),
            json!({"slug": "c", "category": "Technology"}),
        ]
    }

    fn slugs(values: &[Value]) -> Vec<&str> {
        values.iter().map(|v| v["slug"].as_str().unwrap()).collect()
    }

    #[test]
    fn test_featured_excluded_from_grid() {
        let listing = Listing::new(entries(), None);
        assert_eq!(listing.featured.as_ref().unwrap()["slug"], "newest");
        assert_eq!(slugs(&listing.grid), ["b", "c"]);
        assert_eq!(listing.categories, ["Technology", "Engineering"]);
        assert_eq!(listing.active_category, "all");
    }

    #[test]
    fn test_featured_excluded_with_filter() {
        let listing = Listing::new(entries(), Some("Technology"));
        assert_eq!(slugs(&listing.grid), ["c"]);
        assert_eq!(listing.active_category, "Technology");

        let listing = Listing::new(entries(), Some("All"));
        assert_eq!(slugs(&listing.grid), ["b", "c"]);
    }

    #[test]
    fn test_empty() {
        let listing = Listing::new(Vec::new(), None);
        assert!(listing.featured.is_none());
        assert!(listing.grid.is_empty());
    }
}
