//! Routes and path enumeration.
//!
//! ```text
//! Route::Page    { name: "index" }                      /           → <locale>/index.json
//! Route::Page    { name: "about" }                      /about      → <locale>/about.json
//! Route::Listing { collection: "posts", segment: "blog" }  /blog    → <locale>/blog.json
//! Route::Detail  { .., segment: "blog", key: "hello" }  /blog/hello → <locale>/blog/hello.json
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::ContentIndex;

/// Name of the static page served at `/`.
const HOME: &str = "index";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Route {
    /// Static page with no document behind it.
    Page { name: String },
    /// Collection listing.
    Listing { collection: String, segment: String },
    /// One document of a collection.
    Detail {
        collection: String,
        segment: String,
        key: String,
    },
}

impl Route {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Page { .. } => "page",
            Self::Listing { .. } => "listing",
            Self::Detail { .. } => "detail",
        }
    }

    /// URL path, always starting with `/`.
    pub fn path(&self) -> String {
        match self {
            Self::Page { name } if name == HOME => "/".to_string(),
            _ => format!("/{}", self.stem()),
        }
    }

    /// Output file path relative to the locale directory, without extension.
    fn stem(&self) -> String {
        match self {
            Self::Page { name } => name.clone(),
            Self::Listing { segment, .. } => segment.clone(),
            Self::Detail { segment, key, .. } => format!("{segment}/{key}"),
        }
    }

    /// Map a URL path to a route.
    ///
    /// Static pages win over collection segments. A detail route is
    /// returned for any key under a collection segment; whether the key
    /// exists is decided when the page is built.
    pub fn resolve(path: &str, config: &SiteConfig) -> Option<Self> {
        let trimmed = path.trim_matches('/');
        let name = if trimmed.is_empty() { HOME } else { trimmed };

        if config.build.pages.iter().any(|p| p == name) {
            return Some(Self::Page {
                name: name.to_string(),
            });
        }

        let mut parts = trimmed.split('/');
        let segment = parts.next()?;
        let collection = config.content.collection_by_route(segment)?;
        match (parts.next(), parts.next()) {
            (None, _) => Some(Self::Listing {
                collection: collection.name.clone(),
                segment: segment.to_string(),
            }),
            (Some(key), None) if !key.is_empty() => Some(Self::Detail {
                collection: collection.name.clone(),
                segment: segment.to_string(),
                key: key.to_string(),
            }),
            _ => None,
        }
    }
}

/// A route paired with the locale it is built for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocalizedRoute {
    pub locale: String,
    #[serde(flatten)]
    pub route: Route,
}

impl LocalizedRoute {
    pub fn new(locale: impl Into<String>, route: Route) -> Self {
        Self {
            locale: locale.into(),
            route,
        }
    }

    pub fn path(&self) -> String {
        self.route.path()
    }

    /// `<locale>/<route>.json`, relative to the output directory.
    pub fn relative_file(&self) -> String {
        format!("{}/{}.json", self.locale, self.route.stem())
    }

    /// `<output>/<locale>/<route>.json`
    pub fn output_file(&self, output: &Path) -> PathBuf {
        output.join(self.relative_file())
    }
}

/// Every route of the site, locale by locale.
///
/// Per locale: static pages, then each collection's listing followed by
/// its detail routes in file order.
pub fn enumerate(config: &SiteConfig, indexes: &[ContentIndex]) -> Vec<LocalizedRoute> {
    let mut routes = Vec::new();

    for locale in config.locales() {
        for name in &config.build.pages {
            routes.push(LocalizedRoute::new(
                locale,
                Route::Page { name: name.clone() },
            ));
        }

        for index in indexes {
            let collection = index.name().to_string();
            let segment = index.collection().route_segment().to_string();

            routes.push(LocalizedRoute::new(
                locale,
                Route::Listing {
                    collection: collection.clone(),
                    segment: segment.clone(),
                },
            ));
            for key in index.keys() {
                routes.push(LocalizedRoute::new(
                    locale,
                    Route::Detail {
                        collection: collection.clone(),
                        segment: segment.clone(),
                        key: key.to_string(),
                    },
                ));
            }
        }
    }

    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_site_config;
    use crate::content::ContentStore;
    use std::fs;
    use tempfile::TempDir;

    const COLLECTIONS: &str = r#"
[build]
pages = ["index", "about"]

[[content.collections]]
name = "posts"
dir = "content/posts"
route = "blog"
"#;

    fn site(posts: &[&str]) -> (TempDir, SiteConfig, Vec<ContentIndex>) {
        let dir = TempDir::new().unwrap();
        let posts_dir = dir.path().join("content/posts");
        fs::create_dir_all(&posts_dir).unwrap();
        for slug in posts {
            fs::write(
                posts_dir.join(format!("{slug}.mdx")),
                format!("---\ntitle: {slug}\ndate: 2024-01-01\n---\nBody text.\n"),
            )
            .unwrap();
        }

        let config = test_site_config(dir.path(), COLLECTIONS);
        let store = ContentStore::load(&config.content.collections[0], false).unwrap();
        let index = ContentIndex::build(store, &config).unwrap();
        (dir, config, vec![index])
    }

    #[test]
    fn test_detail_paths_are_documents_times_locales() {
        let (_dir, config, indexes) = site(&["a", "b", "c"]);
        let routes = enumerate(&config, &indexes);

        let details = routes
            .iter()
            .filter(|r| matches!(r.route, Route::Detail { .. }))
            .count();
        assert_eq!(details, 3 * config.locales().len());

        let listings = routes.iter().filter(|r| r.route.kind() == "listing").count();
        assert_eq!(listings, config.locales().len());
        let pages = routes.iter().filter(|r| r.route.kind() == "page").count();
        assert_eq!(pages, 2 * config.locales().len());
    }

    #[test]
    fn test_paths_and_output_files() {
        let (dir, config, indexes) = site(&["hello-world"]);
        let routes = enumerate(&config, &indexes);
        let paths: Vec<_> = routes
            .iter()
            .filter(|r| r.locale == "vi")
            .map(LocalizedRoute::path)
            .collect();
        assert_eq!(paths, ["/", "/about", "/blog", "/blog/hello-world"]);

        let out = dir.path().join("build");
        let detail = routes.iter().find(|r| r.locale == "vi" && r.route.kind() == "detail");
        assert_eq!(
            detail.unwrap().output_file(&out),
            out.join("vi/blog/hello-world.json")
        );
        assert_eq!(routes[0].output_file(&out), out.join("en/index.json"));
    }

    #[test]
    fn test_resolve() {
        let (_dir, config, _) = site(&[]);
        assert_eq!(
            Route::resolve("/", &config),
            Some(Route::Page {
                name: "index".into()
            })
        );
        assert_eq!(Route::resolve("/about/", &config).unwrap().kind(), "page");
        assert_eq!(Route::resolve("/blog", &config).unwrap().kind(), "listing");
        assert_eq!(
            Route::resolve("/blog/anything", &config),
            Some(Route::Detail {
                collection: "posts".into(),
                segment: "blog".into(),
                key: "anything".into()
            })
        );
        assert_eq!(Route::resolve("/content/does-not-exist", &config), None);
        assert_eq!(Route::resolve("/blog/a/b", &config), None);
    }
}
