//! Page props assembly and output.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use super::outline::Heading;
use super::render::render;
use super::route::{LocalizedRoute, Route};
use super::PageError;
use crate::config::SiteConfig;
use crate::content::frontmatter::{FrontMatter, JsonMap};
use crate::content::{Author, ContentIndex, Document, Listing};
use crate::i18n::format::format_date_str;
use crate::i18n::{CatalogStore, Translator};
use crate::logger::ProgressLine;

/// Result of building one route.
#[derive(Debug, Clone)]
pub enum PageOutcome {
    Found(Box<PageProps>),
    NotFound,
}

impl PageOutcome {
    #[cfg(test)]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Everything the render layer needs for one route in one locale.
///
/// `extra` is merged over the serialized props, so caller props win.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    pub locale: String,
    pub locales: Vec<String>,
    pub route: String,
    pub site: SiteProps,
    #[serde(flatten)]
    pub content: PageContent,
    pub dictionary: Value,
    #[serde(skip)]
    pub extra: JsonMap,
}

impl PageProps {
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            for (key, extra) in &self.extra {
                map.insert(key.clone(), extra.clone());
            }
        }
        Ok(value)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteProps {
    pub title: String,
    pub url: Option<String>,
    pub author: Author,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageContent {
    Page {
        name: String,
    },
    Listing {
        collection: String,
        listing: Listing,
    },
    Detail {
        collection: String,
        document: Box<DetailProps>,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailProps {
    pub key: String,
    pub slug: String,
    pub front_matter: FrontMatter,
    /// The document's listing entry, with a locale-formatted date.
    pub entry: Option<Value>,
    pub outline: Vec<Heading>,
    pub html: String,
}

/// Outcome counts of [`PageBuilder::write_site`].
#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    pub written: usize,
    /// `<locale> <path>` of every route that produced no file.
    pub not_found: Vec<String>,
    pub routes_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Status {
    Ok,
    NotFound,
}

#[derive(Serialize)]
struct RouteRecord<'r> {
    #[serde(flatten)]
    route: &'r LocalizedRoute,
    path: String,
    file: Option<String>,
    status: Status,
}

/// Builds page props from loaded indexes and catalogs.
///
/// Holds only shared references, so one builder serves every rayon worker.
pub struct PageBuilder<'a> {
    config: &'a SiteConfig,
    catalogs: &'a CatalogStore,
    indexes: &'a [ContentIndex],
    category: Option<String>,
    extra: JsonMap,
}

impl<'a> PageBuilder<'a> {
    pub fn new(config: &'a SiteConfig, catalogs: &'a CatalogStore, indexes: &'a [ContentIndex]) -> Self {
        Self {
            config,
            catalogs,
            indexes,
            category: None,
            extra: JsonMap::new(),
        }
    }

    /// Category filter for listing pages.
    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Props merged over every page; they override built props.
    pub fn with_extra(mut self, extra: JsonMap) -> Self {
        self.extra = extra;
        self
    }

    fn index(&self, collection: &str) -> Option<&'a ContentIndex> {
        self.indexes.iter().find(|i| i.name() == collection)
    }

    /// Build the props of `path` (e.g. `/blog/hello-world`).
    pub fn build_path(&self, path: &str, locale: &str) -> Result<PageOutcome, PageError> {
        match Route::resolve(path, self.config) {
            Some(route) => self.build(&route, locale),
            None => {
                self.check_locale(locale)?;
                Ok(PageOutcome::NotFound)
            }
        }
    }

    pub fn build(&self, route: &Route, locale: &str) -> Result<PageOutcome, PageError> {
        self.check_locale(locale)?;

        let content = match route {
            Route::Page { name } => PageContent::Page { name: name.clone() },
            Route::Listing { collection, .. } => {
                let Some(index) = self.index(collection) else {
                    return Ok(PageOutcome::NotFound);
                };
                let entries = index
                    .listing()
                    .into_iter()
                    .map(|entry| localize_entry(entry, locale))
                    .collect();
                PageContent::Listing {
                    collection: collection.clone(),
                    listing: Listing::new(entries, self.category.as_deref()),
                }
            }
            Route::Detail { collection, key, .. } => {
                let Some((index, doc)) = self
                    .index(collection)
                    .and_then(|index| Some((index, index.get(key)?)))
                else {
                    return Ok(PageOutcome::NotFound);
                };
                PageContent::Detail {
                    collection: collection.clone(),
                    document: Box::new(self.detail(index, doc, key, locale)),
                }
            }
        };

        let site = &self.config.site;
        Ok(PageOutcome::Found(Box::new(PageProps {
            locale: locale.to_string(),
            locales: self.catalogs.locales().to_vec(),
            route: route.path(),
            site: SiteProps {
                title: site.title.clone(),
                url: site.url.clone(),
                author: Author {
                    name: site.author.name.clone(),
                    avatar: site.author.avatar.clone(),
                },
            },
            content,
            dictionary: Translator::new(self.catalogs, locale).dictionary(),
            extra: self.extra.clone(),
        })))
    }

    fn check_locale(&self, locale: &str) -> Result<(), PageError> {
        if self.catalogs.is_supported(locale) {
            Ok(())
        } else {
            Err(PageError::UnsupportedLocale(locale.to_string()))
        }
    }

    fn detail(&self, index: &ContentIndex, doc: &Document, key: &str, locale: &str) -> DetailProps {
        let rendered = render(&doc.body, &self.config.build.slug);
        let entry = index
            .listing()
            .into_iter()
            .find(|entry| entry_matches(entry, doc, key))
            .map(|entry| localize_entry(entry, locale));

        DetailProps {
            key: key.to_string(),
            slug: doc.slug.clone(),
            front_matter: doc.meta.clone(),
            entry,
            outline: rendered.outline,
            html: rendered.html,
        }
    }

    /// A route that fails is logged and counted as not found.
    fn build_logged(&self, route: &LocalizedRoute) -> PageOutcome {
        self.build(&route.route, &route.locale)
            .unwrap_or_else(|err| {
                crate::log!("error"; "{} [{}]: {err}", route.path(), route.locale);
                PageOutcome::NotFound
            })
    }

    /// Build and write every route, then `<output>/routes.json`.
    pub fn write_site(&self, routes: &[LocalizedRoute]) -> Result<BuildSummary, PageError> {
        let output = &self.config.build.output;
        let progress = ProgressLine::new(&[("pages", routes.len())]);

        let statuses: Vec<Status> = routes
            .par_iter()
            .map(|route| {
                let status = match self.build_logged(route) {
                    PageOutcome::Found(props) => match write_props(output, route, &props) {
                        Ok(()) => Status::Ok,
                        Err(err) => {
                            crate::log!("error"; "{} [{}]: {err}", route.path(), route.locale);
                            Status::NotFound
                        }
                    },
                    PageOutcome::NotFound => Status::NotFound,
                };
                progress.inc("pages");
                status
            })
            .collect();
        progress.finish();

        let records: Vec<RouteRecord> = routes
            .iter()
            .zip(&statuses)
            .map(|(route, &status)| RouteRecord {
                route,
                path: route.path(),
                file: (status == Status::Ok).then(|| route.relative_file()),
                status,
            })
            .collect();
        let routes_file = output.join("routes.json");
        write_json(&routes_file, &serde_json::to_value(&records)?)?;

        let not_found = routes
            .iter()
            .zip(&statuses)
            .filter(|(_, status)| **status == Status::NotFound)
            .map(|(route, _)| format!("{} {}", route.locale, route.path()))
            .collect();

        Ok(BuildSummary {
            written: statuses.iter().filter(|s| **s == Status::Ok).count(),
            not_found,
            routes_file,
        })
    }
}

fn write_props(output: &Path, route: &LocalizedRoute, props: &PageProps) -> Result<(), PageError> {
    write_json(&route.output_file(output), &props.to_value()?)
}

fn write_json(path: &Path, value: &Value) -> Result<(), PageError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| PageError::Io(parent.to_path_buf(), err))?;
    }
    fs::write(path, json).map_err(|err| PageError::Io(path.to_path_buf(), err))
}

/// Hand-authored entries may carry a numeric `id`.
fn entry_matches(entry: &Value, doc: &Document, key: &str) -> bool {
    if entry.get("slug").and_then(Value::as_str) == Some(doc.slug.as_str()) {
        return true;
    }
    match entry.get("id") {
        Some(Value::String(id)) => id == key,
        Some(Value::Number(id)) => id.to_string() == key,
        _ => false,
    }
}

/// Add `formattedDate` for `locale` next to the raw `date`.
fn localize_entry(mut entry: Value, locale: &str) -> Value {
    let formatted = entry
        .get("date")
        .and_then(Value::as_str)
        .map(|date| format_date_str(date, locale));
    if let (Some(formatted), Value::Object(map)) = (formatted, &mut entry) {
        map.insert("formattedDate".into(), Value::String(formatted));
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_site_config;
    use crate::content::ContentStore;
    use crate::i18n::Catalog;
    use crate::page::enumerate;
    use serde_json::json;
    use tempfile::TempDir;

    const CONFIG: &str = r#"
[build]
pages = ["index"]
today = "2024-06-01"

[[content.collections]]
name = "posts"
dir = "content/posts"
route = "blog"
"#;

    struct Site {
        _dir: TempDir,
        config: SiteConfig,
        catalogs: CatalogStore,
        indexes: Vec<ContentIndex>,
    }

    fn site() -> Site {
        let dir = TempDir::new().unwrap();
        let posts = dir.path().join("content/posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("hello-world.mdx"),
            "---\ntitle: Hello\ndate: 2024-02-08\ncategory: Technology\n---\n\n## Section One\n\nText.\n\n### Sub Part\n",
        )
        .unwrap();
        fs::write(
            posts.join("older.md"),
            "---\ntitle: Older\ndate: 2023-01-01\ncategory: Engineering\n---\n\nOld text here.\n",
        )
        .unwrap();

        let config = test_site_config(dir.path(), CONFIG);
        let store = ContentStore::load(&config.content.collections[0], false).unwrap();
        let indexes = vec![ContentIndex::build(store, &config).unwrap()];
        let catalogs = CatalogStore::from_catalogs(
            &config.i18n,
            [
                (
                    "en".to_string(),
                    "common".to_string(),
                    Catalog::from_json(&json!({
                        "nav": {"blog": "Blog"},
                        "footer": {"privacyPolicy": "Privacy Policy"}
                    })),
                ),
                (
                    "vi".to_string(),
                    "common".to_string(),
                    Catalog::from_json(&json!({"nav": {"blog": "Nhật ký"}})),
                ),
            ],
        );

        Site {
            _dir: dir,
            config,
            catalogs,
            indexes,
        }
    }

    fn found(outcome: PageOutcome) -> PageProps {
        match outcome {
            PageOutcome::Found(props) => *props,
            PageOutcome::NotFound => panic!("expected a page"),
        }
    }

    #[test]
    fn test_detail_props() {
        let site = site();
        let builder = PageBuilder::new(&site.config, &site.catalogs, &site.indexes);
        let props = found(builder.build_path("/blog/hello-world", "vi").unwrap());

        let PageContent::Detail { document, .. } = &props.content else {
            panic!("expected a detail page");
        };
        assert_eq!(document.slug, "hello-world");
        assert!(document.html.contains(r#"<h2 id="section-one">"#));
        assert_eq!(document.outline.len(), 2);
        assert_eq!(document.outline[1].id, "sub-part");

        let entry = document.entry.as_ref().unwrap();
        assert_eq!(entry["formattedDate"], "8 tháng 2, 2024");

        let value = props.to_value().unwrap();
        assert_eq!(value["kind"], "detail");
        assert_eq!(value["route"], "/blog/hello-world");
        assert_eq!(value["dictionary"]["common"]["nav"]["blog"], "Nhật ký");
        assert_eq!(
            value["dictionary"]["common"]["footer"]["privacyPolicy"],
            "Privacy Policy"
        );
    }

    #[test]
    fn test_not_found() {
        let site = site();
        let builder = PageBuilder::new(&site.config, &site.catalogs, &site.indexes);
        assert!(!builder.build_path("/content/does-not-exist", "en").unwrap().is_found());
        assert!(!builder.build_path("/blog/does-not-exist", "en").unwrap().is_found());
    }

    #[test]
    fn test_unsupported_locale() {
        let site = site();
        let builder = PageBuilder::new(&site.config, &site.catalogs, &site.indexes);
        assert!(matches!(
            builder.build_path("/", "fr"),
            Err(PageError::UnsupportedLocale(_))
        ));
    }

    #[test]
    fn test_listing_excludes_featured() {
        let site = site();
        let builder = PageBuilder::new(&site.config, &site.catalogs, &site.indexes)
            .with_category(Some("Technology".into()));
        let props = found(builder.build_path("/blog", "en").unwrap());

        let PageContent::Listing { listing, .. } = &props.content else {
            panic!("expected a listing");
        };
        assert_eq!(listing.featured.as_ref().unwrap()["slug"], "hello-world");
        assert!(listing.grid.is_empty());
        assert_eq!(listing.active_category, "Technology");
    }

    #[test]
    fn test_extra_props_override() {
        let site = site();
        let mut extra = JsonMap::new();
        extra.insert("locale".into(), json!("override"));
        extra.insert("preview".into(), json!(true));
        let builder =
            PageBuilder::new(&site.config, &site.catalogs, &site.indexes).with_extra(extra);

        let value = found(builder.build_path("/", "en").unwrap()).to_value().unwrap();
        assert_eq!(value["locale"], "override");
        assert_eq!(value["preview"], true);
        assert_eq!(value["kind"], "page");
    }

    #[test]
    fn test_write_site() {
        let site = site();
        let builder = PageBuilder::new(&site.config, &site.catalogs, &site.indexes);
        let routes = enumerate(&site.config, &site.indexes);
        let summary = builder.write_site(&routes).unwrap();

        // index + listing + 2 posts, per locale
        assert_eq!(summary.written, 8);
        assert!(summary.not_found.is_empty());

        let output = &site.config.build.output;
        assert!(output.join("vi/blog/hello-world.json").is_file());
        assert!(output.join("en/index.json").is_file());

        let routes: Value =
            serde_json::from_str(&fs::read_to_string(&summary.routes_file).unwrap()).unwrap();
        assert_eq!(routes.as_array().unwrap().len(), 8);
        assert_eq!(routes[0]["status"], "ok");
        assert_eq!(routes[0]["file"], "en/index.json");
    }
}
