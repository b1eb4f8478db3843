//! Configuration section definitions.
//!
//! Each module corresponds to a section in `folio.toml`:
//!
//! | Module    | TOML Section | Purpose                                 |
//! |-----------|--------------|-----------------------------------------|
//! | `api`     | `[api]`      | Backend endpoint for forms and chat     |
//! | `build`   | `[build]`    | Output, static pages, slugs, drafts     |
//! | `content` | `[content]`  | Collections and indexing defaults       |
//! | `i18n`    | `[i18n]`     | Locales, namespaces, catalog directory  |
//! | `site`    | `[site]`     | Site title, URL, default author         |

mod api;
mod build;
mod content;
mod i18n;
mod site;

pub use api::ApiConfig;
pub use build::{BuildSectionConfig, SlugConfig, SlugMode, SlugSeparator};
pub use content::{CollectionConfig, ContentConfig, RouteKey};
pub use i18n::I18nConfig;
pub use site::{AuthorConfig, SiteSectionConfig};
