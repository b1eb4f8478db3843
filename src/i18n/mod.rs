//! Locale catalogs and translation resolution.
//!
//! # Module Structure
//!
//! | Module     | Purpose                                               |
//! |------------|-------------------------------------------------------|
//! | `catalog`  | One flattened `<locale>/<namespace>.json` file        |
//! | `store`    | All catalogs of a run, loaded once                    |
//! | `resolve`  | Fallback lookup and `{{name}}` interpolation          |
//! | `format`   | Locale-aware date and number formatting               |
//! | `validate` | Key coverage of each locale against the canonical one |
//! | `exchange` | Flat JSON or CSV translation table export and import  |

pub mod catalog;
pub mod exchange;
pub mod format;
pub mod resolve;
pub mod store;
pub mod validate;

pub use catalog::Catalog;
pub use resolve::Translator;
pub use store::CatalogStore;
pub use validate::CoverageReport;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("canonical catalog `{0}` not found")]
    MissingCanonical(PathBuf),

    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("catalog `{0}` must be a JSON object")]
    NotAnObject(PathBuf),

    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),

    #[error("translation table must map keys to {{locale: value}} objects")]
    InvalidTable,

    #[error("spreadsheet has no `{0}` column")]
    MissingColumn(&'static str),

    #[error("invalid spreadsheet")]
    Csv(#[from] csv::Error),
}
