//! Page props: one JSON document per route and locale.
//!
//! ```text
//! Route ──► ContentIndex lookup ──► outline + HTML ──► PageProps ──► <output>/<locale>/<route>.json
//!                                                          ▲
//!                                   Translator::dictionary ┘
//! ```

mod builder;
mod outline;
mod render;
mod route;

pub use builder::{PageBuilder, PageOutcome};
pub use route::enumerate;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),

    #[error("failed to write `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to serialize page props")]
    Json(#[from] serde_json::Error),
}
