//! `folio routes`: list what a build would produce.

use anyhow::Result;

use super::common::{load_indexes, write_output};
use crate::config::SiteConfig;
use crate::page::enumerate;

pub fn list_routes(config: &SiteConfig, locale: Option<&str>, json: bool) -> Result<()> {
    let indexes = load_indexes(config)?;
    let routes: Vec<_> = enumerate(config, &indexes)
        .into_iter()
        .filter(|r| locale.is_none_or(|l| r.locale == l))
        .collect();

    let text = if json {
        serde_json::to_string_pretty(&routes)?
    } else {
        routes
            .iter()
            .map(|r| format!("{}\t{}\t{}", r.locale, r.route.kind(), r.path()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    write_output(None, &text)
}
