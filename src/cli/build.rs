//! `folio build`: manifests plus page props for every route and locale.

use std::fs;
use std::time::Instant;

use anyhow::{Context, Result};

use super::common::{load_catalogs, load_indexes};
use super::index::write_generated;
use crate::config::SiteConfig;
use crate::log;
use crate::page::{PageBuilder, enumerate};
use crate::utils::plural_count;

pub fn build_site(config: &SiteConfig) -> Result<()> {
    let started = Instant::now();
    let output = &config.build.output;

    if config.build.clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clean {}", output.display()))?;
        crate::debug!("build"; "cleaned {}", config.root_relative(output).display());
    }

    let indexes = load_indexes(config)?;
    for index in indexes.iter().filter(|i| i.collection().generate) {
        write_generated(index, config)?;
    }

    let catalogs = load_catalogs(config)?;
    let routes = enumerate(config, &indexes);
    let summary = PageBuilder::new(config, &catalogs, &indexes).write_site(&routes)?;

    for route in &summary.not_found {
        log!("warning"; "no page for {route}");
    }
    log!(
        "build";
        "wrote {} for {} in {:.2?}",
        plural_count(summary.written, "page"),
        plural_count(config.locales().len(), "locale"),
        started.elapsed()
    );
    Ok(())
}
