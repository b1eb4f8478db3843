//! `folio validate`: content, manifests and translation coverage.

mod report;

use anyhow::{Result, bail};

use crate::cli::ValidateArgs;
use crate::config::SiteConfig;
use crate::content::{ContentIndex, ContentStore};
use crate::i18n::{CatalogStore, validate::check};
use crate::log;
use crate::utils::plural_count;

pub use report::ValidationReport;

pub fn validate_site(args: &ValidateArgs, config: &SiteConfig) -> Result<()> {
    log!(
        "validate";
        "checking {} and {}",
        plural_count(config.content.collections.len(), "collection"),
        plural_count(config.locales().len(), "locale")
    );

    let mut report = ValidationReport::default();
    check_routes(config, &mut report);
    for collection in &config.content.collections {
        check_collection(config, collection, &mut report);
    }
    check_translations(config, !args.warn_only, &mut report);

    report.print();
    if report.has_errors() || report.warning_count() > 0 {
        eprintln!();
    }
    log!("validate"; "{report}");

    if report.has_errors() && !args.warn_only {
        bail!("validation failed");
    }
    Ok(())
}

/// A static page must not shadow a collection route.
fn check_routes(config: &SiteConfig, report: &mut ValidationReport) {
    for page in &config.build.pages {
        if let Some(collection) = config.content.collection_by_route(page) {
            report.add_error(
                "build.pages",
                format!("'{page}'"),
                format!("shadows the listing of collection '{}'", collection.name),
            );
        }
    }
}

fn check_collection(
    config: &SiteConfig,
    collection: &crate::config::CollectionConfig,
    report: &mut ValidationReport,
) {
    let source = format!("collection {}", collection.name);

    let index = ContentStore::load(collection, config.build.drafts)
        .and_then(|store| ContentIndex::build(store, config));
    let index = match index {
        Ok(index) => index,
        Err(err) => {
            report.add_error(source, err.to_string(), "");
            return;
        }
    };

    for warning in index.warnings() {
        report.add_warning(
            config.root_relative(&warning.path).display().to_string(),
            &warning.message,
            "",
        );
    }

    let manifest = config.root_relative(index.manifest_path()).display().to_string();
    if collection.generate && !index.manifest_path().exists() {
        report.add_warning(manifest, "not generated yet", "run `folio index`");
        return;
    }

    match index.check_manifest() {
        Ok(manifest_report) => {
            for key in &manifest_report.orphan_entries {
                report.add_error(&manifest, format!("'{key}'"), "entry has no document");
            }
            for key in &manifest_report.orphan_files {
                report.add_error(&manifest, format!("'{key}'"), "document has no entry");
            }
        }
        Err(err) => report.add_error(manifest, err.to_string(), ""),
    }
}

fn check_translations(config: &SiteConfig, missing_file_is_error: bool, report: &mut ValidationReport) {
    match CatalogStore::load(&config.i18n) {
        Ok(store) => report.add_coverage(&check(&store), missing_file_is_error),
        Err(err) => report.add_error("i18n", err.to_string(), ""),
    }
}
