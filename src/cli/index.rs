//! `folio index`: write listing manifests.

use anyhow::{Context, Result, bail};

use super::common::load_indexes;
use crate::cli::IndexArgs;
use crate::config::SiteConfig;
use crate::content::ContentIndex;
use crate::log;
use crate::utils::plural_count;

pub fn run_index(args: &IndexArgs, config: &SiteConfig) -> Result<()> {
    let indexes = load_indexes(config)?;
    let mut outdated = 0;

    for index in &indexes {
        if !index.collection().generate {
            check_authored(index, config)?;
            continue;
        }
        if args.check {
            outdated += usize::from(!check_generated(index, config)?);
        } else {
            write_generated(index, config)?;
        }
    }

    if outdated > 0 {
        bail!("{} out of date, run `folio index`", plural_count(outdated, "manifest"));
    }
    Ok(())
}

/// Regenerate one manifest and log added and stale entries.
pub(super) fn write_generated(index: &ContentIndex, config: &SiteConfig) -> Result<()> {
    let diff = index
        .write_manifest()
        .with_context(|| format!("failed to write manifest for '{}'", index.name()))?;
    let path = config.root_relative(index.manifest_path());

    if !diff.changed {
        log!("index"; "{} unchanged ({})", path.display(), plural_count(index.entries().len(), "item"));
        return Ok(());
    }

    log!("index"; "wrote {} ({})", path.display(), plural_count(index.entries().len(), "item"));
    for key in &diff.added {
        crate::debug!("index"; "+ {key}");
    }
    for key in &diff.stale {
        log!("index"; "dropped stale entry '{key}'");
    }
    Ok(())
}

/// Whether the manifest on disk matches what `write_generated` would write.
fn check_generated(index: &ContentIndex, config: &SiteConfig) -> Result<bool> {
    let path = index.manifest_path();
    let current = std::fs::read_to_string(path).ok();
    let json = index.manifest_json()?;
    let relative = config.root_relative(path);

    if current.as_deref() == Some(json.as_str()) {
        log!("index"; "{} up to date", relative.display());
        return Ok(true);
    }

    let report = index.check_manifest()?;
    log!(
        "index";
        "{} out of date: {} to add, {} stale",
        relative.display(),
        report.orphan_files.len(),
        report.orphan_entries.len()
    );
    Ok(false)
}

/// Hand-authored manifests are only checked for orphans.
fn check_authored(index: &ContentIndex, config: &SiteConfig) -> Result<()> {
    let report = index.check_manifest()?;
    let path = config.root_relative(index.manifest_path());
    if report.is_clean() {
        log!("index"; "{} is hand-authored, {} in sync", path.display(), plural_count(index.keys().len(), "document"));
        return Ok(());
    }
    for key in &report.orphan_entries {
        log!("warning"; "{}: entry '{key}' has no document", path.display());
    }
    for key in &report.orphan_files {
        log!("warning"; "{}: document '{key}' has no entry", path.display());
    }
    Ok(())
}
