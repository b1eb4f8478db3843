//! Common utilities shared across CLI commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::SiteConfig;
use crate::content::{ContentIndex, ContentStore};
use crate::i18n::CatalogStore;
use crate::log;
use crate::settings::{Preferences, env_lang};
use crate::utils::plural_count;

/// Load and index every configured collection.
///
/// Per-document warnings are logged; structural errors abort.
pub fn load_indexes(config: &SiteConfig) -> Result<Vec<ContentIndex>> {
    let mut indexes = Vec::with_capacity(config.content.collections.len());

    for collection in &config.content.collections {
        let store = ContentStore::load(collection, config.build.drafts)
            .with_context(|| format!("failed to load collection '{}'", collection.name))?;
        let drafts = store.draft_count();
        let index = ContentIndex::build(store, config)
            .with_context(|| format!("failed to index collection '{}'", collection.name))?;

        for warning in index.warnings() {
            log!(
                "warning";
                "{}: {}",
                config.root_relative(&warning.path).display(),
                warning.message
            );
        }
        crate::debug!(
            "index";
            "{}: {} ({} skipped as drafts)",
            collection.name,
            plural_count(index.documents().len(), "document"),
            drafts
        );
        indexes.push(index);
    }

    Ok(indexes)
}

pub fn load_catalogs(config: &SiteConfig) -> Result<CatalogStore> {
    let store = CatalogStore::load(&config.i18n).context("failed to load translations")?;
    for path in store.missing_files() {
        log!("warning"; "missing catalog {}", config.root_relative(path).display());
    }
    Ok(store)
}

/// The requested locale if supported, else the negotiated one.
pub fn resolve_locale(config: &SiteConfig, requested: Option<&str>) -> Result<String> {
    if let Some(locale) = requested {
        if !config.i18n.is_supported(locale) {
            bail!(
                "unsupported locale '{locale}' (supported: {})",
                config.locales().join(", ")
            );
        }
        return Ok(locale.to_string());
    }

    let prefs = Preferences::load(&config.state_dir())?;
    Ok(prefs.negotiate_locale(&config.i18n, env_lang().as_deref()))
}

/// Split `name=value` arguments.
pub fn parse_pairs(args: &[String]) -> Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok((name.trim().to_string(), value.to_string()))
            }
            _ => bail!("expected NAME=VALUE, got '{arg}'"),
        })
        .collect()
}

/// Write `content` to `path`, or to stdout when `path` is `None`.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                out.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs(&["name=Vu".into(), "empty=".into(), "eq=a=b".into()]).unwrap();
        assert_eq!(
            pairs,
            [
                ("name".to_string(), "Vu".to_string()),
                ("empty".to_string(), String::new()),
                ("eq".to_string(), "a=b".to_string()),
            ]
        );
        assert!(parse_pairs(&["novalue".into()]).is_err());
        assert!(parse_pairs(&["=x".into()]).is_err());
    }
}
