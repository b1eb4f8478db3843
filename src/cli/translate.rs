//! `folio t`: resolve one translation key.

use anyhow::Result;

use super::common::{load_catalogs, parse_pairs, resolve_locale, write_output};
use crate::config::SiteConfig;
use crate::i18n::Translator;
use crate::i18n::resolve::interpolate;

pub fn translate(
    config: &SiteConfig,
    key: &str,
    locale: Option<&str>,
    default: Option<&str>,
    args: &[String],
) -> Result<()> {
    let locale = resolve_locale(config, locale)?;
    let catalogs = load_catalogs(config)?;
    let resolution = Translator::new(&catalogs, &locale).resolve(key, default);
    crate::debug!("i18n"; "{key} [{locale}] resolved from {:?}", resolution.source);

    let pairs = parse_pairs(args)?;
    let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    write_output(None, &interpolate(&resolution.value, &pairs))
}
