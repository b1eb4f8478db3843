//! `folio query`: print the page props of one route.

use anyhow::Result;
use serde_json::{Value, json};

use super::common::{load_catalogs, load_indexes, parse_pairs, resolve_locale, write_output};
use crate::cli::QueryArgs;
use crate::config::SiteConfig;
use crate::content::frontmatter::JsonMap;
use crate::log;
use crate::page::{PageBuilder, PageOutcome};

pub fn run_query(args: &QueryArgs, config: &SiteConfig) -> Result<()> {
    let locale = resolve_locale(config, args.locale.as_deref())?;
    let indexes = load_indexes(config)?;
    let catalogs = load_catalogs(config)?;

    let builder = PageBuilder::new(config, &catalogs, &indexes)
        .with_category(args.category.clone())
        .with_extra(extra_props(&args.props)?);

    let value = match builder.build_path(&args.path, &locale)? {
        PageOutcome::Found(props) => {
            let mut value = props.to_value()?;
            if args.no_dictionary
                && let Value::Object(map) = &mut value
            {
                map.remove("dictionary");
            }
            value
        }
        PageOutcome::NotFound => {
            log!("query"; "{} [{locale}] not found", args.path);
            json!({ "notFound": true })
        }
    };

    let text = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    write_output(None, &text)
}

/// `name=value` pairs; values that parse as JSON keep their type.
fn extra_props(pairs: &[String]) -> Result<JsonMap> {
    Ok(parse_pairs(pairs)?
        .into_iter()
        .map(|(name, raw)| {
            let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            (name, value)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_props_keep_json_types() {
        let props = extra_props(&[
            "preview=true".into(),
            "count=3".into(),
            "title=Hello world".into(),
        ])
        .unwrap();
        assert_eq!(props["preview"], json!(true));
        assert_eq!(props["count"], json!(3));
        assert_eq!(props["title"], json!("Hello world"));
    }
}
