//! `folio i18n`: export, import and coverage of translation catalogs.

use std::fs;

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;

use super::common::{load_catalogs, write_output};
use super::validate::ValidationReport;
use crate::cli::I18nCommand;
use crate::config::SiteConfig;
use crate::i18n::format::format_number;
use crate::i18n::exchange::{self, TableFormat};
use crate::i18n::validate;
use crate::log;
use crate::utils::plural_count;

pub fn run_i18n(command: &I18nCommand, config: &SiteConfig) -> Result<()> {
    let store = load_catalogs(config)?;

    match command {
        I18nCommand::Export { file, format } => {
            let (text, rows) = match TableFormat::detect(*format, file.as_deref()) {
                TableFormat::Json => {
                    let table = exchange::export(&store);
                    let rows = table.as_object().map_or(0, |t| t.len());
                    let mut json = serde_json::to_string_pretty(&table)?;
                    json.push('\n');
                    (json, rows)
                }
                TableFormat::Csv => {
                    let mut buf = Vec::new();
                    let rows = exchange::export_csv(&store, &mut buf)?;
                    (String::from_utf8(buf)?, rows)
                }
            };
            write_output(file.as_deref(), &text)?;
            if let Some(file) = file {
                log!("i18n"; "exported {} to {}", plural_count(rows, "key"), file.display());
            }
            Ok(())
        }
        I18nCommand::Import { file, format } => {
            let text = fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let written = match TableFormat::detect(*format, Some(file)) {
                TableFormat::Json => {
                    let table = serde_json::from_str(&text)
                        .with_context(|| format!("invalid JSON in {}", file.display()))?;
                    exchange::import(&store, &table)?
                }
                TableFormat::Csv => exchange::import_csv(&store, text.as_bytes())
                    .with_context(|| format!("failed to import {}", file.display()))?,
            };
            for imported in &written {
                log!(
                    "i18n";
                    "merged {} into {}",
                    plural_count(imported.keys, "key"),
                    config.root_relative(&imported.path).display()
                );
            }
            if written.is_empty() {
                log!("i18n"; "nothing to import");
            }
            Ok(())
        }
        I18nCommand::Check { warn_only } => {
            let coverage = validate::check(&store);
            for catalog in &coverage.catalogs {
                let percent = format!(
                    "{}%",
                    format_number(catalog.percent().round(), &catalog.locale)
                );
                let percent = if catalog.is_complete() {
                    percent.green().to_string()
                } else {
                    percent.yellow().to_string()
                };
                log!("i18n"; "{}/{} {percent}", catalog.locale, catalog.namespace);
            }

            let mut report = ValidationReport::default();
            report.add_coverage(&coverage, !warn_only);
            report.print();
            log!("i18n"; "{report}");

            if report.has_errors() {
                bail!("translation check failed");
            }
            Ok(())
        }
    }
}
