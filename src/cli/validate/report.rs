//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::i18n::CoverageReport;
use crate::utils::plural_s;

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// The key, file or entry concerned.
    pub target: String,
    pub reason: String,
}

/// Errors fail the command; warnings are only printed.
#[derive(Debug, Default)]
pub struct ValidationReport {
    /// Errors grouped by source (file or catalog).
    pub errors: BTreeMap<String, Vec<Finding>>,
    /// Warnings grouped by source.
    pub warnings: BTreeMap<String, Vec<Finding>>,
}

impl ValidationReport {
    pub fn add_error(&mut self, source: impl Into<String>, target: impl Into<String>, reason: impl Into<String>) {
        self.errors.entry(source.into()).or_default().push(Finding {
            target: target.into(),
            reason: reason.into(),
        });
    }

    pub fn add_warning(&mut self, source: impl Into<String>, target: impl Into<String>, reason: impl Into<String>) {
        self.warnings.entry(source.into()).or_default().push(Finding {
            target: target.into(),
            reason: reason.into(),
        });
    }

    /// Fold translation coverage in: missing files are errors (or
    /// warnings with `warn_only`), key gaps are warnings.
    pub fn add_coverage(&mut self, coverage: &CoverageReport, missing_file_is_error: bool) {
        for catalog in &coverage.catalogs {
            let source = format!("{}/{}", catalog.locale, catalog.namespace);

            if let Some(path) = &catalog.missing_file {
                let target = format!("`{}`", path.display());
                if missing_file_is_error {
                    self.add_error(source, target, "catalog file not found");
                } else {
                    self.add_warning(source, target, "catalog file not found");
                }
                continue;
            }
            for key in &catalog.missing {
                self.add_warning(&source, key, "missing");
            }
            for key in &catalog.empty {
                self.add_warning(&source, key, "empty");
            }
            for key in &catalog.extra {
                self.add_warning(&source, key, "not in canonical catalog");
            }
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.values().map(Vec::len).sum()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Print the full report to stderr (errors -> warnings).
    pub fn print(&self) {
        print_section("errors", &self.errors, true);
        print_section("warnings", &self.warnings, false);
    }
}

fn print_section(name: &str, findings: &BTreeMap<String, Vec<Finding>>, is_error: bool) {
    if findings.is_empty() {
        return;
    }
    eprintln!();

    let source_count = findings.len();
    let count: usize = findings.values().map(Vec::len).sum();
    let header = if is_error {
        name.red().bold().to_string()
    } else {
        name.yellow().bold().to_string()
    };
    eprintln!(
        "{} {}",
        header,
        format!("({source_count} source{}, {count} finding{})", plural_s(source_count), plural_s(count)).dimmed()
    );

    for (source, items) in findings {
        eprintln!("{}{}{}", "[".dimmed(), source.cyan(), "]".dimmed());
        for item in items {
            let arrow = if is_error { "→".red().to_string() } else { "→".yellow().to_string() };
            eprintln!("{} {} {}", arrow, item.target, item.reason.dimmed());
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.error_count();
        let warnings = self.warning_count();

        match (errors, warnings) {
            (0, 0) => write!(f, "{}", "all checks passed".green()),
            (0, w) => write!(
                f,
                "{} {} {}",
                "passed with".dimmed(),
                w.to_string().yellow().bold(),
                format!("warning{}", plural_s(w)).dimmed()
            ),
            (e, w) => write!(
                f,
                "{} {} {}{}",
                "found".dimmed(),
                e.to_string().red().bold(),
                format!("error{}", plural_s(e)).dimmed(),
                format!(", {w} warning{}", plural_s(w)).dimmed()
            ),
        }
    }
}
