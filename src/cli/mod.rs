//! Command-line interface module.

mod args;
pub mod backend;
pub mod build;
pub mod common;
pub mod i18n;
pub mod index;
pub mod prefs;
pub mod query;
pub mod routes;
pub mod translate;
pub mod validate;

pub use args::{Cli, Commands, ContentArgs, I18nCommand, IndexArgs, QueryArgs, ValidateArgs};
