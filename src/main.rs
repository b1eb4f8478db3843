//! Folio - content indexing, page props and translations for a bilingual site.

mod api;
mod cli;
mod config;
mod content;
mod i18n;
mod logger;
mod page;
mod settings;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Index { args } => cli::index::run_index(args, &config),
        Commands::Build { .. } => cli::build::build_site(&config),
        Commands::Routes { locale, json } => {
            cli::routes::list_routes(&config, locale.as_deref(), *json)
        }
        Commands::Query { args } => cli::query::run_query(args, &config),
        Commands::Translate {
            key,
            locale,
            default,
            args,
        } => cli::translate::translate(&config, key, locale.as_deref(), default.as_deref(), args),
        Commands::I18n { command } => cli::i18n::run_i18n(command, &config),
        Commands::Validate { args } => cli::validate::validate_site(args, &config),
        Commands::Prefs {
            locale,
            theme,
            reset,
        } => cli::prefs::run_prefs(&config, locale.as_deref(), *theme, *reset),
        Commands::Subscribe { email } => cli::backend::subscribe(&config, email),
        Commands::Apply { file } => cli::backend::apply(&config, file),
        Commands::Chat { message } => cli::backend::chat(&config, message),
    }
}
