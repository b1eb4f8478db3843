//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::i18n::exchange::TableFormat;
use crate::settings::Theme;

/// Folio content and translation pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file name searched upward from the working directory
    #[arg(short = 'C', long, global = true, default_value = "folio.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write listing manifests for every generated collection
    #[command(visible_alias = "x")]
    Index {
        #[command(flatten)]
        args: IndexArgs,
    },

    /// Build page props for every route and locale
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// List every route and locale that a build produces
    #[command(visible_alias = "r")]
    Routes {
        /// Only list routes of this locale
        #[arg(short, long)]
        locale: Option<String>,

        /// Print JSON instead of one path per line
        #[arg(short, long)]
        json: bool,
    },

    /// Print the page props of one route
    #[command(visible_alias = "q")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },

    /// Resolve a translation key
    #[command(name = "t")]
    Translate {
        /// Key, optionally namespaced as `ns:key`
        key: String,

        /// Locale (defaults to the saved preference)
        #[arg(short, long)]
        locale: Option<String>,

        /// Value used before the canonical catalog
        #[arg(short, long)]
        default: Option<String>,

        /// Interpolation argument, `name=value` (repeatable)
        #[arg(short, long = "arg", value_name = "NAME=VALUE")]
        args: Vec<String>,
    },

    /// Translation catalog tools
    I18n {
        #[command(subcommand)]
        command: I18nCommand,
    },

    /// Check content, manifests and translations
    #[command(visible_alias = "v")]
    Validate {
        #[command(flatten)]
        args: ValidateArgs,
    },

    /// Show or change saved preferences
    Prefs {
        /// Preferred locale
        #[arg(short, long)]
        locale: Option<String>,

        /// Color theme
        #[arg(short, long, value_enum)]
        theme: Option<Theme>,

        /// Forget all saved preferences
        #[arg(long, conflicts_with_all = ["locale", "theme"])]
        reset: bool,
    },

    /// Subscribe an email address to the newsletter
    Subscribe {
        email: String,
    },

    /// Submit a mentee application from a JSON file
    Apply {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Ask the site assistant a question
    Chat {
        message: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum I18nCommand {
    /// Write the flat translation table as JSON or CSV
    Export {
        /// Output file (stdout when omitted)
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Table format (default: from the file extension, else json)
        #[arg(long, value_enum)]
        format: Option<TableFormat>,
    },

    /// Merge a translated table back into the catalogs
    Import {
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,

        /// Table format (default: from the file extension, else json)
        #[arg(long, value_enum)]
        format: Option<TableFormat>,
    },

    /// Report missing, empty and extra keys per locale
    Check {
        /// Treat missing catalog files as warnings
        #[arg(long, short = 'w')]
        warn_only: bool,
    },
}

/// Options shared by every command that loads content.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ContentArgs {
    /// Include documents marked `draft: true`
    #[arg(short, long)]
    pub drafts: bool,

    /// Date (`YYYY-MM-DD`) used for documents without one
    #[arg(long, value_name = "DATE")]
    pub today: Option<String>,
}

/// Index command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct IndexArgs {
    #[command(flatten)]
    pub content: ContentArgs,

    /// Only report what would change; write nothing
    #[arg(long)]
    pub check: bool,
}

/// Build command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub content: ContentArgs,

    /// Clean output directory completely before building
    #[arg(short, long)]
    pub clean: bool,
}

/// Query command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct QueryArgs {
    /// Route path, e.g. `/blog/hello-world`
    #[arg(default_value = "/")]
    pub path: String,

    #[command(flatten)]
    pub content: ContentArgs,

    /// Locale (defaults to the saved preference)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Category filter for listing routes
    #[arg(long)]
    pub category: Option<String>,

    /// Extra prop, `name=value` (repeatable); values are parsed as JSON when possible
    #[arg(long = "prop", value_name = "NAME=VALUE")]
    pub props: Vec<String>,

    /// Leave out the resolved dictionary
    #[arg(long)]
    pub no_dictionary: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

/// Validate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub content: ContentArgs,

    /// Treat validation failures as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,
}
