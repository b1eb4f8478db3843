//! Site configuration management for `folio.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── api        # [api]
//! │   ├── build      # [build] and [build.slug]
//! │   ├── content    # [content] and [[content.collections]]
//! │   ├── i18n       # [i18n]
//! │   └── site       # [site]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[site]`      | Site metadata and default author                 |
//! | `[i18n]`      | Locales, namespaces, catalog directory           |
//! | `[content]`   | Collections, indexing defaults, cover images     |
//! | `[build]`     | Output, static pages, drafts, heading slugs      |
//! | `[api]`       | Backend endpoint for newsletter/mentoring/chat   |

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    ApiConfig, AuthorConfig, BuildSectionConfig, CollectionConfig, ContentConfig, I18nConfig,
    RouteKey, SiteSectionConfig, SlugConfig, SlugMode, SlugSeparator,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::cli::{Cli, Commands, ContentArgs};
use crate::utils::path::normalize_path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing folio.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub i18n: I18nConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub api: ApiConfig,
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cli.config, &cwd)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.apply_cli(cli);
        config.normalize_paths(&root);

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            let mut diag = ConfigDiagnostics::new();
            for field in ignored {
                diag.unknown_field(field);
            }
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            diag.print_warnings(&display_path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Get path relative to the site root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    pub fn default_locale(&self) -> &str {
        &self.i18n.default_locale
    }

    pub fn locales(&self) -> &[String] {
        &self.i18n.locales
    }

    /// Directory holding `preferences.json` and other local state.
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(".folio")
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply global and command-specific CLI overrides.
    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Build { build_args } => {
                self.build.clean |= build_args.clean;
                self.apply_content_args(&build_args.content);
            }
            Commands::Index { args } => self.apply_content_args(&args.content),
            Commands::Query { args } => self.apply_content_args(&args.content),
            Commands::Validate { args } => self.apply_content_args(&args.content),
            Commands::Routes { .. }
            | Commands::Translate { .. }
            | Commands::I18n { .. }
            | Commands::Prefs { .. }
            | Commands::Subscribe { .. }
            | Commands::Apply { .. }
            | Commands::Chat { .. } => {}
        }
    }

    fn apply_content_args(&mut self, args: &ContentArgs) {
        self.build.drafts |= args.drafts;
        if let Some(today) = &args.today {
            self.build.today = Some(today.clone());
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.i18n.dir = normalize_path(&root.join(&self.i18n.dir));
        self.content.normalize(&root);
        self.build.normalize(&root);
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate every section, collecting all errors before failing.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.site.validate(&mut diag);
        self.i18n.validate(&mut diag);
        self.content.validate(&mut diag);
        self.build.validate(&mut diag);
        self.api.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config with the minimal `[site]` table.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let config = format!("[site]\ntitle = \"Test\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&config).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// A config rooted at `root` with every path normalized, as `load` leaves it.
#[cfg(test)]
pub fn test_site_config(root: &Path, extra: &str) -> SiteConfig {
    let mut config = test_parse_config(extra);
    config.config_path = root.join("folio.toml");
    config.normalize_paths(root);
    config
}

// ============================================================================
// tests
// ============================================================================
