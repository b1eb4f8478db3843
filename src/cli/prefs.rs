//! `folio prefs`: show or change saved preferences.

use anyhow::{Result, bail};

use crate::config::SiteConfig;
use crate::log;
use crate::settings::{Preferences, Theme, env_lang};

pub fn run_prefs(
    config: &SiteConfig,
    locale: Option<&str>,
    theme: Option<Theme>,
    reset: bool,
) -> Result<()> {
    let state_dir = config.state_dir();
    let mut prefs = if reset {
        Preferences::default()
    } else {
        Preferences::load(&state_dir)?
    };

    if let Some(locale) = locale {
        if !config.i18n.is_supported(locale) {
            bail!(
                "unsupported locale '{locale}' (supported: {})",
                config.locales().join(", ")
            );
        }
        prefs.locale = Some(locale.to_string());
    }
    if let Some(theme) = theme {
        prefs.theme = theme;
    }

    if reset || locale.is_some() || theme.is_some() {
        let path = prefs.save(&state_dir)?;
        crate::debug!("prefs"; "saved {}", config.root_relative(&path).display());
    }

    let active = prefs.negotiate_locale(&config.i18n, env_lang().as_deref());
    log!(
        "prefs";
        "locale: {} (saved: {}), theme: {:?}",
        active,
        prefs.locale.as_deref().unwrap_or("none"),
        prefs.theme
    );
    Ok(())
}
