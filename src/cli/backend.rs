//! `folio subscribe`, `folio apply` and `folio chat`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::api::{ApiClient, ApiError, MenteeApplication, RequestState};
use crate::config::SiteConfig;
use crate::log;

/// Run one request, log each state it passes through, and fail on the
/// error state.
fn run<T>(label: &str, request: impl FnOnce() -> Result<T, ApiError>) -> Result<T> {
    let mut state = RequestState::default();
    state.start();
    crate::debug!("api"; "{label}: {state}");
    state.finish(request());
    crate::debug!("api"; "{label}: {state}");

    match state {
        RequestState::Success(value) => Ok(value),
        RequestState::Error(message) => bail!("{label} failed: {message}"),
        RequestState::Idle | RequestState::Loading => bail!("{label} did not complete"),
    }
}

pub fn subscribe(config: &SiteConfig, email: &str) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let message = run("subscribe", || client.subscribe(email))?;
    log!("api"; "{message}");
    Ok(())
}

pub fn apply(config: &SiteConfig, file: &Path) -> Result<()> {
    let text =
        fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let application: MenteeApplication =
        serde_json::from_str(&text).with_context(|| format!("invalid application {}", file.display()))?;
    if application.user_email.trim().is_empty() {
        bail!("application needs a user_email");
    }

    let client = ApiClient::new(&config.api)?;
    let record = run("application", || client.apply(&application))?;
    log!("api"; "application #{} is {}", record.id, record.status);
    Ok(())
}

pub fn chat(config: &SiteConfig, message: &str) -> Result<()> {
    let client = ApiClient::new(&config.api)?;
    let reply = run("chat", || client.chat(message, &[]))?;
    super::common::write_output(None, &reply)
}
