//! Blocking JSON client for the site backend.
//!
//! | Endpoint                          | Method                      |
//! |-----------------------------------|-----------------------------|
//! | `POST /api/v1/newsletter/subscribe` | [`ApiClient::subscribe`]  |
//! | `POST /api/v1/mentoring/applications` | [`ApiClient::apply`]    |
//! | `POST /api/v1/chat`               | [`ApiClient::chat`]         |
//!
//! Every response goes through [`classify`]: anything not served as
//! `application/json` is [`ApiError::NonJson`] and is never parsed.
//! There are no retries.

mod types;

pub use types::MenteeApplication;

use std::fmt;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::config::ApiConfig;
use types::{ApplicationRecord, ChatMessage, ChatRequest, ChatResponse, MessageResponse, SubscribeRequest};

const API_PREFIX: &str = "api/v1";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no backend configured, set `api.base_url` in folio.toml")]
    NotConfigured,

    #[error("expected a JSON response, got `{content_type}` (HTTP {status})")]
    NonJson { status: u16, content_type: String },

    #[error("HTTP {code}: {detail}")]
    Status { code: u16, detail: String },

    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body")]
    Decode(#[source] serde_json::Error),
}

/// Lifecycle of one request as shown to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> RequestState<T> {
    pub fn start(&mut self) {
        *self = Self::Loading;
    }

    pub fn finish(&mut self, result: Result<T, ApiError>) {
        *self = match result {
            Ok(value) => Self::Success(value),
            Err(err) => Self::Error(err.to_string()),
        };
    }
}

impl<T> fmt::Display for RequestState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loading => f.write_str("loading"),
            Self::Success(_) => f.write_str("success"),
            Self::Error(message) => write!(f, "error: {message}"),
        }
    }
}

/// Sort a raw response into a JSON value or an [`ApiError`].
pub fn classify(status: u16, content_type: Option<&str>, body: &str) -> Result<Value, ApiError> {
    let content_type = content_type.unwrap_or_default();
    if !is_json(content_type) {
        return Err(ApiError::NonJson {
            status,
            content_type: if content_type.is_empty() {
                "no content type".into()
            } else {
                content_type.to_string()
            },
        });
    }

    let value: Value = serde_json::from_str(body).map_err(ApiError::Decode)?;
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            code: status,
            detail: error_detail(&value).unwrap_or_else(|| "request failed".into()),
        });
    }
    Ok(value)
}

/// `application/json`, `application/problem+json`, with or without parameters.
fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// `detail` or `message`; validation errors arrive as a list of `{msg}`.
fn error_detail(value: &Value) -> Option<String> {
    match value.get("detail").or_else(|| value.get("message"))? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

pub struct ApiClient {
    http: Client,
    base: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base = config.base_url.as_deref().ok_or(ApiError::NotConfigured)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{API_PREFIX}/{path}", self.base)
    }

    fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        crate::debug!("api"; "POST {url}");

        let response = self.http.post(&url).json(body).send()?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let text = response.text()?;

        let value = classify(status, content_type.as_deref(), &text)?;
        serde_json::from_value(value).map_err(ApiError::Decode)
    }

    /// Subscribe `email` to the newsletter; returns the server's message.
    pub fn subscribe(&self, email: &str) -> Result<String, ApiError> {
        let response: MessageResponse =
            self.post("newsletter/subscribe", &SubscribeRequest { email })?;
        Ok(response.message)
    }

    pub fn apply(&self, application: &MenteeApplication) -> Result<ApplicationRecord, ApiError> {
        self.post("mentoring/applications", application)
    }

    /// Ask the assistant. A reply with `status: "error"` is an error.
    pub fn chat(&self, message: &str, context: &[ChatMessage]) -> Result<String, ApiError> {
        let request = ChatRequest {
            message,
            context: (!context.is_empty()).then_some(context),
        };
        let reply: ChatResponse = self.post("chat", &request)?;
        if reply.status == "error" {
            return Err(ApiError::Status {
                code: 200,
                detail: reply.error.unwrap_or(reply.response),
            });
        }
        Ok(reply.response)
    }
}
