//! `[api]` configuration for the backend the site talks to.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL (e.g., "https://api.example.com").
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 15,
        }
    }
}

impl ApiConfig {
    const BASE_URL: FieldPath = FieldPath::new("api.base_url");
    const TIMEOUT: FieldPath = FieldPath::new("api.timeout_secs");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(base) = &self.base_url
            && url::Url::parse(base).is_err()
        {
            diag.error_with_hint(
                Self::BASE_URL,
                format!("invalid URL: {base}"),
                "use format like https://api.example.com",
            );
        }
        if self.timeout_secs == 0 {
            diag.error(Self::TIMEOUT, "must be greater than 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert!(config.api.base_url.is_none());
        assert_eq!(config.api.timeout_secs, 15);
    }

    #[test]
    fn test_invalid_base_url() {
        let config = test_parse_config("[api]\nbase_url = \"not a url\"");
        let mut diag = ConfigDiagnostics::new();
        config.api.validate(&mut diag);
        assert!(diag.has_errors());
    }
}
