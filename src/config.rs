use std::time::Duration;

use crate::errors::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const API_BASE_VAR: &str = "TAX_ASSIST_API_BASE";
const TIMEOUT_VAR: &str = "TAX_ASSIST_TIMEOUT_SECS";

/// Where the backend lives and how long a single call may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads `TAX_ASSIST_API_BASE` and `TAX_ASSIST_TIMEOUT_SECS`, falling back
    /// to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base = match lookup(API_BASE_VAR) {
            Some(raw) => {
                let trimmed = raw.trim().trim_end_matches('/');
                if trimmed.is_empty() {
                    return Err(ConfigError::EmptyBaseUrl { name: API_BASE_VAR });
                }
                trimmed.to_string()
            }
            None => DEFAULT_API_BASE.to_string(),
        };

        let request_timeout = match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                // Zero would fail every call before it is sent.
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| ConfigError::InvalidTimeout {
                        name: TIMEOUT_VAR,
                        value: raw.clone(),
                    })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { api_base, request_timeout })
    }

    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.api_base)
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.api_base)
    }
}
