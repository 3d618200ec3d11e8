//! Front-end configuration

use std::time::Duration;

/// Service root used when `LOAN_ASSISTANT_BASE_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://10.200.129.25:5050/FinBot";

/// Transport timeout used when `LOAN_ASSISTANT_TIMEOUT_SECS` is unset or invalid
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Where the answer service lives and how long the transport may wait on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Service root, e.g. `http://host:5050/FinBot`
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ChatConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("LOAN_ASSISTANT_BASE_URL").ok(),
            std::env::var("LOAN_ASSISTANT_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(base_url: Option<String>, timeout_secs: Option<String>) -> Self {
        let base_url = base_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout = timeout_secs
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        Self {
            base_url,
            request_timeout,
        }
    }

    /// Question endpoint (`POST`)
    pub fn answer_url(&self) -> String {
        format!("{}/response", self.base_url.trim_end_matches('/'))
    }

    /// Liveness endpoint (`GET`)
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url.trim_end_matches('/'))
    }
}
