use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for talking to the house points service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend, without trailing slash
    pub backend_url: String,
    /// Timeout applied to every request
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

impl ClientConfig {
    /// Load configuration from environment variables
    /// BACKEND_URL wins over VITE_BACKEND_URL; both fall back to localhost
    pub fn from_env() -> Self {
        let backend_url = non_empty_var("BACKEND_URL")
            .or_else(|| non_empty_var("VITE_BACKEND_URL"))
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let request_timeout = non_empty_var("BACKEND_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self::new(backend_url, request_timeout)
    }

    pub fn new(backend_url: impl Into<String>, request_timeout: Duration) -> Self {
        let backend_url = backend_url.into().trim_end_matches('/').to_string();
        Self {
            backend_url,
            request_timeout,
        }
    }
}
