//! Client configuration resolved at compile time.
//!
//! A WASM bundle has no process environment, so the backend base URL is baked
//! in when the crate is built. `TASKS_API_BASE_URL` overrides the default.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Storage key holding the raw auth token.
pub const TOKEN_STORAGE_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    /// Build a config pointing at `base_url`. A trailing `/` is dropped so
    /// endpoint paths can always be appended with a leading slash.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_owned();
        Self { base_url }
    }

    /// Absolute URL for an endpoint path such as `/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(resolve_base_url(option_env!("TASKS_API_BASE_URL")))
    }
}

fn resolve_base_url(configured: Option<&str>) -> &str {
    match configured.map(str::trim) {
        Some(url) if !url.is_empty() => url,
        _ => DEFAULT_BASE_URL,
    }
}
