use anyhow::{bail, Result};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Every API path is resolved against this, e.g. `http://localhost:8080/api`.
    pub api_base_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_base_url = std::env::var("JOB_PORTAL_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(Config {
            api_base_url: normalize_base_url(&api_base_url)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Overrides the base URL, e.g. from a command-line flag.
    pub fn with_base_url(mut self, url: &str) -> Result<Self> {
        self.api_base_url = normalize_base_url(url)?;
        Ok(self)
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let url = raw.trim().trim_end_matches('/');
    if url.is_empty() {
        bail!("API base URL must not be empty");
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        bail!("API base URL '{url}' must start with http:// or https://");
    }
    Ok(url.to_string())
}
