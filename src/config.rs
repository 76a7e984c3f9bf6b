//! Static client configuration.

use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "mistralai/mistral-7b-instruct:free";
pub const DEFAULT_REFERER: &str = "http://localhost:5173";
pub const DEFAULT_TITLE: &str = "Vue Speech App";

/// Configuration handed to a [`CompletionClient`](crate::CompletionClient) at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer credential. `None` makes every call fall back without touching the network.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Value of the `HTTP-Referer` identification header.
    pub referer: String,
    /// Value of the `X-Title` identification header.
    pub title: String,
    /// Request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration with the given credential and default endpoint settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENROUTER_API_KEY` plus the optional overrides `OPENROUTER_BASE_URL`
    /// and `OPENROUTER_MODEL`. A missing or blank key is not an error here.
    pub fn from_env() -> Self {
        let mut config = Self {
            api_key: non_blank_var("OPENROUTER_API_KEY"),
            ..Self::default()
        };

        if let Some(base_url) = non_blank_var("OPENROUTER_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(model) = non_blank_var("OPENROUTER_MODEL") {
            config.model = model;
        }

        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = referer.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full URL of the chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
            timeout: None,
        }
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
