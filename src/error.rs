use thiserror::Error;

/// Errors that can occur during a completion exchange.
///
/// These never reach callers of [`CompletionClient::get_completion`](crate::CompletionClient::get_completion);
/// they are logged and collapsed to the fallback text. They are exposed for
/// [`CompletionClient::try_complete`](crate::CompletionClient::try_complete) and custom transports.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Provider error: {status} - {message}")]
    Provider { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing API credential")]
    MissingCredential,

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Error::Provider {
            status,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedResponse(message.into())
    }

    /// Short label used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Http(_) => "transport",
            Error::Serialization(_) | Error::MalformedResponse(_) => "contract",
            Error::Provider { .. } => "provider",
            Error::MissingCredential | Error::Config(_) => "config",
        }
    }
}
