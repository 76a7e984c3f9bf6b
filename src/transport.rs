use crate::{ChatRequest, ChatResponse, ClientConfig, Error};
use reqwest::Client;

/// Upper bound, in characters, on provider error text kept in [`Error::Provider`].
const MAX_ERROR_BODY_CHARS: usize = 512;

/// A fully described outbound completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: ChatRequest,
}

impl OutboundRequest {
    /// Value of the first header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Sends a completion request and decodes the response body.
///
/// Implementations report every failure as an [`Error`]; the client decides what callers see.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: &OutboundRequest) -> Result<ChatResponse, Error>;
}

/// HTTPS transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<ChatResponse, Error> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.json(&request.body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(Error::provider(
                status.as_u16(),
                format!("API error: {}", truncate_body(&error_text)),
            ));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(text: &str) -> &str {
    match text.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => &text[..cut],
        None => text,
    }
}
