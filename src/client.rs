use crate::transport::{HttpTransport, OutboundRequest, Transport};
use crate::{ChatMessage, ChatRequest, ClientConfig, CompletionResult, Error, PromptTemplate};

/// Best-effort client for a chat completions endpoint.
///
/// Every call is independent: one outbound request, no retries, no shared mutable state.
/// [`get_completion`](Self::get_completion) and [`complete`](Self::complete) never fail;
/// any error is logged and replaced by [`FALLBACK_TEXT`](crate::FALLBACK_TEXT).
pub struct CompletionClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
    template: PromptTemplate,
}

impl CompletionClient<HttpTransport> {
    /// Create a client that talks HTTPS to the configured endpoint.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> CompletionClient<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            template: PromptTemplate::default(),
        }
    }

    /// Set the template used by [`get_completion`](Self::get_completion).
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn template(&self) -> PromptTemplate {
        self.template
    }

    /// Build the outbound call for `prompt`.
    pub fn build_request(
        &self,
        prompt: &str,
        template: PromptTemplate,
    ) -> Result<OutboundRequest, Error> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingCredential)?;

        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), format!("Bearer {api_key}")),
            ("HTTP-Referer".to_string(), self.config.referer.clone()),
            ("X-Title".to_string(), self.config.title.clone()),
        ];

        Ok(OutboundRequest {
            url: self.config.completions_url(),
            headers,
            body: ChatRequest {
                model: self.config.model.clone(),
                messages: vec![ChatMessage::user(template.apply(prompt))],
            },
        })
    }

    /// Run one exchange and surface the failure, if any.
    pub async fn try_complete(
        &self,
        prompt: &str,
        template: PromptTemplate,
    ) -> Result<String, Error> {
        let request = self.build_request(prompt, template)?;
        tracing::debug!(
            url = %request.url,
            model = %request.body.model,
            template = %template,
            "sending completion request"
        );

        let response = self.transport.send(&request).await?;
        response.into_first_content()
    }

    /// Run one exchange, collapsing every failure to [`CompletionResult::Fallback`].
    pub async fn complete(&self, prompt: &str, template: PromptTemplate) -> CompletionResult {
        match self.try_complete(prompt, template).await {
            Ok(answer) => CompletionResult::Answer(answer),
            Err(error) => {
                tracing::error!(
                    kind = error.kind(),
                    model = %self.config.model,
                    template = %template,
                    "completion failed: {error}"
                );
                CompletionResult::Fallback
            }
        }
    }

    /// Answer `prompt` with the client's template. Always returns text.
    pub async fn get_completion(&self, prompt: &str) -> String {
        self.complete(prompt, self.template).await.into_text()
    }
}
