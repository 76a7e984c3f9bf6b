//! Wire types for the chat completions API and the caller-facing result.

use crate::Error;
use serde::{Deserialize, Serialize};

/// Text returned to callers whenever an exchange fails.
pub const FALLBACK_TEXT: &str = "Sorry, something went wrong.";

/// Role of a message participant. Only user turns are ever sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A message with role and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Chat completions request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

/// Chat completions response body. Only the fields this crate reads are modelled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatResponse {
    /// Build a response holding a single choice with `content`.
    pub fn with_content(content: impl Into<String>) -> Self {
        ChatResponse {
            choices: vec![Choice {
                message: Some(ChoiceMessage {
                    content: Some(content.into()),
                }),
            }],
        }
    }

    /// Content of the first choice, returned as-is.
    pub fn into_first_content(self) -> Result<String, Error> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed("response contains no choices"))?;

        choice
            .message
            .and_then(|message| message.content)
            .ok_or_else(|| Error::malformed("first choice has no message content"))
    }
}

/// Outcome of a completion call: the provider's answer or the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Answer(String),
    Fallback,
}

impl CompletionResult {
    /// Text to show the user.
    pub fn text(&self) -> &str {
        match self {
            CompletionResult::Answer(text) => text,
            CompletionResult::Fallback => FALLBACK_TEXT,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            CompletionResult::Answer(text) => text,
            CompletionResult::Fallback => FALLBACK_TEXT.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CompletionResult::Fallback)
    }
}
