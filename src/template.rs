//! Instructional templates wrapped around the caller's prompt.

use crate::Error;
use std::fmt;
use std::str::FromStr;

const TECHNICAL_EXPLAIN_PREFIX: &str = "You're in a technical interview, use simple english. \
Provide a concise and precise explanation or solution. \
In case you have coding question start from bruteforce and then provide optimised. \
Only include code if explicitly asked. Focus on reasoning and clarity";

const PLAIN_ANSWER_PREFIX: &str = "You're in an interview, use simple english. \
Answer the question directly in a few short sentences. \
Do not include code. Focus on clarity";

/// Answer style requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptTemplate {
    /// Interview-style technical explanation, brute force before optimised.
    #[default]
    TechnicalExplain,
    /// Short plain-language answer without code.
    PlainAnswer,
}

impl PromptTemplate {
    pub const ALL: [PromptTemplate; 2] = [
        PromptTemplate::TechnicalExplain,
        PromptTemplate::PlainAnswer,
    ];

    /// Stable name used in configuration and logs.
    pub fn name(&self) -> &'static str {
        match self {
            PromptTemplate::TechnicalExplain => "technical-explain",
            PromptTemplate::PlainAnswer => "plain-answer",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            PromptTemplate::TechnicalExplain => TECHNICAL_EXPLAIN_PREFIX,
            PromptTemplate::PlainAnswer => PLAIN_ANSWER_PREFIX,
        }
    }

    /// Wrap `prompt` in this template. The prompt is appended verbatim.
    pub fn apply(&self, prompt: &str) -> String {
        format!("{}: {}", self.prefix(), prompt)
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PromptTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptTemplate::ALL
            .into_iter()
            .find(|template| template.name() == s.trim())
            .ok_or_else(|| {
                Error::config(format!(
                    "Unknown prompt template '{s}'. Valid values are: technical-explain, plain-answer"
                ))
            })
    }
}
