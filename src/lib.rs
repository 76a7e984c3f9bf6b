//! Best-effort completion client for voice front-ends.
//!
//! A spoken prompt is wrapped in an instructional template, sent to an OpenRouter-compatible
//! chat completions endpoint, and the first choice's text comes back. Failures of any kind
//! are logged through `tracing` and replaced by a fixed fallback sentence.

pub mod client;
pub mod config;
pub mod error;
pub mod template;
pub mod transport;
pub mod types;

// Re-export core types for easy usage
pub use client::CompletionClient;
pub use config::ClientConfig;
pub use error::Error;
pub use template::PromptTemplate;
pub use transport::{HttpTransport, OutboundRequest, Transport};
pub use types::*;
