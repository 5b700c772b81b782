//! CompletionModel trait — the abstraction over language-model backends.
//!
//! A CompletionModel knows how to turn one textual prompt into one
//! completion. The reasoning engine calls `complete()` without knowing
//! which backend is being used — pure polymorphism.
//!
//! Implementations: OpenAI-compatible endpoints, scripted mocks in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ModelError;

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "gpt-4o-mini")
    pub model: String,

    /// The full prompt text
    pub prompt: String,

    /// Temperature (0.0 = deterministic decoding, preferred for
    /// reproducible decisions)
    #[serde(default)]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Stop sequences
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

/// A complete response from a model backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Token usage statistics
    pub usage: Option<Usage>,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core CompletionModel trait.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// A human-readable name for this backend (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a prompt and get a single completion.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialization_skips_empty_fields() {
        let req = CompletionRequest {
            model: "gpt-4o-mini".into(),
            prompt: "Thought:".into(),
            temperature: 0.0,
            max_tokens: None,
            stop: vec![],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("stop"));
    }

    #[test]
    fn response_roundtrip() {
        let resp = CompletionResponse {
            text: "Final Answer: done".into(),
            model: "gpt-4o-mini".into(),
            usage: Some(Usage {
                prompt_tokens: 120,
                completion_tokens: 8,
                total_tokens: 128,
            }),
        };
        let json = serde_json::to_string(&resp).unwrap();
        let parsed: CompletionResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.text, resp.text);
        assert_eq!(parsed.usage.unwrap().total_tokens, 128);
    }
}
