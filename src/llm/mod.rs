//! Text generation service adapters
//!
//! This module is split into:
//! - `gemini`: REST client for the Gemini `generateContent` endpoint
//! - `fake`: deterministic in-memory generator for tests and offline runs

pub mod fake;
pub mod gemini;

pub use fake::FakeGenerator;
pub use gemini::GeminiClient;

use crate::recipe_errors::RecipeError;
use async_trait::async_trait;
use std::fmt;

/// A single prompt submitted to a text generation service
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Ask the service to answer with a bare JSON document
    pub json_response: bool,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            json_response: false,
        }
    }

    pub fn json(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            json_response: true,
        }
    }
}

/// Request/response text generation service
///
/// Implementations hold no per-request state, so one instance can serve
/// concurrent callers.
#[async_trait]
pub trait TextGenerator: Send + Sync + fmt::Debug {
    /// Submit a prompt and return the model's text reply
    async fn generate(&self, request: &GenerationRequest) -> Result<String, RecipeError>;

    /// Model identifier used for requests
    fn model_name(&self) -> &str;
}
