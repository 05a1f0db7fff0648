//! Fake text generator for testing.
//!
//! Replies are chosen by checking whether the prompt contains a registered
//! substring, so tests run without network access or an API key.

use super::{GenerationRequest, TextGenerator};
use crate::recipe_errors::RecipeError;
use async_trait::async_trait;
use std::sync::Mutex;

/// Deterministic in-memory text generator
#[derive(Debug, Default)]
pub struct FakeGenerator {
    /// (prompt substring, reply) pairs, checked in insertion order
    responses: Vec<(String, Result<String, RecipeError>)>,
    /// Reply when no pattern matches; `None` yields a transport error
    default_response: Option<String>,
    /// Every request received, oldest first
    requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `response` whenever the prompt contains `prompt_contains`
    pub fn with_response(mut self, prompt_contains: &str, response: &str) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), Ok(response.to_string())));
        self
    }

    /// Fail with `error` whenever the prompt contains `prompt_contains`
    pub fn with_error(mut self, prompt_contains: &str, error: RecipeError) -> Self {
        self.responses
            .push((prompt_contains.to_lowercase(), Err(error)));
        self
    }

    /// Reply with `response` when nothing else matches
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, RecipeError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let prompt = request.prompt.to_lowercase();
        if let Some((_, reply)) = self
            .responses
            .iter()
            .find(|(pattern, _)| prompt.contains(pattern.as_str()))
        {
            return reply.clone();
        }

        self.default_response.clone().ok_or_else(|| {
            RecipeError::Transport(format!(
                "FakeGenerator: no response configured for prompt: {}",
                request.prompt.chars().take(100).collect::<String>()
            ))
        })
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}
