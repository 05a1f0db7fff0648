//! Gemini `generateContent` REST client.

use super::{GenerationRequest, TextGenerator};
use crate::config::GeminiConfig;
use crate::recipe_errors::RecipeError;
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Client for Google's generative language API
#[derive(Debug)]
pub struct GeminiClient {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Concatenate the text parts of the first candidate
fn reply_text(response: GenerateContentResponse) -> Result<String, RecipeError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        return Err(RecipeError::Parse("No text content in response".to_string()));
    }
    Ok(text)
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, RecipeError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| RecipeError::Configuration("GEMINI_API_KEY is not set".to_string()))?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: request.json_response.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };

        debug!(
            "Calling {} (json_response={}, prompt_len={})",
            self.model,
            request.json_response,
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(RecipeError::Transport(format!(
                "Gemini returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        let reply = reply_text(parsed)?;
        info!("Received {} characters from {}", reply.len(), self.model);
        Ok(reply)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
