//! # Recipe Error Types Module
//!
//! Error types shared by the generative text service, the recipe data source
//! and the recipe normalizer.

/// Errors raised while talking to external recipe and text services
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeError {
    /// A required credential or setting is absent
    Configuration(String),
    /// Network failure or non-success response from a remote service
    Transport(String),
    /// Response text is not valid JSON or does not have the expected shape
    Parse(String),
}

impl std::fmt::Display for RecipeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecipeError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            RecipeError::Transport(msg) => write!(f, "Transport error: {msg}"),
            RecipeError::Parse(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for RecipeError {}

impl From<reqwest::Error> for RecipeError {
    fn from(err: reqwest::Error) -> Self {
        RecipeError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for RecipeError {
    fn from(err: serde_json::Error) -> Self {
        RecipeError::Parse(err.to_string())
    }
}
