//! # Configuration Module
//!
//! This module defines configuration structures for the external services
//! used by the assistant: the generative text API and the recipe database.
//! Values are read from the environment (a `.env` file is honoured by the
//! binary) and fall back to the defaults below.

use std::env;

// Constants for service configuration
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
pub const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results";
pub const DEFAULT_PLAN_DAYS: u32 = 7;

/// Settings for the generative text service
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` means every generation call fails with a configuration error
    pub api_key: Option<String>,
    /// Model identifier sent with each request
    pub model: String,
    /// Base URL of the REST API, without trailing slash
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        }
    }
}

/// Settings for the recipe database
#[derive(Debug, Clone)]
pub struct MealDbConfig {
    /// Base URL of the REST API, without trailing slash
    pub base_url: String,
}

impl Default for MealDbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MEALDB_BASE_URL.to_string(),
        }
    }
}

/// Top-level configuration for the assistant
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub gemini: GeminiConfig,
    pub mealdb: MealDbConfig,
}

impl AppConfig {
    /// Build the configuration from environment variables
    ///
    /// Recognised variables: `GEMINI_API_KEY`, `GEMINI_MODEL`,
    /// `GEMINI_API_BASE_URL` and `MEALDB_BASE_URL`. Blank values are
    /// treated as unset.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Self::default();
        Self {
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY"),
                model: get("GEMINI_MODEL").unwrap_or(defaults.gemini.model),
                base_url: get("GEMINI_API_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.gemini.base_url),
            },
            mealdb: MealDbConfig {
                base_url: get("MEALDB_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.mealdb.base_url),
            },
        }
    }
}
