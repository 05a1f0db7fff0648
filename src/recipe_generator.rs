//! # Recipe Generator
//!
//! Turns free-text ingredients into a structured recipe using a text
//! generation service.
//!
//! ## Pipeline
//!
//! 1. Build a deterministic prompt ([`crate::prompts`])
//! 2. Submit it through a [`TextGenerator`]
//! 3. Cut the first balanced `{...}` span out of the reply and parse it
//! 4. Check the parsed object has the required fields and types
//! 5. Attach video search links
//!
//! Any failure along the way (missing API key, network error, malformed
//! reply) is logged and replaced by a fixed fallback recipe; callers never
//! see an error from [`RecipeGenerator::generate_recipe`] or
//! [`RecipeGenerator::generate_calorie_recipe`].

use crate::config::YOUTUBE_SEARCH_URL;
use crate::language::{Dietary, Language};
use crate::llm::{GenerationRequest, TextGenerator};
use crate::prompts::{build_calorie_prompt, build_recipe_prompt, CONNECTIVITY_PROMPT};
use crate::recipe_errors::RecipeError;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const FALLBACK_RECIPE_NAME: &str = "Standard Indian Curry";
pub const FALLBACK_STEPS: [&str; 3] = [
    "Sauté onions and garlic.",
    "Add spices and main ingredients.",
    "Simmer until cooked.",
];

/// A recipe produced by the generation service (or the fallback)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Zero to two video search links
    #[serde(default)]
    pub video_urls: Vec<String>,
}

/// A generated recipe aimed at a calorie target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    /// Model's estimate in kcal; `None` when the model gave none or on fallback
    pub estimated_calories: Option<u32>,
    #[serde(default)]
    pub video_urls: Vec<String>,
}

/// Shape the model is required to return
#[derive(Debug, Deserialize)]
struct RecipePayload {
    name: String,
    ingredients: Vec<String>,
    steps: Vec<String>,
    #[serde(rename = "estimatedCalories", default)]
    estimated_calories: Option<f64>,
}

/// Locate the first balanced `{...}` span in `text`
///
/// Braces inside JSON string literals (including escaped quotes) are ignored,
/// so commentary before or after the object does not disturb parsing.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse and validate a model reply
fn parse_payload(reply: &str) -> Result<RecipePayload, RecipeError> {
    let json = extract_json_object(reply)
        .ok_or_else(|| RecipeError::Parse("No JSON object in response".to_string()))?;
    let payload: RecipePayload = serde_json::from_str(json)?;

    if payload.name.trim().is_empty() {
        return Err(RecipeError::Parse("Recipe name is empty".to_string()));
    }
    if let Some(calories) = payload.estimated_calories {
        if !calories.is_finite() || calories < 0.0 {
            return Err(RecipeError::Parse(format!(
                "Invalid estimatedCalories: {calories}"
            )));
        }
    }

    Ok(payload)
}

/// Parse a model reply into a recipe, without video links
pub fn parse_generated_recipe(reply: &str) -> Result<GeneratedRecipe, RecipeError> {
    let payload = parse_payload(reply)?;
    Ok(GeneratedRecipe {
        name: payload.name,
        ingredients: payload.ingredients,
        steps: payload.steps,
        video_urls: Vec::new(),
    })
}

/// Parse a calorie-targeted model reply, without video links
pub fn parse_calorie_recipe(reply: &str) -> Result<CalorieRecipe, RecipeError> {
    let payload = parse_payload(reply)?;
    Ok(CalorieRecipe {
        name: payload.name,
        ingredients: payload.ingredients,
        steps: payload.steps,
        estimated_calories: payload.estimated_calories.map(|kcal| kcal.round() as u32),
        video_urls: Vec::new(),
    })
}

/// Percent-encode `text` for use as a single query component
///
/// Letters, digits and `-_.!~*'()` pass through; every other UTF-8 byte
/// becomes `%XX`, so spaces are `%20` rather than `+`.
pub fn encode_query_component(text: &str) -> String {
    let mut encoded = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

/// Build a video search link for `recipe_name` in `language`
///
/// Non-English searches also carry interface-language and region hints.
pub fn youtube_search_url(recipe_name: &str, language: Language) -> String {
    let search_term = format!("{} {}", recipe_name, language.recipe_search_term());
    let url = format!(
        "{}?search_query={}",
        YOUTUBE_SEARCH_URL,
        encode_query_component(&search_term)
    );

    if language == Language::English {
        url
    } else {
        format!("{}&hl={}&gl=IN", url, language.code())
    }
}

/// The two links attached to every successfully generated recipe
pub fn video_links(recipe_name: &str, language: Language) -> Vec<String> {
    vec![
        youtube_search_url(recipe_name, language),
        youtube_search_url(&format!("{recipe_name} step by step tutorial"), language),
    ]
}

/// Recipe returned whenever generation fails
///
/// Ingredients are the raw comma-separated pieces of the input, whitespace
/// included.
pub fn fallback_recipe(ingredients_text: &str) -> GeneratedRecipe {
    GeneratedRecipe {
        name: FALLBACK_RECIPE_NAME.to_string(),
        ingredients: ingredients_text.split(',').map(str::to_string).collect(),
        steps: FALLBACK_STEPS.iter().map(|s| s.to_string()).collect(),
        video_urls: Vec::new(),
    }
}

/// Calorie-targeted counterpart of [`fallback_recipe`]
pub fn fallback_calorie_recipe(ingredients: &[String]) -> CalorieRecipe {
    CalorieRecipe {
        name: FALLBACK_RECIPE_NAME.to_string(),
        ingredients: ingredients.to_vec(),
        steps: FALLBACK_STEPS.iter().map(|s| s.to_string()).collect(),
        estimated_calories: None,
        video_urls: Vec::new(),
    }
}

/// Generates recipes through a text generation service
#[derive(Debug, Clone)]
pub struct RecipeGenerator {
    generator: Arc<dyn TextGenerator>,
}

impl RecipeGenerator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate a recipe from free-text ingredients in the given language
    ///
    /// Never fails: on any error the fallback recipe is returned.
    pub async fn generate_recipe(&self, ingredients_text: &str, language: Language) -> GeneratedRecipe {
        let request = GenerationRequest::json(build_recipe_prompt(ingredients_text, language));

        let result = async {
            let reply = self.generator.generate(&request).await?;
            debug!("Recipe reply: {reply}");
            parse_generated_recipe(&reply)
        }
        .await;

        match result {
            Ok(mut recipe) => {
                info!("Generated '{}' in {}", recipe.name, language);
                recipe.video_urls = video_links(&recipe.name, language);
                recipe
            }
            Err(e) => {
                error!("Recipe generation failed, using fallback: {e}");
                fallback_recipe(ingredients_text)
            }
        }
    }

    /// Generate a recipe aimed at `calorie_target` kcal
    ///
    /// Never fails: on any error a fallback with no calorie estimate is returned.
    pub async fn generate_calorie_recipe(
        &self,
        ingredients: &[String],
        dietary: Dietary,
        calorie_target: u32,
    ) -> CalorieRecipe {
        let request =
            GenerationRequest::json(build_calorie_prompt(ingredients, dietary, calorie_target));

        let result = async {
            let reply = self.generator.generate(&request).await?;
            debug!("Calorie recipe reply: {reply}");
            parse_calorie_recipe(&reply)
        }
        .await;

        match result {
            Ok(mut recipe) => {
                info!(
                    "Generated '{}' at {:?} kcal for a {} kcal {} target",
                    recipe.name, recipe.estimated_calories, calorie_target, dietary
                );
                recipe.video_urls = video_links(&recipe.name, Language::English);
                recipe
            }
            Err(e) => {
                error!("Calorie recipe generation failed, using fallback: {e}");
                fallback_calorie_recipe(ingredients)
            }
        }
    }

    /// Check the generation service end to end, surfacing any error
    pub async fn test_connection(&self) -> Result<String, RecipeError> {
        info!("Testing connection to {}", self.generator.model_name());
        let reply = self
            .generator
            .generate(&GenerationRequest::text(CONNECTIVITY_PROMPT))
            .await?;
        info!("Connection successful: {}", reply.trim());
        Ok(reply.trim().to_string())
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }
}
