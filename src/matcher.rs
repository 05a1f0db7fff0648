//! # Ingredient Matcher
//!
//! Scores how much of a recipe a user can cook with what they already have.
//!
//! Both sides are reduced to normalized tokens (lower-case ASCII letters and
//! whitespace only) and compared by containment in either direction, so
//! "tomato" matches "fresh tomatoes" and "chicken breast" matches "chicken".
//!
//! ## Usage
//!
//! ```rust
//! use recipe_assistant::matcher::calculate_ingredient_match;
//!
//! let have = vec!["chicken".to_string(), "rice".to_string()];
//! let recipe = vec![
//!     "chicken breast".to_string(),
//!     "basmati rice".to_string(),
//!     "salt".to_string(),
//! ];
//! let result = calculate_ingredient_match(&have, &recipe);
//!
//! assert_eq!(result.match_percentage, 67);
//! assert_eq!(result.missing_ingredients, vec!["salt".to_string()]);
//! ```

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    static ref NON_LETTER: Regex =
        Regex::new(r"[^a-z\s]").expect("Non-letter pattern should be valid");
    static ref USER_LIST_SEPARATOR: Regex =
        Regex::new(r"[,\n]").expect("Separator pattern should be valid");
}

/// Result of comparing a user's ingredients against a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientMatch {
    /// Share of recipe ingredients the user has, 0 to 100
    pub match_percentage: u8,
    /// Recipe ingredients the user has, in recipe order
    pub available_ingredients: Vec<String>,
    /// Recipe ingredients the user lacks, in recipe order
    pub missing_ingredients: Vec<String>,
    /// Number of recipe ingredients compared
    pub total_ingredients: usize,
}

impl IngredientMatch {
    fn nothing_available(recipe_ingredients: &[String]) -> Self {
        Self {
            match_percentage: 0,
            available_ingredients: Vec::new(),
            missing_ingredients: recipe_ingredients.to_vec(),
            total_ingredients: recipe_ingredients.len(),
        }
    }
}

/// Reduce an ingredient string to its comparison token
///
/// Lower-cases, removes everything that is not `a-z` or whitespace, then trims.
pub fn normalize_ingredient(ingredient: &str) -> String {
    let lower = ingredient.to_lowercase();
    NON_LETTER.replace_all(&lower, "").trim().to_string()
}

/// Split a free-text pantry line ("rice, eggs\nonions") into ingredient entries
pub fn parse_user_ingredients(text: &str) -> Vec<String> {
    USER_LIST_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Compare the user's ingredients with a recipe's ingredient list
///
/// If either list is empty, nothing is available and every recipe ingredient
/// is reported missing. User entries that normalize to nothing (e.g. "123")
/// are ignored, and recipe entries that normalize to nothing are counted as
/// missing, so malformed data never inflates the score.
pub fn calculate_ingredient_match(
    user_ingredients: &[String],
    recipe_ingredients: &[String],
) -> IngredientMatch {
    if user_ingredients.is_empty() || recipe_ingredients.is_empty() {
        debug!(
            "Degenerate ingredient match: {} user, {} recipe ingredients",
            user_ingredients.len(),
            recipe_ingredients.len()
        );
        return IngredientMatch::nothing_available(recipe_ingredients);
    }

    let user_tokens: Vec<String> = user_ingredients
        .iter()
        .map(|ing| normalize_ingredient(ing))
        .filter(|token| !token.is_empty())
        .collect();

    let mut available = Vec::new();
    let mut missing = Vec::new();

    for recipe_ingredient in recipe_ingredients {
        let token = normalize_ingredient(recipe_ingredient);
        let is_available = !token.is_empty()
            && user_tokens
                .iter()
                .any(|user| token.contains(user.as_str()) || user.contains(token.as_str()));

        trace!("'{recipe_ingredient}' -> '{token}': available={is_available}");

        if is_available {
            available.push(recipe_ingredient.clone());
        } else {
            missing.push(recipe_ingredient.clone());
        }
    }

    let total = recipe_ingredients.len();
    let match_percentage = ((available.len() as f64 / total as f64) * 100.0).round() as u8;

    IngredientMatch {
        match_percentage,
        available_ingredients: available,
        missing_ingredients: missing,
        total_ingredients: total,
    }
}
