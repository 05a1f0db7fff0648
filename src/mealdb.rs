//! # Recipe Database Module
//!
//! Client and record adapter for the public TheMealDB REST API.
//!
//! Meal records carry up to twenty numbered `strIngredient{n}` /
//! `strMeasure{n}` field pairs; unused slots are empty strings or `null`.
//! [`extract_recipe_ingredients`] and [`Meal::from_record`] collapse them into
//! an ordered ingredient list.

use crate::config::MealDbConfig;
use crate::recipe_errors::RecipeError;
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of ingredient slots in a meal record
pub const INGREDIENT_SLOTS: usize = 20;

/// A single recipe ingredient with its optional measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    pub measure: Option<String>,
}

/// A full meal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
    pub youtube: Option<String>,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Abbreviated record returned by category filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MealsResponse<T> {
    meals: Option<Vec<T>>,
}

/// Trimmed, non-empty string value of `key`
fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Collect every non-empty `strIngredient{n}` (n = 1..=20), trimmed, in order
pub fn extract_recipe_ingredients(record: &Map<String, Value>) -> Vec<String> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|n| text_field(record, &format!("strIngredient{n}")))
        .collect()
}

impl Meal {
    /// Build a meal from a raw API record
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, RecipeError> {
        let id = text_field(record, "idMeal")
            .ok_or_else(|| RecipeError::Parse("Meal record without idMeal".to_string()))?;
        let name = text_field(record, "strMeal").unwrap_or_default();

        let ingredients = (1..=INGREDIENT_SLOTS)
            .filter_map(|n| {
                text_field(record, &format!("strIngredient{n}")).map(|name| RecipeIngredient {
                    name,
                    measure: text_field(record, &format!("strMeasure{n}")),
                })
            })
            .collect();

        let tags = text_field(record, "strTags")
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            id,
            name,
            category: text_field(record, "strCategory"),
            area: text_field(record, "strArea"),
            instructions: text_field(record, "strInstructions"),
            thumbnail: text_field(record, "strMealThumb"),
            tags,
            youtube: text_field(record, "strYoutube"),
            ingredients,
        })
    }

    /// Ingredient names in recipe order, ready for matching
    pub fn ingredient_names(&self) -> Vec<String> {
        self.ingredients.iter().map(|i| i.name.clone()).collect()
    }

    /// Split the instructions into at most `limit` sentence-sized steps
    pub fn instruction_steps(&self, limit: usize) -> Vec<String> {
        self.instructions
            .as_deref()
            .unwrap_or_default()
            .split('.')
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .take(limit)
            .map(str::to_string)
            .collect()
    }
}

/// Anything that can answer a free-text meal search
#[async_trait]
pub trait MealSource: Send + Sync {
    async fn search_meals(&self, query: &str) -> Result<Vec<Meal>, RecipeError>;
}

/// HTTP client for TheMealDB
#[derive(Debug, Clone)]
pub struct MealDbClient {
    base_url: String,
    client: reqwest::Client,
}

impl MealDbClient {
    pub fn new(config: &MealDbConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_records<T>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<T>, RecipeError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {url} {params:?}");

        let response = self.client.get(&url).query(params).send().await?;
        if !response.status().is_success() {
            return Err(RecipeError::Transport(format!(
                "{} returned {}",
                endpoint,
                response.status()
            )));
        }

        let body: MealsResponse<T> = response.json().await?;
        Ok(body.meals.unwrap_or_default())
    }

    /// Look up a single meal by id
    pub async fn lookup(&self, id: &str) -> Result<Option<Meal>, RecipeError> {
        let records: Vec<Map<String, Value>> = self.get_records("lookup.php", &[("i", id)]).await?;
        records.first().map(Meal::from_record).transpose()
    }

    /// Search meals by name
    pub async fn search(&self, name: &str) -> Result<Vec<Meal>, RecipeError> {
        let records: Vec<Map<String, Value>> = self.get_records("search.php", &[("s", name)]).await?;
        let meals = records
            .iter()
            .map(Meal::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        info!("Search '{}' returned {} meals", name, meals.len());
        Ok(meals)
    }

    /// List meals in a category
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<MealSummary>, RecipeError> {
        self.get_records("filter.php", &[("c", category)]).await
    }
}

#[async_trait]
impl MealSource for MealDbClient {
    async fn search_meals(&self, query: &str) -> Result<Vec<Meal>, RecipeError> {
        self.search(query).await
    }
}
