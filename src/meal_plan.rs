//! # Meal Plan Module
//!
//! Two planners share the same daily calorie split:
//!
//! - [`generate_meal_plan`] builds a multi-day schedule of four meals per day,
//!   each with a recipe found by searching a [`MealSource`] with a randomly
//!   chosen query suited to that meal.
//! - [`generate_ai_meal_plan`] asks a [`TextGenerator`] for a seven-day
//!   weight-loss plan tailored to the user's [`BodyMetrics`].

use crate::language::Dietary;
use crate::llm::{GenerationRequest, TextGenerator};
use crate::mealdb::{Meal, MealSource};
use crate::prompts::build_meal_plan_prompt;
use crate::recipe_errors::RecipeError;
use crate::recipe_generator::extract_json_object;
use chrono::{Duration, NaiveDate};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Sum of the per-meal calorie targets
pub const DAILY_CALORIE_TARGET: u32 = 1500;

/// Length of a generated weight-loss plan
pub const AI_PLAN_DAYS: u32 = 7;

/// Meals scheduled each day, in serving order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Snack,
        MealType::Dinner,
    ];

    /// Calorie target in kcal
    pub fn calorie_target(&self) -> u32 {
        match self {
            MealType::Breakfast => 375,
            MealType::Lunch => 525,
            MealType::Snack => 150,
            MealType::Dinner => 450,
        }
    }

    /// Search queries that tend to return suitable recipes
    pub fn search_queries(&self) -> &'static [&'static str] {
        match self {
            MealType::Breakfast => &["Pancake", "Omelette", "Porridge", "Toast"],
            MealType::Lunch => &["Salad", "Rice", "Curry", "Pasta"],
            MealType::Snack => &["Fruit", "Nuts", "Yogurt", "Smoothie"],
            MealType::Dinner => &["Grilled", "Stew", "Baked", "Soup"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Snack => "Snack",
            MealType::Dinner => "Dinner",
        }
    }
}

/// One scheduled meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub meal_type: MealType,
    pub calories: u32,
    /// `None` when the search failed or found nothing
    pub recipe: Option<Meal>,
}

/// One day of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based day number
    pub day: u32,
    pub date: NaiveDate,
    pub meals: Vec<PlannedMeal>,
}

impl DayPlan {
    /// Short label such as `Tue, Oct 20`
    pub fn date_label(&self) -> String {
        self.date.format("%a, %b %-d").to_string()
    }

    pub fn total_calories(&self) -> u32 {
        self.meals.iter().map(|m| m.calories).sum()
    }
}

/// Find a recipe for one meal, logging rather than propagating failures
async fn fetch_recipe_for<S, R>(source: &S, meal_type: MealType, rng: &mut R) -> Option<Meal>
where
    S: MealSource + ?Sized,
    R: Rng + ?Sized,
{
    let query = meal_type.search_queries().choose(rng).copied().unwrap_or("Food");

    match source.search_meals(query).await {
        Ok(meals) => {
            let meal = meals.into_iter().next();
            if meal.is_none() {
                info!("No {} recipe found for '{}'", meal_type.label(), query);
            }
            meal
        }
        Err(e) => {
            warn!("Failed to fetch {} recipe for '{}': {}", meal_type.label(), query, e);
            None
        }
    }
}

/// Build a `days`-long plan whose first day is the day after `start`
///
/// Searches run one after another. The dietary preference is recorded in the
/// logs but does not filter results, since the recipe source cannot be
/// queried by diet.
pub async fn generate_meal_plan<S, R>(
    source: &S,
    dietary: Option<Dietary>,
    start: NaiveDate,
    days: u32,
    rng: &mut R,
) -> Vec<DayPlan>
where
    S: MealSource + ?Sized,
    R: Rng + ?Sized,
{
    info!("Generating {days}-day meal plan (preference: {dietary:?})");

    let mut plans = Vec::new();
    for day in 1..=days {
        let mut meals = Vec::with_capacity(MealType::ALL.len());
        for meal_type in MealType::ALL {
            let recipe = fetch_recipe_for(source, meal_type, rng).await;
            meals.push(PlannedMeal {
                meal_type,
                calories: meal_type.calorie_target(),
                recipe,
            });
        }

        plans.push(DayPlan {
            day,
            date: start + Duration::days(i64::from(day)),
            meals,
        });
    }

    plans
}

/// Body measurements driving a weight-loss plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub height_cm: f64,
}

impl BodyMetrics {
    /// Body mass index, or 0 when no usable height is known
    pub fn bmi(&self) -> f64 {
        if self.height_cm > 0.0 {
            let height_m = self.height_cm / 100.0;
            self.current_weight_kg / (height_m * height_m)
        } else {
            0.0
        }
    }

    /// Kilograms between the current and target weight
    pub fn weight_to_lose(&self) -> f64 {
        self.current_weight_kg - self.target_weight_kg
    }
}

/// A meal suggested by the generation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedMeal {
    pub name: String,
    pub calories: u32,
    pub description: String,
    pub ingredients: Vec<String>,
    pub recipe: Option<String>,
}

/// One day of a generated weight-loss plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedDay {
    pub day: u32,
    /// Display label, `Day {n}`
    pub date: String,
    pub meals: Vec<SuggestedMeal>,
    /// Sum of the meal calories, or the daily target when that sum is zero
    pub total_calories: u32,
    pub day_tip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MealPlanPayload {
    days: Vec<DayPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DayPayload {
    day: u32,
    #[serde(default)]
    day_tip: Option<String>,
    #[serde(default)]
    meals: Option<Vec<MealPayload>>,
}

#[derive(Debug, Deserialize)]
struct MealPayload {
    name: String,
    #[serde(default)]
    calories: Option<f64>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    ingredients: Option<Vec<String>>,
    #[serde(default)]
    recipe: Option<String>,
}

impl TryFrom<MealPayload> for SuggestedMeal {
    type Error = RecipeError;

    fn try_from(meal: MealPayload) -> Result<Self, Self::Error> {
        let calories = match meal.calories {
            Some(kcal) if !kcal.is_finite() || kcal < 0.0 => {
                return Err(RecipeError::Parse(format!(
                    "Invalid calories for '{}': {kcal}",
                    meal.name
                )))
            }
            Some(kcal) => kcal.round() as u32,
            None => 0,
        };

        Ok(Self {
            name: meal.name,
            calories,
            description: meal.description.unwrap_or_default(),
            ingredients: meal.ingredients.unwrap_or_default(),
            recipe: meal.recipe,
        })
    }
}

impl TryFrom<DayPayload> for SuggestedDay {
    type Error = RecipeError;

    fn try_from(day: DayPayload) -> Result<Self, Self::Error> {
        let meals = day
            .meals
            .unwrap_or_default()
            .into_iter()
            .map(SuggestedMeal::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let total: u32 = meals.iter().map(|m| m.calories).sum();
        let total_calories = if total == 0 { DAILY_CALORIE_TARGET } else { total };

        Ok(Self {
            day: day.day,
            date: format!("Day {}", day.day),
            meals,
            total_calories,
            day_tip: day.day_tip,
        })
    }
}

/// Parse a generated meal plan reply
///
/// The first balanced JSON object is taken from the reply; it must hold a
/// non-empty `days` array.
pub fn parse_meal_plan(reply: &str) -> Result<Vec<SuggestedDay>, RecipeError> {
    let json = extract_json_object(reply)
        .ok_or_else(|| RecipeError::Parse("No JSON object in response".to_string()))?;
    let payload: MealPlanPayload = serde_json::from_str(json)?;

    if payload.days.is_empty() {
        return Err(RecipeError::Parse("Meal plan has no days".to_string()));
    }

    payload.days.into_iter().map(SuggestedDay::try_from).collect()
}

/// Ask `generator` for a seven-day weight-loss plan
///
/// Unlike recipe generation there is no fallback plan: any failure is
/// returned to the caller.
pub async fn generate_ai_meal_plan(
    generator: &dyn TextGenerator,
    dietary: Dietary,
    metrics: &BodyMetrics,
) -> Result<Vec<SuggestedDay>, RecipeError> {
    info!(
        "Generating {}-day {} plan with {}",
        AI_PLAN_DAYS,
        dietary,
        generator.model_name()
    );

    let request = GenerationRequest::json(build_meal_plan_prompt(dietary, metrics));
    let reply = generator.generate(&request).await?;
    debug!("Meal plan reply: {reply}");

    let plan = parse_meal_plan(&reply)?;
    info!("Generated meal plan with {} days", plan.len());
    Ok(plan)
}
