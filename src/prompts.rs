//! # Prompt Templates
//!
//! Deterministic instruction prompts sent to the text generation service.
//! Every template demands a bare JSON object so the reply can be parsed by
//! [`crate::recipe_generator`].

use crate::language::{Dietary, Language};
use crate::meal_plan::{BodyMetrics, MealType, AI_PLAN_DAYS, DAILY_CALORIE_TARGET};

/// Prompt used to check that the generation service is reachable
pub const CONNECTIVITY_PROMPT: &str =
    r#"Say "Hello! Gemini API is working correctly." in exactly 10 words or less."#;

/// Build the prompt for a recipe from free-text ingredients
pub fn build_recipe_prompt(ingredients: &str, language: Language) -> String {
    format!(
        r#"You are an expert Indian cuisine recipe assistant.
User ingredients: {ingredients}.
Respond in {language}.
Provide an authentic Indian recipe as a JSON object with:
"name", "ingredients" (array), and "steps" (array).
Only return the JSON object, no extra text."#,
        language = language.name()
    )
}

/// Build the prompt for a recipe that should land near a calorie target
pub fn build_calorie_prompt(ingredients: &[String], dietary: Dietary, calorie_target: u32) -> String {
    format!(
        r#"
You are a metabolic AI chef. Given the following user context, return a single recipe as a JSON object with these fields:
- name (string)
- steps (array of strings)
- ingredients (array of strings)
- estimatedCalories (number, kcal)

User context:
- Ingredients: {ingredients}
- Dietary: {dietary}
- Calorie Target: {calorie_target} kcal

Rules:
- Only return a valid JSON object, no extra text.
- The recipe's estimatedCalories must be as close as possible to the calorieTarget.
- If not possible, return the closest healthy meal.
- Use only the provided ingredients.

Example output:
{{
  "name": "High Protein Veggie Bowl",
  "steps": ["Chop vegetables", "Sauté in olive oil", "Add spices", "Serve warm"],
  "ingredients": ["broccoli", "chickpeas", "olive oil", "spices"],
  "estimatedCalories": 480
}}
"#,
        ingredients = ingredients.join(", "),
        dietary = dietary.prompt_label(),
    )
}

/// Build the prompt for a seven-day weight-loss meal plan
///
/// The prompt ends with a skeleton of the expected reply: every day lists
/// the four meals with their calorie targets.
pub fn build_meal_plan_prompt(dietary: Dietary, metrics: &BodyMetrics) -> String {
    let meals = MealType::ALL
        .iter()
        .map(|meal| {
            let ingredients = match meal {
                MealType::Snack => r#"["a"]"#,
                _ => r#"["a","b"]"#,
            };
            format!(
                r#"{{"name":"{}","calories":{},"description":"Meal","ingredients":{},"recipe":"Steps"}}"#,
                meal.label(),
                meal.calorie_target(),
                ingredients
            )
        })
        .collect::<Vec<_>>()
        .join(",");

    let days = (1..=AI_PLAN_DAYS)
        .map(|day| format!(r#"{{"day":{day},"dayTip":"Health tip","meals":[{meals}]}}"#))
        .collect::<Vec<_>>()
        .join(",");

    let split = MealType::ALL
        .iter()
        .map(|meal| format!("{}:{}", &meal.label()[..1], meal.calorie_target()))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Generate a compact {plan_days}-day {diet} meal plan. Return ONLY valid JSON, no other text.
Weight: {current}kg → {target}kg ({loss:.1}kg loss). BMI: {bmi:.1}
Daily: {daily} cal ({split})

{{"days":[{days}]}}"#,
        plan_days = AI_PLAN_DAYS,
        diet = dietary.prompt_label().to_lowercase(),
        current = metrics.current_weight_kg,
        target = metrics.target_weight_kg,
        loss = metrics.weight_to_lose(),
        bmi = metrics.bmi(),
        daily = DAILY_CALORIE_TARGET,
    )
}
