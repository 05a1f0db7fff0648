//! # Meal Plan Tests
//!
//! Builds meal plans against an in-memory recipe source and the fake text
//! generator so no network access is needed.

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use recipe_assistant::language::Dietary;
use recipe_assistant::llm::FakeGenerator;
use recipe_assistant::meal_plan::{
    generate_ai_meal_plan, generate_meal_plan, BodyMetrics, MealType, DAILY_CALORIE_TARGET,
};
use recipe_assistant::mealdb::{Meal, MealSource};
use recipe_assistant::recipe_errors::RecipeError;
use std::sync::Mutex;

/// Returns one meal named after the query, or fails for configured queries
#[derive(Default)]
struct StubMealSource {
    failing_queries: Vec<&'static str>,
    empty_queries: Vec<&'static str>,
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl MealSource for StubMealSource {
    async fn search_meals(&self, query: &str) -> Result<Vec<Meal>, RecipeError> {
        self.queries.lock().unwrap().push(query.to_string());

        if self.failing_queries.iter().any(|q| *q == query) {
            return Err(RecipeError::Transport("connection refused".into()));
        }
        if self.empty_queries.iter().any(|q| *q == query) {
            return Ok(vec![]);
        }
        Ok(vec![Meal {
            id: format!("id-{query}"),
            name: format!("{query} Special"),
            category: None,
            area: None,
            instructions: Some("Cook. Serve.".into()),
            thumbnail: None,
            tags: vec![],
            youtube: None,
            ingredients: vec![],
        }])
    }
}

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

#[tokio::test]
async fn test_week_plan_shape() {
    let source = StubMealSource::default();
    let mut rng = StdRng::seed_from_u64(7);

    let plan = generate_meal_plan(&source, Some(Dietary::Veg), start_date(), 7, &mut rng).await;

    assert_eq!(plan.len(), 7);
    for (index, day) in plan.iter().enumerate() {
        assert_eq!(day.day as usize, index + 1);
        assert_eq!(day.meals.len(), 4);
        assert_eq!(day.total_calories(), 1500);

        let types: Vec<MealType> = day.meals.iter().map(|m| m.meal_type).collect();
        assert_eq!(types, MealType::ALL.to_vec());
        assert!(day.meals.iter().all(|m| m.recipe.is_some()));
    }

    assert_eq!(plan[0].date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    assert_eq!(plan[0].date_label(), "Tue, Oct 20");
    assert_eq!(plan[6].date, NaiveDate::from_ymd_opt(2026, 10, 26).unwrap());
    assert_eq!(source.queries.lock().unwrap().len(), 28);
}

#[tokio::test]
async fn test_queries_come_from_meal_type_lists() {
    let source = StubMealSource::default();
    let mut rng = StdRng::seed_from_u64(42);

    let plan = generate_meal_plan(&source, None, start_date(), 2, &mut rng).await;

    for day in &plan {
        for meal in &day.meals {
            let recipe = meal.recipe.as_ref().unwrap();
            let query = recipe.name.trim_end_matches(" Special");
            assert!(meal.meal_type.search_queries().iter().any(|q| *q == query));
            assert_eq!(meal.calories, meal.meal_type.calorie_target());
        }
    }
}

#[tokio::test]
async fn test_failed_and_empty_searches_leave_no_recipe() {
    let all_snacks = MealType::Snack.search_queries().to_vec();
    let all_dinners = MealType::Dinner.search_queries().to_vec();
    let source = StubMealSource {
        failing_queries: all_snacks,
        empty_queries: all_dinners,
        ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(1);

    let plan = generate_meal_plan(&source, Some(Dietary::NonVeg), start_date(), 1, &mut rng).await;
    let meals = &plan[0].meals;

    assert!(meals[0].recipe.is_some());
    assert!(meals[1].recipe.is_some());
    assert!(meals[2].recipe.is_none());
    assert!(meals[3].recipe.is_none());
    assert_eq!(plan[0].total_calories(), 1500);
}

#[tokio::test]
async fn test_zero_days() {
    let source = StubMealSource::default();
    let mut rng = StdRng::seed_from_u64(0);

    let plan = generate_meal_plan(&source, None, start_date(), 0, &mut rng).await;
    assert!(plan.is_empty());
}

fn sample_metrics() -> BodyMetrics {
    BodyMetrics {
        current_weight_kg: 82.0,
        target_weight_kg: 75.0,
        height_cm: 175.0,
    }
}

const WEEK_PLAN_REPLY: &str = r#"Here is your plan:
{"days": [
  {"day": 1, "dayTip": "Drink water before meals.", "meals": [
    {"name": "Breakfast", "calories": 380, "description": "Vegetable poha", "ingredients": ["poha", "peas"], "recipe": "Rinse poha. Temper and toss."},
    {"name": "Lunch", "calories": 520, "description": "Dal and rice", "ingredients": ["toor dal", "rice"], "recipe": "Pressure cook dal."},
    {"name": "Snack", "calories": 150, "description": "Roasted chana", "ingredients": ["chana"]},
    {"name": "Dinner", "calories": 450, "description": "Paneer tikka", "ingredients": ["paneer", "curd"], "recipe": "Marinate and grill."}
  ]},
  {"day": 2, "dayTip": "Walk after dinner."}
]}
Stay healthy!"#;

#[tokio::test]
async fn test_ai_plan_from_valid_reply() {
    let fake = FakeGenerator::new().with_response("7-day vegetarian meal plan", WEEK_PLAN_REPLY);

    let plan = generate_ai_meal_plan(&fake, Dietary::Veg, &sample_metrics())
        .await
        .unwrap();

    assert_eq!(plan.len(), 2);

    let first = &plan[0];
    assert_eq!(first.day, 1);
    assert_eq!(first.date, "Day 1");
    assert_eq!(first.day_tip.as_deref(), Some("Drink water before meals."));
    assert_eq!(first.meals.len(), 4);
    assert_eq!(first.total_calories, 1500);
    assert_eq!(first.meals[2].name, "Snack");
    assert_eq!(first.meals[2].ingredients, vec!["chana"]);
    assert_eq!(first.meals[2].recipe, None);

    let second = &plan[1];
    assert_eq!(second.date, "Day 2");
    assert!(second.meals.is_empty());
    assert_eq!(second.total_calories, DAILY_CALORIE_TARGET);

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.contains("Weight: 82kg → 75kg (7.0kg loss). BMI: 26.8"));
}

#[tokio::test]
async fn test_ai_plan_malformed_reply_is_an_error() {
    let replies = [
        "Sorry, I cannot create a meal plan right now.",
        r#"{"days": [{"day": 1, "meals": [{"calories": 300}]}]}"#,
        r#"{"days": "seven"}"#,
        r#"{"days": [{"day": 1"#,
    ];

    for reply in replies {
        let fake = FakeGenerator::new().with_default_response(reply);
        let result = generate_ai_meal_plan(&fake, Dietary::NonVeg, &sample_metrics()).await;
        assert!(
            matches!(result, Err(RecipeError::Parse(_))),
            "reply: {reply}"
        );
    }
}

#[tokio::test]
async fn test_ai_plan_surfaces_service_errors() {
    let fake = FakeGenerator::new().with_error(
        "meal plan",
        RecipeError::Configuration("GEMINI_API_KEY is not set".into()),
    );

    let result = generate_ai_meal_plan(&fake, Dietary::NonVeg, &sample_metrics()).await;
    assert_eq!(
        result,
        Err(RecipeError::Configuration("GEMINI_API_KEY is not set".into()))
    );

    let requests = fake.requests();
    assert!(requests[0].prompt.contains("7-day non-vegetarian meal plan"));
}
