//! # Ingredient Matcher Tests
//!
//! End-to-end checks of ingredient scoring, including scoring against meal
//! records as they come back from the recipe database.

use recipe_assistant::matcher::{calculate_ingredient_match, parse_user_ingredients, IngredientMatch};
use recipe_assistant::mealdb::{extract_recipe_ingredients, Meal};
use serde_json::json;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_partial_match_percentage() {
    let result = calculate_ingredient_match(
        &strings(&["chicken", "rice"]),
        &strings(&["chicken breast", "basmati rice", "salt"]),
    );

    assert_eq!(
        result,
        IngredientMatch {
            match_percentage: 67,
            available_ingredients: strings(&["chicken breast", "basmati rice"]),
            missing_ingredients: strings(&["salt"]),
            total_ingredients: 3,
        }
    );
}

#[test]
fn test_empty_user_ingredients() {
    let recipe = strings(&["eggs", "rice"]);
    let result = calculate_ingredient_match(&[], &recipe);

    assert_eq!(result.match_percentage, 0);
    assert!(result.available_ingredients.is_empty());
    assert_eq!(result.missing_ingredients, recipe);
    assert_eq!(result.total_ingredients, 2);
}

#[test]
fn test_empty_recipe_ingredients() {
    let result = calculate_ingredient_match(&strings(&["eggs"]), &[]);

    assert_eq!(result.match_percentage, 0);
    assert!(result.available_ingredients.is_empty());
    assert!(result.missing_ingredients.is_empty());
    assert_eq!(result.total_ingredients, 0);
}

#[test]
fn test_case_and_punctuation_insensitive() {
    let result = calculate_ingredient_match(&strings(&["Tomato!"]), &strings(&["fresh tomatoes"]));
    assert_eq!(result.available_ingredients, strings(&["fresh tomatoes"]));
    assert_eq!(result.match_percentage, 100);
}

#[test]
fn test_partition_preserves_order_and_case() {
    let recipe = strings(&["Salt", "Onion", "Garam Masala", "Ghee", "Red Onion", "Cumin"]);
    let result = calculate_ingredient_match(&strings(&["onion", "ghee"]), &recipe);

    assert_eq!(result.available_ingredients, strings(&["Onion", "Ghee", "Red Onion"]));
    assert_eq!(result.missing_ingredients, strings(&["Salt", "Garam Masala", "Cumin"]));
    assert_eq!(
        result.available_ingredients.len() + result.missing_ingredients.len(),
        result.total_ingredients
    );
    assert_eq!(result.match_percentage, 50);
}

#[test]
fn test_percentage_always_in_range() {
    let pantries = [
        strings(&["rice"]),
        strings(&["rice", "dal", "salt"]),
        strings(&["x"]),
        strings(&["!!", "42"]),
    ];
    let recipe = strings(&["Rice", "Toor Dal", "Salt", "Turmeric", "Water", "Mustard Seeds", "Curry Leaves"]);

    for pantry in &pantries {
        let result = calculate_ingredient_match(pantry, &recipe);
        assert!(result.match_percentage <= 100);
        assert_eq!(
            result.available_ingredients.len() + result.missing_ingredients.len(),
            recipe.len()
        );
    }
}

#[test]
fn test_match_against_meal_record() {
    let record = json!({
        "idMeal": "52806",
        "strMeal": "Tandoori chicken",
        "strIngredient1": "lemons",
        "strMeasure1": "2 Juice",
        "strIngredient2": "paprika",
        "strMeasure2": "4 tsp",
        "strIngredient3": "red onions",
        "strMeasure3": "2 finely chopped",
        "strIngredient4": "chicken thighs",
        "strMeasure4": "16 skinnless",
        "strIngredient5": "Greek yogurt",
        "strMeasure5": "300ml ",
        "strIngredient6": "",
        "strMeasure6": "",
        "strIngredient7": null,
        "strMeasure7": null,
    });
    let record = record.as_object().unwrap();

    let recipe_ingredients = extract_recipe_ingredients(record);
    assert_eq!(recipe_ingredients.len(), 5);

    let meal = Meal::from_record(record).unwrap();
    assert_eq!(meal.ingredient_names(), recipe_ingredients);
    assert_eq!(meal.ingredients[4].measure.as_deref(), Some("300ml"));

    let pantry = parse_user_ingredients("Chicken, onion, yoghurt, lemon");
    let result = calculate_ingredient_match(&pantry, &recipe_ingredients);

    assert_eq!(result.available_ingredients, strings(&["lemons", "red onions", "chicken thighs"]));
    assert_eq!(result.missing_ingredients, strings(&["paprika", "Greek yogurt"]));
    assert_eq!(result.match_percentage, 60);
}

#[test]
fn test_serializes_in_camel_case() {
    let result = calculate_ingredient_match(&strings(&["rice"]), &strings(&["rice"]));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["matchPercentage"], 100);
    assert_eq!(json["availableIngredients"][0], "rice");
    assert_eq!(json["totalIngredients"], 1);
}
