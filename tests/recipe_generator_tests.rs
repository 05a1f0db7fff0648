//! # Recipe Generator Tests
//!
//! Exercises the generation pipeline against the fake text generator:
//! prompt construction, reply parsing, video link attachment and the
//! fallback recipe on every failure path.

use recipe_assistant::language::{Dietary, Language};
use recipe_assistant::llm::{FakeGenerator, TextGenerator};
use recipe_assistant::recipe_errors::RecipeError;
use recipe_assistant::recipe_generator::{
    fallback_recipe, video_links, youtube_search_url, GeneratedRecipe, RecipeGenerator,
    FALLBACK_RECIPE_NAME, FALLBACK_STEPS,
};
use std::sync::Arc;

const PANEER_REPLY: &str = r#"{
  "name": "Paneer Bhurji",
  "ingredients": ["200g paneer", "1 onion, chopped", "2 tomatoes"],
  "steps": ["Heat oil.", "Add onion and tomato.", "Crumble in paneer; cook 5 min."]
}"#;

fn generator_with(fake: FakeGenerator) -> (RecipeGenerator, Arc<FakeGenerator>) {
    let fake = Arc::new(fake);
    let shared: Arc<dyn TextGenerator> = fake.clone();
    (RecipeGenerator::new(shared), fake)
}

fn expected_fallback_steps() -> Vec<String> {
    FALLBACK_STEPS.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_successful_generation_preserves_fields() {
    let (generator, fake) = generator_with(FakeGenerator::new().with_response("paneer", PANEER_REPLY));

    let recipe = generator.generate_recipe("paneer, onion, tomato", Language::English).await;

    assert_eq!(recipe.name, "Paneer Bhurji");
    assert_eq!(
        recipe.ingredients,
        vec!["200g paneer", "1 onion, chopped", "2 tomatoes"]
    );
    assert_eq!(
        recipe.steps,
        vec!["Heat oil.", "Add onion and tomato.", "Crumble in paneer; cook 5 min."]
    );
    assert_eq!(recipe.video_urls, video_links("Paneer Bhurji", Language::English));
    assert_eq!(recipe.video_urls.len(), 2);

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].json_response);
    assert!(requests[0].prompt.contains("User ingredients: paneer, onion, tomato."));
    assert!(requests[0].prompt.contains("Respond in english."));
}

#[tokio::test]
async fn test_reply_wrapped_in_commentary() {
    let reply = format!("Here is your recipe:\n```json\n{}\n```\nEnjoy!", PANEER_REPLY);
    let (generator, _) = generator_with(FakeGenerator::new().with_default_response(&reply));

    let recipe = generator.generate_recipe("paneer", Language::Hindi).await;

    assert_eq!(recipe.name, "Paneer Bhurji");
    assert_eq!(recipe.video_urls.len(), 2);
    assert!(recipe.video_urls.iter().all(|url| url.ends_with("&hl=hi&gl=IN")));
}

#[tokio::test]
async fn test_transport_failure_returns_fallback() {
    let (generator, _) = generator_with(
        FakeGenerator::new().with_error("rice", RecipeError::Transport("connection reset".into())),
    );

    let recipe = generator.generate_recipe("rice, eggs", Language::English).await;

    assert_eq!(
        recipe,
        GeneratedRecipe {
            name: FALLBACK_RECIPE_NAME.to_string(),
            ingredients: vec!["rice".to_string(), " eggs".to_string()],
            steps: expected_fallback_steps(),
            video_urls: vec![],
        }
    );
}

#[tokio::test]
async fn test_missing_api_key_returns_fallback() {
    let (generator, _) = generator_with(
        FakeGenerator::new()
            .with_error("", RecipeError::Configuration("GEMINI_API_KEY is not set".into())),
    );

    let recipe = generator.generate_recipe("dal", Language::Tamil).await;
    assert_eq!(recipe, fallback_recipe("dal"));
}

#[tokio::test]
async fn test_unparseable_replies_return_fallback() {
    let replies = [
        "I'm sorry, I can't help with that.",
        "{\"name\": \"Dal\", \"ingredients\": [\"lentils\"]",
        r#"{"name": "Dal", "ingredients": ["lentils"]}"#,
        r#"{"name": "Dal", "ingredients": "lentils", "steps": ["Boil"]}"#,
        r#"{"title": "Dal", "ingredients": [], "steps": []}"#,
    ];

    for reply in replies {
        let (generator, _) = generator_with(FakeGenerator::new().with_default_response(reply));
        let recipe = generator.generate_recipe("lentils, salt", Language::English).await;

        assert_eq!(recipe.name, FALLBACK_RECIPE_NAME, "reply: {reply}");
        assert_eq!(recipe.ingredients, vec!["lentils", " salt"]);
        assert!(recipe.video_urls.is_empty());
    }
}

#[tokio::test]
async fn test_fallback_is_deterministic() {
    let (generator, _) = generator_with(FakeGenerator::new());

    let first = generator.generate_recipe("rice, eggs", Language::English).await;
    let second = generator.generate_recipe("rice, eggs", Language::English).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_calorie_recipe_success() {
    let reply = r#"{
        "name": "High Protein Veggie Bowl",
        "steps": ["Chop vegetables", "Sauté in olive oil", "Add spices", "Serve warm"],
        "ingredients": ["broccoli", "chickpeas", "olive oil", "spices"],
        "estimatedCalories": 480
    }"#;
    let (generator, fake) = generator_with(FakeGenerator::new().with_response("metabolic", reply));
    let ingredients = vec!["broccoli".to_string(), "chickpeas".to_string()];

    let recipe = generator
        .generate_calorie_recipe(&ingredients, Dietary::Veg, 500)
        .await;

    assert_eq!(recipe.name, "High Protein Veggie Bowl");
    assert_eq!(recipe.estimated_calories, Some(480));
    assert_eq!(recipe.steps.len(), 4);
    assert_eq!(recipe.video_urls, video_links("High Protein Veggie Bowl", Language::English));

    let requests = fake.requests();
    let prompt = &requests[0].prompt;
    assert!(prompt.contains("- Calorie Target: 500 kcal"));
    assert!(prompt.contains("- Dietary: Vegetarian"));
}

#[tokio::test]
async fn test_calorie_recipe_fallback() {
    let (generator, _) = generator_with(FakeGenerator::new().with_default_response("not json"));
    let ingredients = vec!["chicken".to_string(), "rice".to_string()];

    let recipe = generator
        .generate_calorie_recipe(&ingredients, Dietary::NonVeg, 600)
        .await;

    assert_eq!(recipe.name, FALLBACK_RECIPE_NAME);
    assert_eq!(recipe.ingredients, ingredients);
    assert_eq!(recipe.steps, expected_fallback_steps());
    assert_eq!(recipe.estimated_calories, None);
    assert!(recipe.video_urls.is_empty());
}

#[tokio::test]
async fn test_connection_success() {
    let (generator, fake) = generator_with(
        FakeGenerator::new().with_response("working correctly", " Hello! Gemini API is working correctly.\n"),
    );

    let reply = generator.test_connection().await.unwrap();
    assert_eq!(reply, "Hello! Gemini API is working correctly.");
    assert!(!fake.requests()[0].json_response);
}

#[tokio::test]
async fn test_connection_surfaces_errors() {
    let (generator, _) = generator_with(
        FakeGenerator::new().with_error("", RecipeError::Configuration("GEMINI_API_KEY is not set".into())),
    );

    let result = generator.test_connection().await;
    assert_eq!(
        result,
        Err(RecipeError::Configuration("GEMINI_API_KEY is not set".into()))
    );
}

#[test]
fn test_video_links_are_idempotent() {
    for language in Language::ALL {
        assert_eq!(
            youtube_search_url("Masala Dosa", language),
            youtube_search_url("Masala Dosa", language)
        );
    }
}

#[test]
fn test_video_links_second_is_tutorial() {
    let links = video_links("Masala Dosa", Language::English);
    assert_eq!(
        links,
        vec![
            "https://www.youtube.com/results?search_query=Masala%20Dosa%20recipe".to_string(),
            "https://www.youtube.com/results?search_query=Masala%20Dosa%20step%20by%20step%20tutorial%20recipe"
                .to_string(),
        ]
    );
}

#[test]
fn test_generated_recipe_json_shape() {
    let recipe = fallback_recipe("rice");
    let json = serde_json::to_value(&recipe).unwrap();
    assert_eq!(json["name"], FALLBACK_RECIPE_NAME);
    assert!(json["videoUrls"].as_array().unwrap().is_empty());
}
