use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

use recipe_assistant::config::{AppConfig, DEFAULT_PLAN_DAYS};
use recipe_assistant::language::{Dietary, Language};
use recipe_assistant::llm::GeminiClient;
use recipe_assistant::localization::LocalizationManager;
use recipe_assistant::matcher::{calculate_ingredient_match, parse_user_ingredients};
use recipe_assistant::meal_plan::{generate_ai_meal_plan, generate_meal_plan, BodyMetrics};
use recipe_assistant::mealdb::MealDbClient;
use recipe_assistant::recipe_generator::{RecipeGenerator, FALLBACK_RECIPE_NAME};
use recipe_assistant::voice_commands::VoiceCommandSet;

#[derive(Debug, Parser)]
#[command(name = "recipe_assistant", about = "Recipe discovery and diet planning assistant")]
struct Cli {
    /// Language for generated recipes and messages
    #[arg(long, global = true, default_value = "english")]
    language: Language,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a recipe against the ingredients you have
    Match {
        /// Comma-separated ingredients you have
        have: String,
        /// TheMealDB id of the recipe to compare against
        #[arg(long, conflicts_with = "recipe")]
        recipe_id: Option<String>,
        /// Comma-separated recipe ingredients, instead of a lookup
        #[arg(long)]
        recipe: Option<String>,
    },
    /// Generate a recipe from free-text ingredients
    Generate { ingredients: String },
    /// Generate a recipe close to a calorie target
    Calorie {
        /// Comma-separated ingredients
        ingredients: String,
        #[arg(long, default_value = "veg")]
        dietary: Dietary,
        #[arg(long, default_value_t = 480)]
        calories: u32,
    },
    /// Search recipes by name, or list a category
    Search {
        /// Recipe name to search for
        #[arg(default_value = "")]
        query: String,
        /// List every recipe in this category instead of searching by name
        #[arg(long)]
        category: Option<String>,
        /// Instruction steps shown per recipe
        #[arg(long, default_value_t = 5)]
        steps: usize,
    },
    /// Build a meal plan starting tomorrow
    Plan {
        #[arg(long)]
        dietary: Option<Dietary>,
        #[arg(long, default_value_t = DEFAULT_PLAN_DAYS, value_parser = clap::value_parser!(u32).range(1..=31))]
        days: u32,
    },
    /// Generate a seven-day weight-loss meal plan
    DietPlan {
        /// Current weight in kg
        #[arg(long)]
        weight: f64,
        /// Target weight in kg
        #[arg(long)]
        target: f64,
        /// Height in cm
        #[arg(long)]
        height: f64,
        #[arg(long, default_value = "veg")]
        dietary: Dietary,
    },
    /// List supported languages
    Languages,
    /// Check that the text generation service is reachable
    Ping,
    /// Resolve a voice transcript to a command
    Voice { transcript: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let messages = LocalizationManager::new().context("Failed to load localized messages")?;
    let language = cli.language;

    info!("Starting recipe assistant ({})", language);

    let generator = || RecipeGenerator::new(Arc::new(GeminiClient::new(&config.gemini)));

    match cli.command {
        Command::Match {
            have,
            recipe_id,
            recipe,
        } => {
            let recipe_ingredients = match (recipe_id, recipe) {
                (Some(id), _) => MealDbClient::new(&config.mealdb)
                    .lookup(&id)
                    .await
                    .with_context(|| format!("Failed to look up recipe {id}"))?
                    .with_context(|| format!("No recipe with id {id}"))?
                    .ingredient_names(),
                (None, Some(list)) => parse_user_ingredients(&list),
                (None, None) => bail!("Pass either --recipe-id or --recipe"),
            };

            let result = calculate_ingredient_match(&parse_user_ingredients(&have), &recipe_ingredients);
            let available = result.available_ingredients.len().to_string();
            let total = result.total_ingredients.to_string();
            let percentage = result.match_percentage.to_string();
            println!(
                "{}",
                messages.t_args(
                    "match-summary",
                    language,
                    &[("available", available.as_str()), ("total", total.as_str()), ("percentage", percentage.as_str())],
                )
            );
            if result.missing_ingredients.is_empty() {
                println!("{}", messages.t("match-complete", language));
            } else {
                let missing = result.missing_ingredients.join(", ");
                println!(
                    "{}",
                    messages.t_args("match-missing", language, &[("ingredients", missing.as_str())])
                );
            }
        }
        Command::Generate { ingredients } => {
            let recipe = generator().generate_recipe(&ingredients, language).await;
            if recipe.name == FALLBACK_RECIPE_NAME {
                println!("{}", messages.t("generation-fallback", language));
            } else {
                println!("{}", messages.t("recipe-intro", language));
            }
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        }
        Command::Calorie {
            ingredients,
            dietary,
            calories,
        } => {
            let ingredients = parse_user_ingredients(&ingredients);
            let recipe = generator()
                .generate_calorie_recipe(&ingredients, dietary, calories)
                .await;
            println!("{}", serde_json::to_string_pretty(&recipe)?);
        }
        Command::Search {
            query,
            category,
            steps,
        } => {
            let client = MealDbClient::new(&config.mealdb);

            if let Some(category) = category {
                let meals = client
                    .filter_by_category(&category)
                    .await
                    .with_context(|| format!("Failed to list category {category}"))?;
                if meals.is_empty() {
                    println!(
                        "{}",
                        messages.t_args("search-empty", language, &[("query", category.as_str())])
                    );
                }
                for meal in &meals {
                    println!("{}  {}", meal.id, meal.name);
                }
                return Ok(());
            }

            let meals = client
                .search(&query)
                .await
                .with_context(|| format!("Failed to search for '{query}'"))?;
            if meals.is_empty() {
                println!(
                    "{}",
                    messages.t_args("search-empty", language, &[("query", query.as_str())])
                );
            }
            for meal in &meals {
                println!("{} ({})", meal.name, meal.id);
                let ingredients = meal
                    .ingredients
                    .iter()
                    .map(|i| match &i.measure {
                        Some(measure) => format!("{measure} {}", i.name),
                        None => i.name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("  {ingredients}");
                for (number, step) in meal.instruction_steps(steps).iter().enumerate() {
                    println!("  {}. {}", number + 1, step);
                }
            }
        }
        Command::Plan { dietary, days } => {
            let client = MealDbClient::new(&config.mealdb);
            let mut rng = StdRng::from_entropy();
            let today = Local::now().date_naive();
            let plan = generate_meal_plan(&client, dietary, today, days, &mut rng).await;

            for day in &plan {
                let number = day.day.to_string();
                let date = day.date_label();
                let calories = day.total_calories().to_string();
                println!(
                    "{}",
                    messages.t_args(
                        "plan-day-header",
                        language,
                        &[("day", number.as_str()), ("date", date.as_str()), ("calories", calories.as_str())],
                    )
                );
                for meal in &day.meals {
                    let recipe = meal
                        .recipe
                        .as_ref()
                        .map(|r| r.name.clone())
                        .unwrap_or_else(|| messages.t("plan-meal-unavailable", language));
                    let calories = meal.calories.to_string();
                    println!(
                        "  {}",
                        messages.t_args(
                            "plan-meal-line",
                            language,
                            &[
                                ("meal", meal.meal_type.label()),
                                ("calories", calories.as_str()),
                                ("recipe", recipe.as_str()),
                            ],
                        )
                    );
                }
            }
        }
        Command::DietPlan {
            weight,
            target,
            height,
            dietary,
        } => {
            let metrics = BodyMetrics {
                current_weight_kg: weight,
                target_weight_kg: target,
                height_cm: height,
            };
            let bmi = format!("{:.1}", metrics.bmi());
            let loss = format!("{:.1}", metrics.weight_to_lose());
            println!(
                "{}",
                messages.t_args(
                    "diet-plan-summary",
                    language,
                    &[("bmi", bmi.as_str()), ("loss", loss.as_str())],
                )
            );

            let client = GeminiClient::new(&config.gemini);
            let plan = match generate_ai_meal_plan(&client, dietary, &metrics).await {
                Ok(plan) => plan,
                Err(e) => {
                    eprintln!("{}", messages.t("diet-plan-failed", language));
                    return Err(e.into());
                }
            };

            for day in &plan {
                let calories = day.total_calories.to_string();
                println!(
                    "{}",
                    messages.t_args(
                        "diet-plan-day-header",
                        language,
                        &[("date", day.date.as_str()), ("calories", calories.as_str())],
                    )
                );
                for meal in &day.meals {
                    let calories = meal.calories.to_string();
                    println!(
                        "  {}",
                        messages.t_args(
                            "plan-meal-line",
                            language,
                            &[
                                ("meal", meal.name.as_str()),
                                ("calories", calories.as_str()),
                                ("recipe", meal.description.as_str()),
                            ],
                        )
                    );
                }
                if let Some(tip) = &day.day_tip {
                    println!(
                        "  {}",
                        messages.t_args("diet-plan-tip", language, &[("tip", tip.as_str())])
                    );
                }
            }
        }
        Command::Languages => {
            for lang in Language::ALL {
                println!(
                    "{:<3} {:<10} {:<14} {}",
                    lang.code(),
                    lang.name(),
                    lang.native_name(),
                    lang.speech_locale()
                );
            }
        }
        Command::Ping => {
            let generator = generator();
            match generator.test_connection().await {
                Ok(reply) => println!(
                    "{}",
                    messages.t_args(
                        "connection-ok",
                        language,
                        &[("model", generator.model_name()), ("reply", reply.as_str())],
                    )
                ),
                Err(e) => {
                    let error = e.to_string();
                    eprintln!(
                        "{}",
                        messages.t_args("connection-failed", language, &[("error", error.as_str())])
                    );
                    return Err(e.into());
                }
            }
        }
        Command::Voice { transcript } => {
            let mut session = VoiceCommandSet::common();
            session.start_listening();
            match session.dispatch(&transcript) {
                Some(command) => println!(
                    "{} ({:?})",
                    messages.t_args(
                        "voice-recognized",
                        language,
                        &[("description", command.description.as_str())],
                    ),
                    command.action
                ),
                None => println!(
                    "{}",
                    messages.t_args(
                        "voice-unrecognized",
                        language,
                        &[("transcript", transcript.as_str())],
                    )
                ),
            }
            session.stop_listening();
        }
    }

    Ok(())
}
