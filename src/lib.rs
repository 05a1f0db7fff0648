//! # Recipe Assistant
//!
//! Ingredient matching against recipe data, AI recipe generation with a
//! deterministic fallback, weekly meal planning and voice command dispatch.

pub mod config;
pub mod language;
pub mod llm;
pub mod localization;
pub mod matcher;
pub mod meal_plan;
pub mod mealdb;
pub mod prompts;
pub mod recipe_errors;
pub mod recipe_generator;
pub mod voice_commands;
