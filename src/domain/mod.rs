//! Domain layer - recipe generation core.
//!
//! Contains the constraint and artifact models plus the generation pipeline
//! (prompt construction, response extraction, schema validation, and the
//! retry orchestrator).

pub mod constraints;
pub mod generation;
pub mod recipe;

pub use constraints::{ConstraintSet, Difficulty, MealType};
pub use recipe::{Ingredient, NutritionInfo, Recipe, RecipeId, RecipeStep};
