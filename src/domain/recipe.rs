//! Recipe artifact types.
//!
//! A `Recipe` is the validated structured output of a generation run (or of
//! the manual authoring path). Instances are only produced by the schema
//! validator, so every field already satisfies the artifact schema's type
//! and bound constraints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

use super::constraints::Difficulty;

/// Stored recipe identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Per-serving nutrition breakdown.
///
/// The macro fields are required by the schema; the extras default to empty
/// strings when the model omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionInfo {
    /// Protein amount (e.g., "32g").
    pub protein: String,
    /// Carbohydrate amount.
    pub carbohydrates: String,
    /// Fat amount.
    pub fat: String,
    /// Fiber amount, if reported.
    #[serde(default)]
    pub fiber: String,
    /// Sugar amount, if reported.
    #[serde(default)]
    pub sugar: String,
    /// Sodium amount, if reported.
    #[serde(default)]
    pub sodium: String,
}

/// A single recipe ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name.
    pub name: String,
    /// Quantity (e.g., "200g", "2 cups").
    pub quantity: String,
    /// Preparation notes (e.g., "finely chopped").
    #[serde(default)]
    pub notes: String,
}

/// One ordered preparation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeStep {
    /// 1-based step position; always positive.
    pub step_number: u32,
    /// Instruction text.
    pub instruction: String,
}

/// A schema-valid recipe artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe title, 3-200 characters.
    pub title: String,
    /// Recipe description, 10-2000 characters.
    pub description: String,
    /// Preparation time (e.g., "20 minutes").
    #[serde(default)]
    pub prep_time: String,
    /// Cooking time.
    #[serde(default)]
    pub cook_time: String,
    /// Total time.
    #[serde(default)]
    pub total_time: String,
    /// Number of servings, 1-100.
    pub servings: u32,
    /// Calories per serving, 0-5000.
    pub calories_per_serving: u32,
    /// Difficulty level.
    pub difficulty: Difficulty,
    /// Per-serving nutrition breakdown.
    pub nutrition: NutritionInfo,
    /// Ingredient list; never empty.
    pub ingredients: Vec<Ingredient>,
    /// Ordered preparation steps; never empty.
    pub steps: Vec<RecipeStep>,
    /// Shopping list keyed by category; every present category has at
    /// least one item.
    #[serde(default)]
    pub shopping_list: BTreeMap<String, Vec<String>>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether this artifact was produced by the generation pipeline.
    #[serde(default = "default_is_generated")]
    pub is_generated: bool,
}

fn default_is_generated() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_recipe() -> Recipe {
        Recipe {
            title: "Test Dish".to_string(),
            description: "A dish for testing.".to_string(),
            prep_time: String::new(),
            cook_time: String::new(),
            total_time: String::new(),
            servings: 4,
            calories_per_serving: 500,
            difficulty: Difficulty::Medium,
            nutrition: NutritionInfo {
                protein: "20g".to_string(),
                carbohydrates: "40g".to_string(),
                fat: "15g".to_string(),
                ..Default::default()
            },
            ingredients: vec![Ingredient {
                name: "rice".to_string(),
                quantity: "1 cup".to_string(),
                notes: String::new(),
            }],
            steps: vec![RecipeStep {
                step_number: 1,
                instruction: "Cook the rice.".to_string(),
            }],
            shopping_list: BTreeMap::new(),
            tags: Vec::new(),
            is_generated: true,
        }
    }

    #[test]
    fn recipe_serializes_round_trip() {
        let recipe = minimal_recipe();
        let json = serde_json::to_string(&recipe).unwrap();
        let back: Recipe = serde_json::from_str(&json).unwrap();
        assert_eq!(back, recipe);
    }

    #[test]
    fn is_generated_defaults_to_true_on_deserialization() {
        let mut value = serde_json::to_value(minimal_recipe()).unwrap();
        value.as_object_mut().unwrap().remove("is_generated");

        let recipe: Recipe = serde_json::from_value(value).unwrap();
        assert!(recipe.is_generated);
    }

    #[test]
    fn recipe_ids_are_unique() {
        assert_ne!(RecipeId::new(), RecipeId::new());
    }
}
