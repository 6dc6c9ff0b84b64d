//! Content constraints driving recipe generation.
//!
//! A `ConstraintSet` is built once from already-validated external input and
//! is immutable for the duration of an orchestration run. Collections use
//! `BTreeSet` so that prompt rendering is deterministic regardless of
//! insertion order.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Recipe difficulty level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(()),
        }
    }
}

/// Meal type the recipe is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "Breakfast"),
            MealType::Lunch => write!(f, "Lunch"),
            MealType::Dinner => write!(f, "Dinner"),
            MealType::Snack => write!(f, "Snack"),
            MealType::Dessert => write!(f, "Dessert"),
        }
    }
}

/// Validated input constraints for one orchestration run.
///
/// Allergies are a hard safety requirement: when present they are always
/// rendered into the prompt with a strict-avoidance qualifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    /// Dietary preferences (e.g., "vegan", "keto").
    #[serde(default)]
    pub dietary_preferences: BTreeSet<String>,
    /// Allergies, never to be violated.
    #[serde(default)]
    pub allergies: BTreeSet<String>,
    /// Nutritional focus (e.g., "high-protein").
    pub nutritional_focus: Option<String>,
    /// Cuisine type (e.g., "Thai").
    pub cuisine: Option<String>,
    /// Preparation time cap in minutes.
    pub max_prep_time_minutes: Option<u32>,
    /// Cooking time cap in minutes.
    pub max_cook_time_minutes: Option<u32>,
    /// Calorie ceiling per serving, at most 5000.
    pub max_calories: Option<u32>,
    /// Number of servings.
    #[serde(default = "default_servings")]
    pub servings: u32,
    /// Target difficulty.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Ingredients the recipe should favor.
    #[serde(default)]
    pub preferred_ingredients: BTreeSet<String>,
    /// Ingredients the recipe must not use.
    #[serde(default)]
    pub excluded_ingredients: BTreeSet<String>,
    /// Intended meal type.
    pub meal_type: Option<MealType>,
}

fn default_servings() -> u32 {
    4
}

impl ConstraintSet {
    /// Creates an empty constraint set with default servings and difficulty.
    pub fn new() -> Self {
        Self {
            servings: default_servings(),
            ..Self::default()
        }
    }

    /// Adds a dietary preference.
    pub fn with_dietary_preference(mut self, preference: impl Into<String>) -> Self {
        self.dietary_preferences.insert(preference.into());
        self
    }

    /// Adds an allergy. Allergies are never omitted from the prompt.
    pub fn with_allergy(mut self, allergy: impl Into<String>) -> Self {
        self.allergies.insert(allergy.into());
        self
    }

    /// Sets the nutritional focus.
    pub fn with_nutritional_focus(mut self, focus: impl Into<String>) -> Self {
        self.nutritional_focus = Some(focus.into());
        self
    }

    /// Sets the cuisine type.
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Sets the preparation time cap in minutes.
    pub fn with_max_prep_time(mut self, minutes: u32) -> Self {
        self.max_prep_time_minutes = Some(minutes);
        self
    }

    /// Sets the cooking time cap in minutes.
    pub fn with_max_cook_time(mut self, minutes: u32) -> Self {
        self.max_cook_time_minutes = Some(minutes);
        self
    }

    /// Sets the calorie ceiling per serving.
    pub fn with_max_calories(mut self, calories: u32) -> Self {
        self.max_calories = Some(calories);
        self
    }

    /// Sets the number of servings.
    pub fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Sets the target difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Adds a preferred ingredient.
    pub fn with_preferred_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.preferred_ingredients.insert(ingredient.into());
        self
    }

    /// Adds an excluded ingredient.
    pub fn with_excluded_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.excluded_ingredients.insert(ingredient.into());
        self
    }

    /// Sets the intended meal type.
    pub fn with_meal_type(mut self, meal_type: MealType) -> Self {
        self.meal_type = Some(meal_type);
        self
    }
}
