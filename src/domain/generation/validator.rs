//! Artifact schema validation.
//!
//! `validate_recipe` is the single source of truth for what counts as a
//! valid recipe: the generation loop and the manual authoring path both go
//! through it. All violations are collected and reported together rather
//! than failing on the first one, and unspecified optional fields receive
//! documented defaults instead of being dropped.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::constraints::Difficulty;
use crate::domain::recipe::{Ingredient, NutritionInfo, Recipe, RecipeStep};

/// Title length bounds in characters.
pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 200;

/// Description length bounds in characters.
pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Servings bounds.
pub const SERVINGS_MIN: u64 = 1;
pub const SERVINGS_MAX: u64 = 100;

/// Calories-per-serving ceiling.
pub const CALORIES_MAX: u64 = 5000;

/// A single schema violation at a field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Path to the offending field (e.g., `steps[2].step_number`).
    pub path: String,
    /// Why the field failed validation.
    pub reason: String,
}

impl FieldViolation {
    /// Creates a new violation.
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Candidate failed artifact schema validation.
///
/// Carries every violation found, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", format_violations(.violations))]
pub struct SchemaValidationError {
    /// All violations found in the candidate.
    pub violations: Vec<FieldViolation>,
}

impl SchemaValidationError {
    /// Creates an error from a list of violations.
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    let rendered: Vec<String> = violations.iter().map(FieldViolation::to_string).collect();
    format!("schema validation failed: {}", rendered.join("; "))
}

#[derive(Default)]
struct Violations(Vec<FieldViolation>);

impl Violations {
    fn push(&mut self, path: impl Into<String>, reason: impl Into<String>) {
        self.0.push(FieldViolation::new(path, reason));
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Validates a candidate value against the full recipe schema.
///
/// Returns a fully populated `Recipe` with documented defaults applied
/// (`is_generated = true`, empty strings/arrays/map for optional fields),
/// or a `SchemaValidationError` listing every violation.
pub fn validate_recipe(candidate: &Value) -> Result<Recipe, SchemaValidationError> {
    let Some(obj) = candidate.as_object() else {
        return Err(SchemaValidationError::new(vec![FieldViolation::new(
            "$",
            "candidate is not an object",
        )]));
    };

    let mut v = Violations::default();

    let title = required_string(obj, "title", &mut v);
    if let Some(ref title) = title {
        let len = title.chars().count();
        if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
            v.push(
                "title",
                format!(
                    "length must be between {} and {} characters, got {}",
                    TITLE_MIN_CHARS, TITLE_MAX_CHARS, len
                ),
            );
        }
    }

    let description = required_string(obj, "description", &mut v);
    if let Some(ref description) = description {
        let len = description.chars().count();
        if !(DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&len) {
            v.push(
                "description",
                format!(
                    "length must be between {} and {} characters, got {}",
                    DESCRIPTION_MIN_CHARS, DESCRIPTION_MAX_CHARS, len
                ),
            );
        }
    }

    let prep_time = optional_string(obj, "prep_time", &mut v);
    let cook_time = optional_string(obj, "cook_time", &mut v);
    let total_time = optional_string(obj, "total_time", &mut v);

    let servings = required_integer(obj, "servings", &mut v);
    if let Some(servings) = servings {
        if !(SERVINGS_MIN..=SERVINGS_MAX).contains(&servings) {
            v.push(
                "servings",
                format!(
                    "must be between {} and {}, got {}",
                    SERVINGS_MIN, SERVINGS_MAX, servings
                ),
            );
        }
    }

    let calories = required_integer(obj, "calories_per_serving", &mut v);
    if let Some(calories) = calories {
        if calories > CALORIES_MAX {
            v.push(
                "calories_per_serving",
                format!("must be at most {}, got {}", CALORIES_MAX, calories),
            );
        }
    }

    let difficulty = validate_difficulty(obj, &mut v);
    let nutrition = validate_nutrition(obj, &mut v);
    let ingredients = validate_ingredients(obj, &mut v);
    let steps = validate_steps(obj, &mut v);
    let shopping_list = validate_shopping_list(obj, &mut v);
    let tags = validate_tags(obj, &mut v);
    let is_generated = validate_is_generated(obj, &mut v);

    if !v.is_empty() {
        return Err(SchemaValidationError::new(v.0));
    }

    Ok(Recipe {
        title: title.unwrap_or_default(),
        description: description.unwrap_or_default(),
        prep_time,
        cook_time,
        total_time,
        servings: servings.unwrap_or_default() as u32,
        calories_per_serving: calories.unwrap_or_default() as u32,
        difficulty: difficulty.unwrap_or_default(),
        nutrition: nutrition.unwrap_or_default(),
        ingredients,
        steps,
        shopping_list,
        tags,
        is_generated,
    })
}

fn required_string(obj: &Map<String, Value>, key: &str, v: &mut Violations) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            v.push(key, "must be a string");
            None
        }
        None => {
            v.push(key, "missing required field");
            None
        }
    }
}

fn optional_string(obj: &Map<String, Value>, key: &str, v: &mut Violations) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(_) => {
            v.push(key, "must be a string");
            String::new()
        }
    }
}

fn required_integer(obj: &Map<String, Value>, key: &str, v: &mut Violations) -> Option<u64> {
    match obj.get(key) {
        Some(value) => match value.as_u64() {
            Some(n) => Some(n),
            None => {
                v.push(key, "must be a non-negative integer");
                None
            }
        },
        None => {
            v.push(key, "missing required field");
            None
        }
    }
}

fn validate_difficulty(obj: &Map<String, Value>, v: &mut Violations) -> Option<Difficulty> {
    match obj.get("difficulty") {
        Some(Value::String(s)) => match s.parse::<Difficulty>() {
            Ok(difficulty) => Some(difficulty),
            Err(()) => {
                v.push("difficulty", "must be one of Easy, Medium, Hard");
                None
            }
        },
        Some(_) => {
            v.push("difficulty", "must be a string");
            None
        }
        None => {
            v.push("difficulty", "missing required field");
            None
        }
    }
}

fn validate_nutrition(obj: &Map<String, Value>, v: &mut Violations) -> Option<NutritionInfo> {
    let Some(value) = obj.get("nutrition") else {
        v.push("nutrition", "missing required field");
        return None;
    };
    let Some(nutrition) = value.as_object() else {
        v.push("nutrition", "must be an object");
        return None;
    };

    let protein = required_string_at(nutrition, "protein", "nutrition", v);
    let carbohydrates = required_string_at(nutrition, "carbohydrates", "nutrition", v);
    let fat = required_string_at(nutrition, "fat", "nutrition", v);

    Some(NutritionInfo {
        protein: protein.unwrap_or_default(),
        carbohydrates: carbohydrates.unwrap_or_default(),
        fat: fat.unwrap_or_default(),
        fiber: optional_string_at(nutrition, "fiber", "nutrition", v),
        sugar: optional_string_at(nutrition, "sugar", "nutrition", v),
        sodium: optional_string_at(nutrition, "sodium", "nutrition", v),
    })
}

fn required_string_at(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
    v: &mut Violations,
) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            v.push(format!("{}.{}", parent, key), "must be a string");
            None
        }
        None => {
            v.push(format!("{}.{}", parent, key), "missing required field");
            None
        }
    }
}

fn optional_string_at(
    obj: &Map<String, Value>,
    key: &str,
    parent: &str,
    v: &mut Violations,
) -> String {
    match obj.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(_) => {
            v.push(format!("{}.{}", parent, key), "must be a string");
            String::new()
        }
    }
}

fn validate_ingredients(obj: &Map<String, Value>, v: &mut Violations) -> Vec<Ingredient> {
    let Some(value) = obj.get("ingredients") else {
        v.push("ingredients", "missing required field");
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        v.push("ingredients", "must be an array");
        return Vec::new();
    };
    if items.is_empty() {
        v.push("ingredients", "must contain at least one ingredient");
        return Vec::new();
    }

    let mut ingredients = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("ingredients[{}]", i);
        let Some(entry) = item.as_object() else {
            v.push(path, "must be an object");
            continue;
        };

        let name = required_string_at(entry, "name", &path, v);
        if let Some(ref name) = name {
            if name.trim().is_empty() {
                v.push(format!("{}.name", path), "must not be empty");
            }
        }
        let quantity = required_string_at(entry, "quantity", &path, v);

        ingredients.push(Ingredient {
            name: name.unwrap_or_default(),
            quantity: quantity.unwrap_or_default(),
            notes: optional_string_at(entry, "notes", &path, v),
        });
    }
    ingredients
}

fn validate_steps(obj: &Map<String, Value>, v: &mut Violations) -> Vec<RecipeStep> {
    let Some(value) = obj.get("steps") else {
        v.push("steps", "missing required field");
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        v.push("steps", "must be an array");
        return Vec::new();
    };
    if items.is_empty() {
        v.push("steps", "must contain at least one step");
        return Vec::new();
    }

    let mut steps = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = format!("steps[{}]", i);
        let Some(entry) = item.as_object() else {
            v.push(path, "must be an object");
            continue;
        };

        let step_number = match entry.get("step_number").and_then(Value::as_u64) {
            Some(n) if (1..=u64::from(u32::MAX)).contains(&n) => Some(n as u32),
            Some(_) | None => {
                v.push(format!("{}.step_number", path), "must be a positive integer");
                None
            }
        };

        let instruction = required_string_at(entry, "instruction", &path, v);
        if let Some(ref instruction) = instruction {
            if instruction.trim().is_empty() {
                v.push(format!("{}.instruction", path), "must not be empty");
            }
        }

        steps.push(RecipeStep {
            step_number: step_number.unwrap_or_default(),
            instruction: instruction.unwrap_or_default(),
        });
    }
    steps
}

fn validate_shopping_list(
    obj: &Map<String, Value>,
    v: &mut Violations,
) -> BTreeMap<String, Vec<String>> {
    let mut shopping_list = BTreeMap::new();
    let Some(value) = obj.get("shopping_list") else {
        return shopping_list;
    };
    if value.is_null() {
        return shopping_list;
    }
    let Some(categories) = value.as_object() else {
        v.push("shopping_list", "must be an object keyed by category");
        return shopping_list;
    };

    for (category, items) in categories {
        let path = format!("shopping_list.{}", category);
        let Some(items) = items.as_array() else {
            v.push(path, "must be an array of items");
            continue;
        };
        if items.is_empty() {
            v.push(path, "must contain at least one item");
            continue;
        }

        let mut entries = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => entries.push(s.to_string()),
                None => v.push(format!("{}[{}]", path, i), "must be a string"),
            }
        }
        shopping_list.insert(category.clone(), entries);
    }
    shopping_list
}

fn validate_tags(obj: &Map<String, Value>, v: &mut Violations) -> Vec<String> {
    let Some(value) = obj.get("tags") else {
        return Vec::new();
    };
    if value.is_null() {
        return Vec::new();
    }
    let Some(items) = value.as_array() else {
        v.push("tags", "must be an array of strings");
        return Vec::new();
    };

    let mut tags = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match item.as_str() {
            Some(s) => tags.push(s.to_string()),
            None => v.push(format!("tags[{}]", i), "must be a string"),
        }
    }
    tags
}

fn validate_is_generated(obj: &Map<String, Value>, v: &mut Violations) -> bool {
    match obj.get("is_generated") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Null) | None => true,
        Some(_) => {
            v.push("is_generated", "must be a boolean");
            true
        }
    }
}
