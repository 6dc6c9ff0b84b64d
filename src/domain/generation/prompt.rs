//! Prompt construction from a constraint set.
//!
//! `build_prompt` is a pure function: identical constraints always yield a
//! byte-identical prompt. Constraint lines appear in a fixed declared order
//! and absent optional fields emit no line at all. Sampling parameters are
//! deliberately not part of the prompt text; they travel separately in
//! `GenerationConfig`.

use std::fmt::Write;

use crate::domain::constraints::ConstraintSet;

/// Literal output-schema template appended to every prompt.
///
/// Field names and nesting mirror the artifact schema enforced by
/// `validate_recipe`; the two must stay in sync.
pub const OUTPUT_SCHEMA_TEMPLATE: &str = r#"{
  "title": "string (3-200 characters)",
  "description": "string (10-2000 characters)",
  "prep_time": "string, e.g. \"20 minutes\"",
  "cook_time": "string, e.g. \"45 minutes\"",
  "total_time": "string, e.g. \"1 hour 5 minutes\"",
  "servings": "integer (1-100)",
  "calories_per_serving": "integer (0-5000)",
  "difficulty": "\"Easy\" | \"Medium\" | \"Hard\"",
  "nutrition": {
    "protein": "string, e.g. \"32g\"",
    "carbohydrates": "string",
    "fat": "string",
    "fiber": "string (optional)",
    "sugar": "string (optional)",
    "sodium": "string (optional)"
  },
  "ingredients": [
    { "name": "string", "quantity": "string", "notes": "string (optional)" }
  ],
  "steps": [
    { "step_number": "integer starting at 1", "instruction": "string" }
  ],
  "shopping_list": {
    "category name": ["item", "item"]
  },
  "tags": ["string"]
}"#;

/// Renders a constraint set into the single prompt sent to the provider.
pub fn build_prompt(constraints: &ConstraintSet) -> String {
    let mut prompt = String::with_capacity(2048);

    prompt.push_str(
        "You are an expert chef and nutritionist. Create an original recipe \
         tailored to the requirements below. Do not reproduce an existing \
         published recipe.\n\nRequirements:\n",
    );

    // Always-present fields first.
    let _ = writeln!(prompt, "- Servings: {}", constraints.servings);
    let _ = writeln!(prompt, "- Difficulty: {}", constraints.difficulty);
    if let Some(meal_type) = constraints.meal_type {
        let _ = writeln!(prompt, "- Meal type: {}", meal_type);
    }

    // Optional constraint lines in fixed declared order.
    if !constraints.dietary_preferences.is_empty() {
        let _ = writeln!(
            prompt,
            "- Dietary preferences: {}",
            join(&constraints.dietary_preferences)
        );
    }
    if !constraints.allergies.is_empty() {
        // Hard safety requirement: allergies always carry the strict qualifier.
        let _ = writeln!(
            prompt,
            "- Allergies (strict, the recipe must completely avoid these): {}",
            join(&constraints.allergies)
        );
    }
    if let Some(ref focus) = constraints.nutritional_focus {
        let _ = writeln!(prompt, "- Nutritional focus: {}", focus);
    }
    if let Some(ref cuisine) = constraints.cuisine {
        let _ = writeln!(prompt, "- Cuisine: {}", cuisine);
    }
    if let Some(minutes) = constraints.max_prep_time_minutes {
        let _ = writeln!(prompt, "- Maximum preparation time: {} minutes", minutes);
    }
    if let Some(minutes) = constraints.max_cook_time_minutes {
        let _ = writeln!(prompt, "- Maximum cooking time: {} minutes", minutes);
    }
    if let Some(calories) = constraints.max_calories {
        let _ = writeln!(prompt, "- Maximum calories per serving: {}", calories);
    }
    if !constraints.preferred_ingredients.is_empty() {
        let _ = writeln!(
            prompt,
            "- Preferred ingredients: {}",
            join(&constraints.preferred_ingredients)
        );
    }
    if !constraints.excluded_ingredients.is_empty() {
        let _ = writeln!(
            prompt,
            "- Excluded ingredients: {}",
            join(&constraints.excluded_ingredients)
        );
    }

    prompt.push_str(
        "\nReturn only a JSON object with exactly this structure, with no \
         surrounding prose and no code fences:\n",
    );
    prompt.push_str(OUTPUT_SCHEMA_TEMPLATE);
    prompt.push('\n');

    prompt
}

fn join(items: &std::collections::BTreeSet<String>) -> String {
    items.iter().cloned().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constraints::{Difficulty, MealType};
    use proptest::prelude::*;

    fn full_constraints() -> ConstraintSet {
        ConstraintSet::new()
            .with_dietary_preference("vegan")
            .with_dietary_preference("gluten-free")
            .with_allergy("Peanuts")
            .with_allergy("Shellfish")
            .with_nutritional_focus("high-protein")
            .with_cuisine("Thai")
            .with_max_prep_time(20)
            .with_max_cook_time(45)
            .with_max_calories(600)
            .with_preferred_ingredient("tofu")
            .with_excluded_ingredient("cilantro")
            .with_meal_type(MealType::Dinner)
    }

    #[test]
    fn identical_constraints_yield_identical_prompts() {
        let constraints = full_constraints();
        assert_eq!(build_prompt(&constraints), build_prompt(&constraints));
    }

    #[test]
    fn insertion_order_does_not_affect_prompt() {
        let a = ConstraintSet::new()
            .with_allergy("Peanuts")
            .with_allergy("Shellfish");
        let b = ConstraintSet::new()
            .with_allergy("Shellfish")
            .with_allergy("Peanuts");
        assert_eq!(build_prompt(&a), build_prompt(&b));
    }

    #[test]
    fn allergies_appear_verbatim_with_strict_qualifier() {
        let prompt = build_prompt(&full_constraints());

        assert!(prompt.contains("Peanuts"));
        assert!(prompt.contains("Shellfish"));
        let allergy_line = prompt
            .lines()
            .find(|line| line.contains("Allergies"))
            .expect("allergy line must be present");
        assert!(allergy_line.contains("strict"));
        assert!(allergy_line.contains("must completely avoid"));
    }

    #[test]
    fn omitted_fields_emit_no_line() {
        let prompt = build_prompt(&ConstraintSet::new());

        assert!(!prompt.contains("Dietary preferences"));
        assert!(!prompt.contains("Allergies"));
        assert!(!prompt.contains("Nutritional focus"));
        assert!(!prompt.contains("Cuisine"));
        assert!(!prompt.contains("Maximum preparation time"));
        assert!(!prompt.contains("Maximum cooking time"));
        assert!(!prompt.contains("Maximum calories"));
        assert!(!prompt.contains("Preferred ingredients"));
        assert!(!prompt.contains("Excluded ingredients"));
        assert!(!prompt.contains("Meal type"));
    }

    #[test]
    fn always_present_fields_are_rendered() {
        let prompt = build_prompt(&ConstraintSet::new().with_difficulty(Difficulty::Easy));
        assert!(prompt.contains("- Servings: 4"));
        assert!(prompt.contains("- Difficulty: Easy"));
    }

    #[test]
    fn constraint_lines_follow_declared_order() {
        let prompt = build_prompt(&full_constraints());
        let positions: Vec<usize> = [
            "Dietary preferences",
            "Allergies",
            "Nutritional focus",
            "Cuisine",
            "Maximum preparation time",
            "Maximum cooking time",
            "Maximum calories",
            "Preferred ingredients",
            "Excluded ingredients",
        ]
        .iter()
        .map(|label| prompt.find(label).expect("label present"))
        .collect();

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn schema_template_is_appended() {
        let prompt = build_prompt(&ConstraintSet::new());
        assert!(prompt.contains(OUTPUT_SCHEMA_TEMPLATE));
        assert!(prompt.contains("no code fences"));
    }

    #[test]
    fn sampling_parameters_are_not_in_prompt() {
        let prompt = build_prompt(&full_constraints());
        assert!(!prompt.contains("temperature"));
        assert!(!prompt.contains("top_p"));
        assert!(!prompt.contains("top_k"));
        assert!(!prompt.contains("max_output_tokens"));
    }

    proptest! {
        #[test]
        fn prompt_is_deterministic_for_arbitrary_constraints(
            preferences in proptest::collection::btree_set("[a-z]{1,12}", 0..5),
            allergies in proptest::collection::btree_set("[A-Za-z]{1,12}", 0..5),
            servings in 1u32..=100,
            max_calories in proptest::option::of(1u32..=5000),
        ) {
            let mut constraints = ConstraintSet::new().with_servings(servings);
            constraints.dietary_preferences = preferences;
            constraints.allergies = allergies.clone();
            constraints.max_calories = max_calories;

            let first = build_prompt(&constraints);
            let second = build_prompt(&constraints);
            prop_assert_eq!(&first, &second);

            for allergy in &allergies {
                prop_assert!(first.contains(allergy.as_str()));
            }
        }
    }
}
