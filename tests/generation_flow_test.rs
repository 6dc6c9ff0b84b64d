//! End-to-end tests for the recipe generation flow.
//!
//! Exercises the full pipeline through the public API: constraints in,
//! provider responses through extraction and validation, persisted recipe
//! out. The provider is mocked; everything else is real.

use std::sync::Arc;

use mealsmith::adapters::ai::MockGenerationProvider;
use mealsmith::adapters::persistence::InMemoryRecipeRepository;
use mealsmith::application::handlers::recipes::{
    CreateRecipeCommand, CreateRecipeError, CreateRecipeHandler, GenerateRecipeCommand,
    GenerateRecipeError, GenerateRecipeHandler,
};
use mealsmith::domain::generation::{GenerationError, GenerationOrchestrator, RETRY_BUDGET};
use mealsmith::domain::{ConstraintSet, Difficulty, MealType};
use mealsmith::ports::{GenerationConfig, ProviderError, RecipeRepository};

/// Installs a test subscriber so orchestrator logs are visible under
/// `--nocapture`. Safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

fn valid_model_output() -> String {
    serde_json::json!({
        "title": "Peanut-Free Pad Thai",
        "description": "Rice noodles in a tamarind sauce, finished with sunflower seeds instead of peanuts.",
        "prep_time": "20 minutes",
        "cook_time": "15 minutes",
        "total_time": "35 minutes",
        "servings": 4,
        "calories_per_serving": 540,
        "difficulty": "Medium",
        "nutrition": {
            "protein": "21g",
            "carbohydrates": "68g",
            "fat": "19g",
            "sodium": "900mg"
        },
        "ingredients": [
            { "name": "rice noodles", "quantity": "250g" },
            { "name": "tamarind paste", "quantity": "2 tbsp" },
            { "name": "sunflower seeds", "quantity": "3 tbsp", "notes": "toasted" }
        ],
        "steps": [
            { "step_number": 1, "instruction": "Soak the noodles in warm water." },
            { "step_number": 2, "instruction": "Stir-fry and toss with the sauce." }
        ],
        "shopping_list": {
            "pantry": ["rice noodles", "tamarind paste", "sunflower seeds"]
        },
        "tags": ["thai", "peanut-free"]
    })
    .to_string()
}

fn generate_handler(
    provider: MockGenerationProvider,
    repository: InMemoryRecipeRepository,
) -> GenerateRecipeHandler {
    let orchestrator =
        GenerationOrchestrator::new(Arc::new(provider), GenerationConfig::default());
    GenerateRecipeHandler::new(Arc::new(orchestrator), Arc::new(repository))
}

#[tokio::test]
async fn full_generation_flow_persists_a_validated_recipe() {
    init_tracing();
    let repository = InMemoryRecipeRepository::new();
    let provider = MockGenerationProvider::new().with_response(valid_model_output());
    let calls = provider.clone();
    let handler = generate_handler(provider, repository.clone());

    let constraints = ConstraintSet::new()
        .with_allergy("Peanuts")
        .with_cuisine("Thai")
        .with_meal_type(MealType::Dinner);

    let result = handler
        .handle(GenerateRecipeCommand {
            owner: "alice".to_string(),
            constraints: constraints.clone(),
        })
        .await
        .unwrap();

    assert_eq!(result.recipe.title, "Peanut-Free Pad Thai");
    assert_eq!(result.recipe.servings, 4);
    assert_eq!(result.recipe.difficulty, Difficulty::Medium);
    assert!(result.recipe.is_generated);

    // The prompt sent to the provider carries the allergy verbatim.
    assert_eq!(calls.call_count(), 1);
    assert!(calls.prompts()[0].contains("Peanuts"));

    // The recipe landed in storage with its originating constraints.
    let stored = repository.get(result.id).await.unwrap().unwrap();
    assert_eq!(stored.owner, "alice");
    assert_eq!(stored.constraints, Some(constraints));
}

#[tokio::test(start_paused = true)]
async fn fenced_output_is_accepted_on_retry_after_garbage() {
    let repository = InMemoryRecipeRepository::new();
    let provider = MockGenerationProvider::new()
        .with_response("Sure! Here is your recipe in prose form.")
        .with_response(format!("```json\n{}\n```", valid_model_output()));
    let calls = provider.clone();
    let handler = generate_handler(provider, repository.clone());

    let result = handler
        .handle(GenerateRecipeCommand {
            owner: "alice".to_string(),
            constraints: ConstraintSet::new(),
        })
        .await
        .unwrap();

    assert_eq!(calls.call_count(), 2);
    assert_eq!(result.recipe.title, "Peanut-Free Pad Thai");
}

#[tokio::test(start_paused = true)]
async fn budget_is_exactly_two_provider_calls() {
    init_tracing();
    let repository = InMemoryRecipeRepository::new();
    let provider = MockGenerationProvider::new()
        .with_response("garbage")
        .with_response("garbage")
        .with_response(valid_model_output());
    let calls = provider.clone();
    let handler = generate_handler(provider, repository.clone());

    let err = handler
        .handle(GenerateRecipeCommand {
            owner: "alice".to_string(),
            constraints: ConstraintSet::new(),
        })
        .await
        .unwrap_err();

    // The third, valid response is never requested.
    assert_eq!(calls.call_count(), RETRY_BUDGET as usize);
    match err {
        GenerateRecipeError::Generation(GenerationError::RetriesExhausted {
            attempts, ..
        }) => assert_eq!(attempts, RETRY_BUDGET),
        other => panic!("expected RetriesExhausted, got {:?}", other),
    }
    assert!(repository.is_empty());
}

#[tokio::test]
async fn unconfigured_provider_fails_fast() {
    let repository = InMemoryRecipeRepository::new();
    let provider = MockGenerationProvider::new()
        .with_error(ProviderError::unconfigured("GEMINI_API_KEY is not set"));
    let calls = provider.clone();
    let handler = generate_handler(provider, repository.clone());

    let err = handler
        .handle(GenerateRecipeCommand {
            owner: "alice".to_string(),
            constraints: ConstraintSet::new(),
        })
        .await
        .unwrap_err();

    match err {
        GenerateRecipeError::Generation(err) => {
            assert_eq!(err.error_code(), "configuration-missing");
        }
        other => panic!("expected generation error, got {:?}", other),
    }
    assert_eq!(calls.call_count(), 1);
    assert!(repository.is_empty());
}

#[tokio::test]
async fn manual_creation_shares_the_validator_with_generation() {
    let repository = InMemoryRecipeRepository::new();
    let handler = CreateRecipeHandler::new(Arc::new(repository.clone()));

    let payload: serde_json::Value = serde_json::from_str(&valid_model_output()).unwrap();
    let result = handler
        .handle(CreateRecipeCommand {
            owner: "bob".to_string(),
            payload,
        })
        .await
        .unwrap();

    assert!(!result.recipe.is_generated);
    let stored = repository.get(result.id).await.unwrap().unwrap();
    assert!(stored.constraints.is_none());

    // A payload violating the schema is rejected with every violation listed.
    let mut bad: serde_json::Value = serde_json::from_str(&valid_model_output()).unwrap();
    bad["servings"] = serde_json::json!(200);
    bad["ingredients"] = serde_json::json!([]);

    let err = handler
        .handle(CreateRecipeCommand {
            owner: "bob".to_string(),
            payload: bad,
        })
        .await
        .unwrap_err();

    match err {
        CreateRecipeError::Validation(err) => {
            let paths: Vec<&str> = err.violations.iter().map(|v| v.path.as_str()).collect();
            assert!(paths.contains(&"servings"));
            assert!(paths.contains(&"ingredients"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}
