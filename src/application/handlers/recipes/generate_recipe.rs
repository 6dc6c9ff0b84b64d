//! GenerateRecipeHandler - Command handler for AI recipe generation.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::generation::{GenerationError, GenerationOrchestrator};
use crate::domain::{ConstraintSet, Recipe, RecipeId};
use crate::ports::{RecipeRepository, RepositoryError};

/// Command to generate a recipe from constraints.
#[derive(Debug, Clone)]
pub struct GenerateRecipeCommand {
    /// Identity of the caller requesting generation.
    pub owner: String,
    pub constraints: ConstraintSet,
}

/// Result of a successful generation.
#[derive(Debug, Clone)]
pub struct GenerateRecipeResult {
    pub id: RecipeId,
    pub recipe: Recipe,
}

/// Errors returned by the generation handler.
#[derive(Debug, Error)]
pub enum GenerateRecipeError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Handler for generating and persisting recipes.
pub struct GenerateRecipeHandler {
    orchestrator: Arc<GenerationOrchestrator>,
    repository: Arc<dyn RecipeRepository>,
}

impl GenerateRecipeHandler {
    pub fn new(
        orchestrator: Arc<GenerationOrchestrator>,
        repository: Arc<dyn RecipeRepository>,
    ) -> Self {
        Self {
            orchestrator,
            repository,
        }
    }

    /// Runs generation for the command's constraints and persists the result
    /// together with the constraints that produced it.
    pub async fn handle(
        &self,
        cmd: GenerateRecipeCommand,
    ) -> Result<GenerateRecipeResult, GenerateRecipeError> {
        let recipe = self.orchestrator.orchestrate(&cmd.constraints).await?;

        let id = self
            .repository
            .save(&cmd.owner, recipe.clone(), Some(cmd.constraints))
            .await?;

        tracing::info!(%id, owner = %cmd.owner, title = %recipe.title, "recipe generated");

        Ok(GenerateRecipeResult { id, recipe })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGenerationProvider;
    use crate::adapters::persistence::InMemoryRecipeRepository;
    use crate::ports::GenerationConfig;

    fn valid_recipe_json() -> String {
        serde_json::json!({
            "title": "Miso Glazed Eggplant",
            "description": "Broiled eggplant with a sweet-savory miso glaze.",
            "servings": 2,
            "calories_per_serving": 310,
            "difficulty": "Easy",
            "nutrition": { "protein": "9g", "carbohydrates": "28g", "fat": "14g" },
            "ingredients": [ { "name": "eggplant", "quantity": "2" } ],
            "steps": [ { "step_number": 1, "instruction": "Halve and score the eggplant." } ]
        })
        .to_string()
    }

    fn handler(
        provider: MockGenerationProvider,
        repository: InMemoryRecipeRepository,
    ) -> GenerateRecipeHandler {
        let orchestrator = GenerationOrchestrator::new(
            Arc::new(provider),
            GenerationConfig::default(),
        );
        GenerateRecipeHandler::new(Arc::new(orchestrator), Arc::new(repository))
    }

    #[tokio::test]
    async fn generated_recipe_is_persisted_with_constraints() {
        let repository = InMemoryRecipeRepository::new();
        let provider = MockGenerationProvider::new().with_response(valid_recipe_json());
        let handler = handler(provider, repository.clone());

        let constraints = ConstraintSet::new().with_cuisine("Japanese");
        let result = handler
            .handle(GenerateRecipeCommand {
                owner: "alice".to_string(),
                constraints: constraints.clone(),
            })
            .await
            .unwrap();

        let stored = repository.get(result.id).await.unwrap().unwrap();
        assert_eq!(stored.owner, "alice");
        assert_eq!(stored.recipe, result.recipe);
        assert_eq!(stored.constraints, Some(constraints));
        assert!(stored.recipe.is_generated);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_is_persisted_when_generation_fails() {
        let repository = InMemoryRecipeRepository::new();
        let provider = MockGenerationProvider::new()
            .with_response("garbage")
            .with_response("more garbage");
        let handler = handler(provider, repository.clone());

        let err = handler
            .handle(GenerateRecipeCommand {
                owner: "alice".to_string(),
                constraints: ConstraintSet::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateRecipeError::Generation(_)));
        assert!(repository.is_empty());
    }
}
