//! CreateRecipeHandler - Command handler for manually authored recipes.
//!
//! Manual submissions go through the same artifact schema validation as
//! generated output, but are stored with `is_generated = false` and no
//! originating constraints.

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::generation::{validate_recipe, SchemaValidationError};
use crate::domain::{Recipe, RecipeId};
use crate::ports::{RecipeRepository, RepositoryError};

/// Command to store a manually authored recipe.
#[derive(Debug, Clone)]
pub struct CreateRecipeCommand {
    /// Identity of the caller submitting the recipe.
    pub owner: String,
    /// Raw recipe payload, validated before storage.
    pub payload: Value,
}

/// Result of a successful manual creation.
#[derive(Debug, Clone)]
pub struct CreateRecipeResult {
    pub id: RecipeId,
    pub recipe: Recipe,
}

/// Errors returned by the manual creation handler.
#[derive(Debug, Error)]
pub enum CreateRecipeError {
    #[error(transparent)]
    Validation(#[from] SchemaValidationError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Handler for validating and persisting manually authored recipes.
pub struct CreateRecipeHandler {
    repository: Arc<dyn RecipeRepository>,
}

impl CreateRecipeHandler {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateRecipeCommand,
    ) -> Result<CreateRecipeResult, CreateRecipeError> {
        let mut recipe = validate_recipe(&cmd.payload)?;
        // Manual submissions are never marked as generated, regardless of
        // what the payload claims.
        recipe.is_generated = false;

        let id = self
            .repository
            .save(&cmd.owner, recipe.clone(), None)
            .await?;

        tracing::info!(%id, owner = %cmd.owner, title = %recipe.title, "recipe created");

        Ok(CreateRecipeResult { id, recipe })
    }
}
