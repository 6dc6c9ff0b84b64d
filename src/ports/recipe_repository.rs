//! Recipe Repository Port - Persistence interface for validated recipes.
//!
//! Persistence is an external collaborator: the generation core hands over
//! a fully validated recipe and surfaces storage errors without retrying
//! them. Adapters decide where recipes actually live.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ConstraintSet, Recipe, RecipeId};

/// A recipe as stored, together with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecipe {
    /// Stored recipe identifier.
    pub id: RecipeId,
    /// Identity of the caller who owns this recipe.
    pub owner: String,
    /// The validated recipe artifact.
    pub recipe: Recipe,
    /// Constraints that drove generation; `None` for manually authored recipes.
    pub constraints: Option<ConstraintSet>,
    /// When the recipe was stored.
    pub created_at: DateTime<Utc>,
}

/// Port for recipe persistence.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Persist a validated recipe and return its stored identifier.
    async fn save(
        &self,
        owner: &str,
        recipe: Recipe,
        constraints: Option<ConstraintSet>,
    ) -> Result<RecipeId, RepositoryError>;

    /// Fetch a stored recipe by id.
    async fn get(&self, id: RecipeId) -> Result<Option<StoredRecipe>, RepositoryError>;

    /// List all recipes belonging to an owner.
    async fn list_for_owner(&self, owner: &str) -> Result<Vec<StoredRecipe>, RepositoryError>;
}

/// Errors that can occur during recipe persistence.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}
