//! In-memory recipe repository.
//!
//! HashMap-backed implementation of the RecipeRepository port. State is lost
//! on restart; suitable for tests and local development.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{ConstraintSet, Recipe, RecipeId};
use crate::ports::{RecipeRepository, RepositoryError, StoredRecipe};

/// In-memory recipe store.
///
/// Clones share the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Arc<Mutex<HashMap<RecipeId, StoredRecipe>>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored recipes.
    pub fn len(&self) -> usize {
        self.recipes.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn save(
        &self,
        owner: &str,
        recipe: Recipe,
        constraints: Option<ConstraintSet>,
    ) -> Result<RecipeId, RepositoryError> {
        let id = RecipeId::new();
        let stored = StoredRecipe {
            id,
            owner: owner.to_string(),
            recipe,
            constraints,
            created_at: Utc::now(),
        };
        self.recipes.lock().unwrap().insert(id, stored);
        Ok(id)
    }

    async fn get(&self, id: RecipeId) -> Result<Option<StoredRecipe>, RepositoryError> {
        Ok(self.recipes.lock().unwrap().get(&id).cloned())
    }

    async fn list_for_owner(&self, owner: &str) -> Result<Vec<StoredRecipe>, RepositoryError> {
        let mut recipes: Vec<StoredRecipe> = self
            .recipes
            .lock()
            .unwrap()
            .values()
            .filter(|stored| stored.owner == owner)
            .cloned()
            .collect();
        recipes.sort_by_key(|stored| stored.created_at);
        Ok(recipes)
    }
}
