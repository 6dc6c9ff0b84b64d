//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `GenerationProvider` - Port for remote generative model invocations
//! - `RecipeRepository` - Port for recipe persistence

mod generation_provider;
mod recipe_repository;

pub use generation_provider::{GenerationConfig, GenerationProvider, ProviderError, ProviderInfo};
pub use recipe_repository::{RecipeRepository, RepositoryError, StoredRecipe};
