//! Persistence adapters.

pub mod in_memory_recipe_repository;

pub use in_memory_recipe_repository::InMemoryRecipeRepository;
