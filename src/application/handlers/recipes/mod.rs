//! Recipe command handlers.

mod create_recipe;
mod generate_recipe;

pub use create_recipe::{
    CreateRecipeCommand, CreateRecipeError, CreateRecipeHandler, CreateRecipeResult,
};
pub use generate_recipe::{
    GenerateRecipeCommand, GenerateRecipeError, GenerateRecipeHandler, GenerateRecipeResult,
};
