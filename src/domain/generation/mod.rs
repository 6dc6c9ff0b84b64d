//! Recipe generation pipeline.
//!
//! Control flow: `ConstraintSet` -> prompt construction -> (loop: provider
//! call -> extraction -> validation) under the orchestrator's retry budget
//! -> validated `Recipe`. Retryable failures stay internal to the loop; only
//! the final outcome crosses the module boundary.

mod errors;
mod extractor;
mod orchestrator;
mod prompt;
mod validator;

pub use errors::{FailureKind, GenerationError};
pub use extractor::{extract, ExtractionError};
pub use orchestrator::{
    AttemptOutcome, GenerationAttempt, GenerationOrchestrator, RETRY_BUDGET, RETRY_DELAY,
};
pub use prompt::{build_prompt, OUTPUT_SCHEMA_TEMPLATE};
pub use validator::{validate_recipe, FieldViolation, SchemaValidationError};
