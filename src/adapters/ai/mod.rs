//! AI provider adapters.
//!
//! Concrete implementations of the GenerationProvider port: the Gemini HTTP
//! client used in production and a configurable mock for tests.

pub mod gemini_provider;
pub mod mock_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
pub use mock_provider::MockGenerationProvider;
