//! Generation Provider Port - Interface for remote generative model calls.
//!
//! This port abstracts the external generative model (Gemini in production,
//! a configurable mock in tests). The orchestration core depends only on this
//! contract; the concrete provider lives in an adapter.
//!
//! # Design
//!
//! - A single prompt string plus sampling configuration per call
//! - Raw model text returned verbatim; extraction happens downstream
//! - Error classification distinguishes fatal setup failures from
//!   transient transport/quota failures

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for invoking a remote generative model.
///
/// Implementations must be safely reusable across concurrent orchestration
/// runs without per-run reinitialization.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Send a prompt with sampling configuration and return the raw model text.
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError>;

    /// Get provider information (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Sampling configuration passed alongside each prompt.
///
/// These parameters are never rendered into the prompt text itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Creativity/randomness factor, 0.0-1.0.
    pub temperature: f32,
    /// Nucleus sampling threshold, 0.0-1.0.
    pub top_p: f32,
    /// Candidate pool width.
    pub top_k: u32,
    /// Maximum output length in tokens.
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Creates a configuration with default sampling parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the nucleus sampling threshold.
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    /// Sets the candidate pool width.
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the maximum output length.
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 4096,
        }
    }
}

/// Provider information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g., "gemini").
    pub name: String,
    /// Model identifier (e.g., "gemini-1.5-flash").
    pub model: String,
}

impl ProviderInfo {
    /// Creates new provider info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Generation provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Provider credential or setup missing. Fatal, never retried.
    #[error("provider not configured: {0}")]
    Unconfigured(String),

    /// Quota exceeded or rate limited by the provider.
    #[error("quota exceeded: retry after {retry_after_secs}s")]
    Quota {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },

    /// Network error during request.
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider API returned an error status.
    #[error("provider API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error details from the response body.
        message: String,
    },

    /// Provider returned a response with no usable content.
    #[error("provider returned an empty response")]
    EmptyResponse,
}

impl ProviderError {
    /// Creates an unconfigured error.
    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self::Unconfigured(message.into())
    }

    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Only missing configuration is fatal: further attempts against an
    /// unconfigured provider are certainly futile.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, ProviderError::Unconfigured(_))
    }
}
