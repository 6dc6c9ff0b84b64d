//! Mock generation provider for testing.
//!
//! Configurable mock implementation of the GenerationProvider port, allowing
//! tests to exercise the orchestration loop without calling a real model API.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Error injection for resilience testing
//! - Simulated latency for timeout testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockGenerationProvider::new()
//!     .with_response(r#"{"title": "..."}"#)
//!     .with_error(ProviderError::transport("connection reset"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{GenerationConfig, GenerationProvider, ProviderError, ProviderInfo};

/// A configured mock response.
#[derive(Debug, Clone)]
enum MockResponse {
    Success(String),
    Error(ProviderError),
}

/// Record of one call made against the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub config: GenerationConfig,
}

/// Mock generation provider.
///
/// Clones share the response queue and call history, so a test can keep a
/// clone for assertions after handing the provider to an orchestrator.
#[derive(Debug, Clone)]
pub struct MockGenerationProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Default for MockGenerationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationProvider {
    /// Creates a new mock provider with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, body: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(body.into()));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: ProviderError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets a simulated latency applied to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the full call history.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns just the prompts sent, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|call| call.prompt.clone())
            .collect()
    }
}

#[async_trait]
impl GenerationProvider for MockGenerationProvider {
    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            config: *config,
        });

        if self.delay > Duration::ZERO {
            sleep(self.delay).await;
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Success(body)) => Ok(body),
            Some(MockResponse::Error(error)) => Err(error),
            // Queue exhausted: behave like a model that went off script.
            None => Ok("Mock response".to_string()),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}
