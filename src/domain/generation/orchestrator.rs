//! Retry orchestration for the generation pipeline.
//!
//! One orchestration run makes at most `RETRY_BUDGET` provider calls. Every
//! failure between the provider call and schema validation is retryable;
//! only a missing provider configuration aborts the run immediately. The
//! prompt is built once per run and reused verbatim across attempts.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;
use uuid::Uuid;

use super::errors::{FailureKind, GenerationError};
use super::extractor::extract;
use super::prompt::build_prompt;
use super::validator::validate_recipe;
use crate::domain::constraints::ConstraintSet;
use crate::domain::recipe::Recipe;
use crate::ports::{GenerationConfig, GenerationProvider};

/// Maximum provider invocations per orchestration run.
pub const RETRY_BUDGET: u32 = 2;

/// Fixed pause between consecutive attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// How a single attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Attempt created but not yet resolved.
    Pending,
    /// Attempt produced a schema-valid recipe.
    Success,
    /// Attempt failed; the run may try again within budget.
    RetryableFailure,
    /// Attempt failed in a way that aborts the run.
    FatalFailure,
}

/// Record of one provider attempt within a run.
#[derive(Debug, Clone)]
pub struct GenerationAttempt {
    /// 1-based position of this attempt within the run.
    pub index: u32,
    /// Raw provider text, if the call returned one.
    pub raw_response: Option<String>,
    /// Parsed candidate, if extraction succeeded.
    pub candidate: Option<Value>,
    pub outcome: AttemptOutcome,
    pub failure_reason: Option<String>,
}

impl GenerationAttempt {
    fn new(index: u32) -> Self {
        Self {
            index,
            raw_response: None,
            candidate: None,
            outcome: AttemptOutcome::Pending,
            failure_reason: None,
        }
    }

    fn fail(&mut self, outcome: AttemptOutcome, reason: impl Into<String>) {
        self.outcome = outcome;
        self.failure_reason = Some(reason.into());
    }
}

/// Internal run state machine. Terminal states map one-to-one onto the
/// orchestrator's result.
enum RunState {
    Attempting,
    Retrying {
        failure: FailureKind,
        detail: String,
    },
    Succeeded(Recipe),
    Fatal(String),
    Exhausted {
        last_failure: Option<FailureKind>,
        detail: String,
    },
}

/// Drives constraint sets through prompt construction, provider calls,
/// extraction, and validation until a valid recipe emerges or the retry
/// budget runs out.
pub struct GenerationOrchestrator {
    provider: Arc<dyn GenerationProvider>,
    config: GenerationConfig,
}

impl GenerationOrchestrator {
    pub fn new(provider: Arc<dyn GenerationProvider>, config: GenerationConfig) -> Self {
        Self { provider, config }
    }

    /// Runs one full generation cycle for the given constraints.
    pub async fn orchestrate(
        &self,
        constraints: &ConstraintSet,
    ) -> Result<Recipe, GenerationError> {
        let run_id = Uuid::new_v4();
        let prompt = build_prompt(constraints);
        let mut attempts_made: u32 = 0;
        let mut state = RunState::Attempting;

        loop {
            match state {
                RunState::Attempting => {
                    attempts_made += 1;
                    state = self.attempt(run_id, &prompt, attempts_made).await;
                }
                RunState::Retrying { failure, detail } => {
                    if attempts_made >= RETRY_BUDGET {
                        state = RunState::Exhausted {
                            last_failure: Some(failure),
                            detail,
                        };
                    } else {
                        tracing::warn!(
                            %run_id,
                            attempt = attempts_made,
                            failure = ?failure,
                            detail = %detail,
                            "generation attempt failed, retrying"
                        );
                        sleep(RETRY_DELAY).await;
                        state = RunState::Attempting;
                    }
                }
                RunState::Succeeded(recipe) => {
                    tracing::debug!(%run_id, attempts = attempts_made, "generation succeeded");
                    return Ok(recipe);
                }
                RunState::Fatal(message) => {
                    tracing::warn!(%run_id, detail = %message, "generation aborted");
                    return Err(GenerationError::Configuration(message));
                }
                RunState::Exhausted {
                    last_failure,
                    detail,
                } => {
                    tracing::warn!(
                        %run_id,
                        attempts = attempts_made,
                        detail = %detail,
                        "generation retry budget exhausted"
                    );
                    return Err(GenerationError::RetriesExhausted {
                        attempts: attempts_made,
                        last_failure,
                        detail,
                    });
                }
            }
        }
    }

    async fn attempt(&self, run_id: Uuid, prompt: &str, index: u32) -> RunState {
        let mut attempt = GenerationAttempt::new(index);
        tracing::debug!(%run_id, attempt = index, "invoking generation provider");

        let state = self.resolve_attempt(&mut attempt, prompt).await;
        tracing::debug!(
            %run_id,
            attempt = attempt.index,
            outcome = ?attempt.outcome,
            response_bytes = attempt.raw_response.as_ref().map_or(0, String::len),
            extracted = attempt.candidate.is_some(),
            failure = attempt.failure_reason.as_deref().unwrap_or(""),
            "generation attempt resolved"
        );
        state
    }

    async fn resolve_attempt(
        &self,
        attempt: &mut GenerationAttempt,
        prompt: &str,
    ) -> RunState {
        let raw = match self.provider.generate(prompt, &self.config).await {
            Ok(raw) => raw,
            Err(err) if !err.is_retryable() => {
                let detail = err.to_string();
                attempt.fail(AttemptOutcome::FatalFailure, &detail);
                return RunState::Fatal(detail);
            }
            Err(err) => {
                let detail = err.to_string();
                attempt.fail(AttemptOutcome::RetryableFailure, &detail);
                return RunState::Retrying {
                    failure: FailureKind::Provider,
                    detail,
                };
            }
        };
        attempt.raw_response = Some(raw.clone());

        let candidate = match extract(&raw) {
            Ok(candidate) => candidate,
            Err(err) => {
                let detail = err.to_string();
                attempt.fail(AttemptOutcome::RetryableFailure, &detail);
                return RunState::Retrying {
                    failure: FailureKind::InvalidFormat,
                    detail,
                };
            }
        };
        attempt.candidate = Some(candidate.clone());

        match validate_recipe(&candidate) {
            Ok(recipe) => {
                attempt.outcome = AttemptOutcome::Success;
                RunState::Succeeded(recipe)
            }
            Err(err) => {
                let detail = err.to_string();
                attempt.fail(AttemptOutcome::RetryableFailure, &detail);
                RunState::Retrying {
                    failure: FailureKind::SchemaViolation,
                    detail,
                }
            }
        }
    }
}
