//! Error taxonomy for the generation pipeline.
//!
//! Retryable failures (`InvalidResponseFormat`, `SchemaValidation`,
//! `Provider`) are absorbed by the orchestrator and never cross the boundary
//! individually; callers only ever see `Configuration`, `RetriesExhausted`,
//! or success.

use super::validator::SchemaValidationError;
use crate::ports::ProviderError;

/// Classification of the failure that ended an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Provider text could not be parsed as structured data.
    InvalidFormat,
    /// Parsed candidate failed artifact schema validation.
    SchemaViolation,
    /// Transport/quota/timeout failure from the provider.
    Provider,
}

/// Terminal errors returned by one orchestration run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// Provider credential or setup missing. Fatal, never retried.
    #[error("generation provider not configured: {0}")]
    Configuration(String),

    /// Extraction could not parse the provider text.
    #[error("invalid response format: {0}")]
    InvalidResponseFormat(String),

    /// Parsed candidate failed artifact schema validation.
    #[error(transparent)]
    SchemaValidation(#[from] SchemaValidationError),

    /// Transport/quota/timeout failure from the provider.
    #[error("provider error: {0}")]
    Provider(String),

    /// Retry budget consumed with no schema-valid artifact.
    #[error("retries exhausted after {attempts} attempts: {detail}")]
    RetriesExhausted {
        /// Provider invocations made before giving up.
        attempts: u32,
        /// Classification of the last attempt's failure.
        last_failure: Option<FailureKind>,
        /// Human-readable description of the last failure.
        detail: String,
    },
}

impl GenerationError {
    /// Stable error code for the calling layer to map onto transport status.
    pub fn error_code(&self) -> &'static str {
        match self {
            GenerationError::Configuration(_) => "configuration-missing",
            GenerationError::InvalidResponseFormat(_) => "invalid-response-format",
            GenerationError::SchemaValidation(_) => "schema-validation-exhausted",
            GenerationError::Provider(_) => "provider-error",
            GenerationError::RetriesExhausted { last_failure, .. } => match last_failure {
                Some(FailureKind::InvalidFormat) => "invalid-response-format",
                Some(FailureKind::SchemaViolation) => "schema-validation-exhausted",
                Some(FailureKind::Provider) => "provider-error",
                None => "generic-generation-failure",
            },
        }
    }
}

impl From<ProviderError> for GenerationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unconfigured(message) => GenerationError::Configuration(message),
            other => GenerationError::Provider(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::validator::FieldViolation;

    #[test]
    fn configuration_maps_to_configuration_missing() {
        let err = GenerationError::Configuration("no API key".to_string());
        assert_eq!(err.error_code(), "configuration-missing");
    }

    #[test]
    fn exhausted_code_reflects_last_failure_kind() {
        let err = GenerationError::RetriesExhausted {
            attempts: 2,
            last_failure: Some(FailureKind::SchemaViolation),
            detail: "title: too short".to_string(),
        };
        assert_eq!(err.error_code(), "schema-validation-exhausted");

        let err = GenerationError::RetriesExhausted {
            attempts: 2,
            last_failure: Some(FailureKind::InvalidFormat),
            detail: "expected value at line 1".to_string(),
        };
        assert_eq!(err.error_code(), "invalid-response-format");

        let err = GenerationError::RetriesExhausted {
            attempts: 2,
            last_failure: None,
            detail: "no attempts recorded".to_string(),
        };
        assert_eq!(err.error_code(), "generic-generation-failure");
    }

    #[test]
    fn unconfigured_provider_error_becomes_configuration() {
        let err: GenerationError = ProviderError::unconfigured("missing key").into();
        assert!(matches!(err, GenerationError::Configuration(_)));
    }

    #[test]
    fn transient_provider_error_becomes_provider() {
        let err: GenerationError = ProviderError::transport("reset").into();
        assert!(matches!(err, GenerationError::Provider(_)));
        assert_eq!(err.error_code(), "provider-error");
    }

    #[test]
    fn exhausted_displays_attempt_count() {
        let err = GenerationError::RetriesExhausted {
            attempts: 2,
            last_failure: Some(FailureKind::Provider),
            detail: "quota exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "retries exhausted after 2 attempts: quota exceeded"
        );
    }

    #[test]
    fn schema_validation_is_transparent() {
        let inner = SchemaValidationError::new(vec![FieldViolation::new(
            "title",
            "must be at least 3 characters",
        )]);
        let err = GenerationError::SchemaValidation(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
    }
}
