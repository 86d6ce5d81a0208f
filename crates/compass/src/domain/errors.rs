//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

impl DomainError {
    pub fn not_found<T: AsRef<str>>(entity_type: T, id: Uuid) -> Self {
        Self::NotFound {
            entity_type: entity_type.as_ref().to_string(),
            id: id.to_string(),
        }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }
}

/// Failures on the completion-provider path.
///
/// Both variants are recovered inside the generation engine via the fallback
/// policy; neither ever reaches an API caller as an error.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Transport, auth or rate-limit failure reaching the completion service.
    #[error("Completion service error: {0}")]
    Service(String),

    /// The completion text was structurally or semantically invalid.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}
