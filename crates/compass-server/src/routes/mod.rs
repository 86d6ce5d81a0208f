//! Compass API Routes
//!
//! - /api/auth - development login and session info
//! - /api/users - account management
//! - /api/goals - goal CRUD and progress
//! - /api/tasks - task CRUD and status transitions
//! - /api/journals - journal CRUD, search, date ranges
//! - /api/ai - generation endpoints and recommendations

pub mod ai;
pub mod auth;
pub mod goals;
pub mod journals;
pub mod swagger;
pub mod tasks;
pub mod users;

use axum::http::StatusCode;
use compass::DomainError;

/// Map a domain error to an HTTP response
pub(crate) fn domain_error(e: DomainError) -> (StatusCode, String) {
    let status = match &e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Repository(_) | DomainError::ExternalService(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, e.to_string())
}
