//! User Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use compass::{DomainError, NewUser, User, UserPatch, UserRepository};

use crate::auth::AuthUser;
use crate::routes::domain_error;
use crate::AppState;

/// Routes reachable without a credential (account signup and lookup used by
/// the login flow).
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/email/:email/exists", get(email_exists))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users/me", get(current_user))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Whether an account exists for an email
#[derive(Debug, Serialize, ToSchema)]
pub struct EmailExistsResponse {
    pub exists: bool,
}

/// Create a user account
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = NewUser,
    responses(
        (status = 200, description = "User created", body = User),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<Json<User>, (StatusCode, String)> {
    payload.validate().map_err(domain_error)?;

    let user = state.user_repo.create(payload).await.map_err(domain_error)?;

    Ok(Json(user))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn current_user(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<User>, (StatusCode, String)> {
    let user = state
        .user_repo
        .find_by_id(user_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("User", user_id)))?;

    Ok(Json(user))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, (StatusCode, String)> {
    let user = state
        .user_repo
        .find_by_id(id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("User", id)))?;

    Ok(Json(user))
}

/// Update a user's profile
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    request_body = UserPatch,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 403, description = "Not the authenticated user"),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserPatch>,
) -> Result<Json<User>, (StatusCode, String)> {
    if id != user_id {
        return Err((
            StatusCode::FORBIDDEN,
            "cannot modify another user".to_string(),
        ));
    }
    payload.validate().map_err(domain_error)?;

    let user = state
        .user_repo
        .update(id, payload)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("User", id)))?;

    Ok(Json(user))
}

/// Delete a user account and all owned data
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Not the authenticated user"),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if id != user_id {
        return Err((
            StatusCode::FORBIDDEN,
            "cannot delete another user".to_string(),
        ));
    }

    let deleted = state.user_repo.delete(id).await.map_err(domain_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(domain_error(DomainError::not_found("User", id)))
    }
}

/// Check whether an email is registered
#[utoipa::path(
    get,
    path = "/api/users/email/{email}/exists",
    responses(
        (status = 200, description = "Existence flag", body = EmailExistsResponse)
    ),
    tag = "Users"
)]
pub async fn email_exists(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<EmailExistsResponse>, (StatusCode, String)> {
    let exists = state
        .user_repo
        .email_exists(&email)
        .await
        .map_err(domain_error)?;

    Ok(Json(EmailExistsResponse { exists }))
}
