//! Auth Routes - development login and session info

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};

use compass::{DomainError, User, UserRepository};

use crate::auth::AuthUser;
use crate::models::{AuthStatusResponse, LoginRequest, LoginResponse, MessageResponse};
use crate::routes::domain_error;
use crate::AppState;

pub fn public_router() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(login))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(current_user))
        .route("/api/auth/status", get(status))
        .route("/api/auth/logout", post(logout))
}

/// Development login: resolves the account by email and checks the
/// configured password.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 503, description = "Login disabled")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, String)> {
    if !state.auth.login_enabled() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "login is not configured".to_string(),
        ));
    }

    if !state.auth.check_password(&payload.password) {
        return Err((
            StatusCode::UNAUTHORIZED,
            "invalid email or password".to_string(),
        ));
    }

    let user = state
        .user_repo
        .find_by_email(&payload.email)
        .await
        .map_err(domain_error)?
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "invalid email or password".to_string(),
        ))?;

    let access_token = state.auth.issue_token(user.id);

    Ok(Json(LoginResponse {
        user_id: user.id,
        email: user.email,
        name: user.name,
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 404, description = "User not found")
    ),
    tag = "Auth"
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

/// Report the credential's validity
#[utoipa::path(
    get,
    path = "/api/auth/status",
    responses(
        (status = 200, description = "Authentication status", body = AuthStatusResponse)
    ),
    tag = "Auth"
)]
pub async fn status(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Json<AuthStatusResponse> {
    Json(AuthStatusResponse {
        authenticated: true,
        user_id,
    })
}

/// Logout; tokens are stateless, so this just acknowledges
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Auth"
)]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "logged out; discard the token client-side".to_string(),
    })
}
