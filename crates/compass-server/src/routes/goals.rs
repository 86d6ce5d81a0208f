//! Goal Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use compass::{DomainError, Goal, GoalPatch, GoalRepository, NewGoal, Task, TaskRepository};

use crate::auth::AuthUser;
use crate::models::{GoalListQuery, UpdateProgressRequest};
use crate::routes::domain_error;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/goals", post(create_goal).get(list_goals))
        .route(
            "/api/goals/:id",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/api/goals/:id/progress", patch(update_progress))
        .route("/api/goals/:id/tasks", get(goal_tasks))
}

/// Create a goal
#[utoipa::path(
    post,
    path = "/api/goals",
    request_body = NewGoal,
    responses(
        (status = 200, description = "Goal created", body = Goal),
        (status = 400, description = "Invalid input")
    ),
    tag = "Goals"
)]
pub async fn create_goal(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<NewGoal>,
) -> Result<Json<Goal>, (StatusCode, String)> {
    payload.validate().map_err(domain_error)?;

    let goal = state
        .goal_repo
        .create(user_id, payload)
        .await
        .map_err(domain_error)?;

    Ok(Json(goal))
}

/// List goals with optional status/category filters
#[utoipa::path(
    get,
    path = "/api/goals",
    params(GoalListQuery),
    responses(
        (status = 200, description = "Goals for the current user", body = Vec<Goal>)
    ),
    tag = "Goals"
)]
pub async fn list_goals(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<GoalListQuery>,
) -> Result<Json<Vec<Goal>>, (StatusCode, String)> {
    let goals = state
        .goal_repo
        .find_by_owner(
            user_id,
            query.status,
            query.category.as_deref(),
            query.skip,
            query.limit,
        )
        .await
        .map_err(domain_error)?;

    Ok(Json(goals))
}

/// Get one goal
#[utoipa::path(
    get,
    path = "/api/goals/{id}",
    responses(
        (status = 200, description = "Goal", body = Goal),
        (status = 404, description = "Goal not found")
    ),
    tag = "Goals"
)]
pub async fn get_goal(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Goal>, (StatusCode, String)> {
    let goal = state
        .goal_repo
        .find_by_id(id, user_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Goal", id)))?;

    Ok(Json(goal))
}

/// Update a goal
#[utoipa::path(
    put,
    path = "/api/goals/{id}",
    request_body = GoalPatch,
    responses(
        (status = 200, description = "Updated goal", body = Goal),
        (status = 404, description = "Goal not found")
    ),
    tag = "Goals"
)]
pub async fn update_goal(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GoalPatch>,
) -> Result<Json<Goal>, (StatusCode, String)> {
    payload.validate().map_err(domain_error)?;

    let goal = state
        .goal_repo
        .update(id, user_id, payload)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Goal", id)))?;

    Ok(Json(goal))
}

/// Set goal progress
#[utoipa::path(
    patch,
    path = "/api/goals/{id}/progress",
    request_body = UpdateProgressRequest,
    responses(
        (status = 200, description = "Updated goal", body = Goal),
        (status = 400, description = "Progress out of range"),
        (status = 404, description = "Goal not found")
    ),
    tag = "Goals"
)]
pub async fn update_progress(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProgressRequest>,
) -> Result<Json<Goal>, (StatusCode, String)> {
    if !(0.0..=100.0).contains(&payload.progress) {
        return Err(domain_error(DomainError::validation(
            "progress must be between 0 and 100",
        )));
    }

    let goal = state
        .goal_repo
        .set_progress(id, user_id, payload.progress)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Goal", id)))?;

    Ok(Json(goal))
}

/// Delete a goal
#[utoipa::path(
    delete,
    path = "/api/goals/{id}",
    responses(
        (status = 204, description = "Goal deleted"),
        (status = 404, description = "Goal not found")
    ),
    tag = "Goals"
)]
pub async fn delete_goal(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = state
        .goal_repo
        .delete(id, user_id)
        .await
        .map_err(domain_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(domain_error(DomainError::not_found("Goal", id)))
    }
}

/// List tasks attached to a goal
#[utoipa::path(
    get,
    path = "/api/goals/{id}/tasks",
    responses(
        (status = 200, description = "Tasks for the goal", body = Vec<Task>),
        (status = 404, description = "Goal not found")
    ),
    tag = "Goals"
)]
pub async fn goal_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    state
        .goal_repo
        .find_by_id(id, user_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Goal", id)))?;

    let tasks = state
        .task_repo
        .find_by_goal(id, user_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(tasks))
}
