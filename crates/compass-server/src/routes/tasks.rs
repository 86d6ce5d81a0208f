//! Task Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};
use uuid::Uuid;

use compass::{DomainError, NewTask, Task, TaskPatch, TaskRepository, TaskStatus};

use crate::auth::AuthUser;
use crate::models::{TaskListQuery, UpdateStatusRequest};
use crate::routes::domain_error;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/tasks", post(create_task).get(list_tasks))
        .route("/api/tasks/pending", get(pending_tasks))
        .route(
            "/api/tasks/:id",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/:id/complete", patch(complete_task))
        .route("/api/tasks/:id/status", patch(update_status))
}

/// Create a task
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = NewTask,
    responses(
        (status = 200, description = "Task created", body = Task),
        (status = 400, description = "Invalid input")
    ),
    tag = "Tasks"
)]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<NewTask>,
) -> Result<Json<Task>, (StatusCode, String)> {
    payload.validate().map_err(domain_error)?;

    let task = state
        .task_repo
        .create(user_id, payload, false)
        .await
        .map_err(domain_error)?;

    Ok(Json(task))
}

/// List tasks with optional status/goal filters
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(TaskListQuery),
    responses(
        (status = 200, description = "Tasks for the current user", body = Vec<Task>)
    ),
    tag = "Tasks"
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    let tasks = state
        .task_repo
        .find_by_owner(user_id, query.status, query.goal_id, query.skip, query.limit)
        .await
        .map_err(domain_error)?;

    Ok(Json(tasks))
}

/// List pending tasks, highest priority first
#[utoipa::path(
    get,
    path = "/api/tasks/pending",
    responses(
        (status = 200, description = "Pending tasks", body = Vec<Task>)
    ),
    tag = "Tasks"
)]
pub async fn pending_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    let tasks = state
        .task_repo
        .find_pending(user_id, 100)
        .await
        .map_err(domain_error)?;

    Ok(Json(tasks))
}

/// Get one task
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    responses(
        (status = 200, description = "Task", body = Task),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks"
)]
pub async fn get_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, (StatusCode, String)> {
    let task = state
        .task_repo
        .find_by_id(id, user_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Task", id)))?;

    Ok(Json(task))
}

/// Update a task
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    request_body = TaskPatch,
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks"
)]
pub async fn update_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TaskPatch>,
) -> Result<Json<Task>, (StatusCode, String)> {
    payload.validate().map_err(domain_error)?;

    let task = state
        .task_repo
        .update(id, user_id, payload)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Task", id)))?;

    Ok(Json(task))
}

/// Mark a task completed
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/complete",
    responses(
        (status = 200, description = "Completed task", body = Task),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks"
)]
pub async fn complete_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, (StatusCode, String)> {
    let task = state
        .task_repo
        .set_status(id, user_id, TaskStatus::Completed)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Task", id)))?;

    Ok(Json(task))
}

/// Transition a task's status
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/status",
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated task", body = Task),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Task>, (StatusCode, String)> {
    let task = state
        .task_repo
        .set_status(id, user_id, payload.status)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Task", id)))?;

    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found")
    ),
    tag = "Tasks"
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = state
        .task_repo
        .delete(id, user_id)
        .await
        .map_err(domain_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(domain_error(DomainError::not_found("Task", id)))
    }
}
