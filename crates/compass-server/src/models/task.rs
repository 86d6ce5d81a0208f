//! Task DTOs

use compass::TaskStatus;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::goal::default_limit;

/// Status transition request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: TaskStatus,
}

/// Query parameters for listing tasks
#[derive(Debug, Deserialize, IntoParams)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub goal_id: Option<Uuid>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
