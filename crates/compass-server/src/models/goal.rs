//! Goal DTOs

use compass::GoalStatus;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Progress update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProgressRequest {
    /// Completion percentage (0.0 - 100.0)
    pub progress: f32,
}

/// Query parameters for listing goals
#[derive(Debug, Deserialize, IntoParams)]
pub struct GoalListQuery {
    pub status: Option<GoalStatus>,
    pub category: Option<String>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub(crate) fn default_limit() -> i64 {
    100
}
