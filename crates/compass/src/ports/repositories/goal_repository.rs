//! Goal Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Goal, GoalPatch, GoalStatus, NewGoal};

/// Repository interface for Goal entities
#[async_trait]
pub trait GoalRepository: Send + Sync {
    /// Create a goal owned by `user_id`
    async fn create(&self, user_id: Uuid, input: NewGoal) -> Result<Goal, DomainError>;

    /// Find a goal by ID, scoped to its owner
    async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Goal>, DomainError>;

    /// List goals for a user with optional filtering
    async fn find_by_owner(
        &self,
        user_id: Uuid,
        status: Option<GoalStatus>,
        category: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Goal>, DomainError>;

    /// Apply a partial update; returns the updated goal if it exists
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: GoalPatch,
    ) -> Result<Option<Goal>, DomainError>;

    /// Set the progress percentage (0.0 - 100.0)
    async fn set_progress(
        &self,
        id: Uuid,
        user_id: Uuid,
        progress: f32,
    ) -> Result<Option<Goal>, DomainError>;

    /// Delete a goal; returns whether a row was removed
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError>;
}
