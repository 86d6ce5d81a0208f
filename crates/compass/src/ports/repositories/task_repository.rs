//! Task Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, NewTask, Task, TaskPatch, TaskStatus};

/// Repository interface for Task entities
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a task owned by `user_id`; `ai_generated` flags pipeline output
    async fn create(
        &self,
        user_id: Uuid,
        input: NewTask,
        ai_generated: bool,
    ) -> Result<Task, DomainError>;

    /// Find a task by ID, scoped to its owner
    async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, DomainError>;

    /// List tasks for a user with optional filtering
    async fn find_by_owner(
        &self,
        user_id: Uuid,
        status: Option<TaskStatus>,
        goal_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Task>, DomainError>;

    /// List tasks attached to a goal, most recent first
    async fn find_by_goal(&self, goal_id: Uuid, user_id: Uuid) -> Result<Vec<Task>, DomainError>;

    /// List pending tasks, highest priority first
    async fn find_pending(&self, user_id: Uuid, limit: i64) -> Result<Vec<Task>, DomainError>;

    /// Apply a partial update; returns the updated task if it exists
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: TaskPatch,
    ) -> Result<Option<Task>, DomainError>;

    /// Transition the task status; completion stamps `completed_at`
    async fn set_status(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, DomainError>;

    /// Delete a task; returns whether a row was removed
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError>;
}
