//! Task - An actionable step, optionally attached to a goal

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::goal::{validate_description, validate_title};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Priority, TaskStatus};

/// Task - a unit of work
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Task {
    pub id: Uuid,
    /// Owning user account
    pub user_id: Uuid,
    /// Goal this task contributes to, if any
    pub goal_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    /// Whether this task was produced by the generation pipeline
    pub ai_generated: bool,
    /// Estimated effort in minutes
    pub estimated_minutes: Option<i32>,
    /// Actual time spent in minutes
    pub actual_minutes: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task with generated ID and timestamps
    pub fn new(user_id: Uuid, input: NewTask, ai_generated: bool) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            goal_id: input.goal_id,
            title: input.title,
            description: input.description,
            priority: input.priority,
            status: TaskStatus::Pending,
            ai_generated,
            estimated_minutes: input.estimated_minutes,
            actual_minutes: None,
            due_date: input.due_date,
            tags: input.tags,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    pub estimated_minutes: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub goal_id: Option<Uuid>,
}

impl NewTask {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title)?;
        validate_description(self.description.as_deref())?;
        validate_minutes(self.estimated_minutes)?;
        Ok(())
    }
}

/// Partial update for a task; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub estimated_minutes: Option<i32>,
    pub actual_minutes: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub goal_id: Option<Uuid>,
}

impl TaskPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_description(self.description.as_deref())?;
        validate_minutes(self.estimated_minutes)?;
        validate_minutes(self.actual_minutes)?;
        Ok(())
    }
}

fn validate_minutes(minutes: Option<i32>) -> Result<(), DomainError> {
    if let Some(m) = minutes {
        if m < 1 {
            return Err(DomainError::validation("duration must be at least 1 minute"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_defaults() {
        let input = NewTask {
            title: "Practice scales".to_string(),
            description: None,
            priority: Priority::High,
            estimated_minutes: Some(30),
            due_date: None,
            tags: vec!["music".to_string()],
            goal_id: None,
        };
        let task = Task::new(Uuid::new_v4(), input, false);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(!task.ai_generated);
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let input = NewTask {
            title: "t".to_string(),
            description: None,
            priority: Priority::default(),
            estimated_minutes: Some(0),
            due_date: None,
            tags: vec![],
            goal_id: None,
        };
        assert!(input.validate().is_err());
    }
}
