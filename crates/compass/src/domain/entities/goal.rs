//! Goal - A long-running objective the user works toward
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{MAX_CATEGORY_LEN, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{GoalStatus, Priority};

/// Goal - a user objective with progress tracking
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Goal {
    pub id: Uuid,
    /// Owning user account
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub target_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub status: GoalStatus,
    /// Completion percentage (0.0 - 100.0)
    pub progress: f32,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal with generated ID and timestamps
    pub fn new(user_id: Uuid, input: NewGoal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            description: input.description,
            category: input.category,
            target_date: input.target_date,
            priority: input.priority,
            status: GoalStatus::Active,
            progress: 0.0,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a goal
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub target_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewGoal {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title)?;
        validate_description(self.description.as_deref())?;
        validate_category(self.category.as_deref())?;
        Ok(())
    }
}

/// Partial update for a goal; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub target_date: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub status: Option<GoalStatus>,
    pub tags: Option<Vec<String>>,
}

impl GoalPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        validate_description(self.description.as_deref())?;
        validate_category(self.category.as_deref())?;
        Ok(())
    }
}

pub(crate) fn validate_title(title: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("title must not be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(DomainError::validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

pub(crate) fn validate_description(description: Option<&str>) -> Result<(), DomainError> {
    if let Some(desc) = description {
        if desc.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(DomainError::validation(format!(
                "description must be at most {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
    }
    Ok(())
}

fn validate_category(category: Option<&str>) -> Result<(), DomainError> {
    if let Some(cat) = category {
        if cat.chars().count() > MAX_CATEGORY_LEN {
            return Err(DomainError::validation(format!(
                "category must be at most {} characters",
                MAX_CATEGORY_LEN
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_goal(title: &str) -> NewGoal {
        NewGoal {
            title: title.to_string(),
            description: None,
            category: None,
            target_date: None,
            priority: Priority::default(),
            tags: vec![],
        }
    }

    #[test]
    fn test_new_goal_starts_active_with_zero_progress() {
        let goal = Goal::new(Uuid::new_v4(), new_goal("Learn piano"));
        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(goal.progress, 0.0);
        assert_eq!(goal.priority, Priority::Medium);
    }

    #[test]
    fn test_empty_title_rejected() {
        assert!(new_goal("   ").validate().is_err());
    }

    #[test]
    fn test_overlong_title_rejected() {
        assert!(new_goal(&"x".repeat(201)).validate().is_err());
        assert!(new_goal(&"x".repeat(200)).validate().is_ok());
    }
}
