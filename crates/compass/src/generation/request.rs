//! Generation Requests
//!
//! Validated, immutable inputs for the three generation operations.

use serde_json::Value;
use uuid::Uuid;

use crate::domain::errors::DomainError;

/// Smallest number of tasks a single request may ask for
pub const MIN_TASK_COUNT: u8 = 1;
/// Largest number of tasks a single request may ask for
pub const MAX_TASK_COUNT: u8 = 20;
/// Longest mood-analysis window in days
pub const MAX_DATE_RANGE_DAYS: u16 = 90;

/// Request to generate tasks for a goal
#[derive(Debug, Clone)]
pub struct TaskGenerationRequest {
    pub goal_id: Uuid,
    /// Free-form caller preferences rendered into the prompt
    pub preferences: Option<Value>,
    pub count: u8,
}

impl TaskGenerationRequest {
    pub fn new(goal_id: Uuid, preferences: Option<Value>, count: u8) -> Result<Self, DomainError> {
        if !(MIN_TASK_COUNT..=MAX_TASK_COUNT).contains(&count) {
            return Err(DomainError::validation(format!(
                "task count must be between {} and {}",
                MIN_TASK_COUNT, MAX_TASK_COUNT
            )));
        }
        Ok(Self {
            goal_id,
            preferences,
            count,
        })
    }
}

/// Request to summarize one journal entry
#[derive(Debug, Clone)]
pub struct JournalSummaryRequest {
    pub journal_id: Uuid,
}

impl JournalSummaryRequest {
    pub fn new(journal_id: Uuid) -> Self {
        Self { journal_id }
    }
}

/// Request to analyze mood patterns across journal entries
#[derive(Debug, Clone)]
pub struct MoodAnalysisRequest {
    pub journal_ids: Vec<Uuid>,
    pub date_range_days: u16,
}

impl MoodAnalysisRequest {
    pub fn new(journal_ids: Vec<Uuid>, date_range_days: u16) -> Result<Self, DomainError> {
        if !(1..=MAX_DATE_RANGE_DAYS).contains(&date_range_days) {
            return Err(DomainError::validation(format!(
                "date range must be between 1 and {} days",
                MAX_DATE_RANGE_DAYS
            )));
        }
        Ok(Self {
            journal_ids,
            date_range_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_count_bounds() {
        let goal_id = Uuid::new_v4();
        assert!(TaskGenerationRequest::new(goal_id, None, 0).is_err());
        assert!(TaskGenerationRequest::new(goal_id, None, 21).is_err());
        assert!(TaskGenerationRequest::new(goal_id, None, 1).is_ok());
        assert!(TaskGenerationRequest::new(goal_id, None, 20).is_ok());
    }

    #[test]
    fn test_date_range_bounds() {
        assert!(MoodAnalysisRequest::new(vec![], 0).is_err());
        assert!(MoodAnalysisRequest::new(vec![], 91).is_err());
        assert!(MoodAnalysisRequest::new(vec![], 7).is_ok());
    }
}
