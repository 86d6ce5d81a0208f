//! Journal - A dated reflection entry with optional mood score
//!
//! The `summary` and `sentiment` fields are written back by the deferred
//! persistence runner after a summary generation; they are never set on create.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{MAX_CONTENT_LEN, MAX_TITLE_LEN};
use crate::domain::errors::DomainError;

/// Lowest allowed mood score (very sad)
pub const MIN_MOOD_SCORE: i32 = 1;
/// Highest allowed mood score (very happy)
pub const MAX_MOOD_SCORE: i32 = 5;

/// Journal - one reflection entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Journal {
    pub id: Uuid,
    /// Owning user account
    pub user_id: Uuid,
    pub title: Option<String>,
    pub content: String,
    /// Self-reported mood (1 = very sad, 5 = very happy)
    pub mood_score: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Generated summary, written by the deferred persistence runner
    pub summary: Option<String>,
    /// Generated sentiment (-1.0 - 1.0), written alongside the summary
    pub sentiment: Option<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Journal {
    /// Create a new journal entry with generated ID and timestamps
    pub fn new(user_id: Uuid, input: NewJournal) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            content: input.content,
            mood_score: input.mood_score,
            tags: input.tags,
            summary: None,
            sentiment: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input for creating a journal entry
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewJournal {
    pub title: Option<String>,
    pub content: String,
    pub mood_score: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewJournal {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_journal_title(self.title.as_deref())?;
        validate_content(&self.content)?;
        validate_mood_score(self.mood_score)?;
        Ok(())
    }
}

/// Partial update for a journal entry; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct JournalPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood_score: Option<i32>,
    pub tags: Option<Vec<String>>,
}

impl JournalPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_journal_title(self.title.as_deref())?;
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        validate_mood_score(self.mood_score)?;
        Ok(())
    }
}

fn validate_journal_title(title: Option<&str>) -> Result<(), DomainError> {
    if let Some(t) = title {
        if t.chars().count() > MAX_TITLE_LEN {
            return Err(DomainError::validation(format!(
                "title must be at most {} characters",
                MAX_TITLE_LEN
            )));
        }
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::validation("content must not be empty"));
    }
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(DomainError::validation(format!(
            "content must be at most {} characters",
            MAX_CONTENT_LEN
        )));
    }
    Ok(())
}

fn validate_mood_score(score: Option<i32>) -> Result<(), DomainError> {
    if let Some(s) = score {
        if !(MIN_MOOD_SCORE..=MAX_MOOD_SCORE).contains(&s) {
            return Err(DomainError::validation(format!(
                "mood score must be between {} and {}",
                MIN_MOOD_SCORE, MAX_MOOD_SCORE
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_journal(content: &str, mood: Option<i32>) -> NewJournal {
        NewJournal {
            title: None,
            content: content.to_string(),
            mood_score: mood,
            tags: vec![],
        }
    }

    #[test]
    fn test_new_journal_has_no_analysis() {
        let journal = Journal::new(Uuid::new_v4(), new_journal("A good day.", Some(4)));
        assert!(journal.summary.is_none());
        assert!(journal.sentiment.is_none());
    }

    #[test]
    fn test_mood_score_range() {
        assert!(new_journal("ok", Some(0)).validate().is_err());
        assert!(new_journal("ok", Some(6)).validate().is_err());
        assert!(new_journal("ok", Some(3)).validate().is_ok());
        assert!(new_journal("ok", None).validate().is_ok());
    }

    #[test]
    fn test_empty_content_rejected() {
        assert!(new_journal("", None).validate().is_err());
    }
}
