//! Journal Repository Port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{errors::DomainError, Journal, JournalPatch, NewJournal};

/// Repository interface for Journal entities
#[async_trait]
pub trait JournalRepository: Send + Sync {
    /// Create a journal entry owned by `user_id`
    async fn create(&self, user_id: Uuid, input: NewJournal) -> Result<Journal, DomainError>;

    /// Find a journal entry by ID, scoped to its owner
    async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Journal>, DomainError>;

    /// List journal entries for a user, most recent first
    async fn find_by_owner(
        &self,
        user_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Journal>, DomainError>;

    /// List the most recent entries
    async fn find_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<Journal>, DomainError>;

    /// List entries created within a date range, most recent first
    async fn find_in_range(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Journal>, DomainError>;

    /// Case-insensitive text search over title and content
    async fn search(
        &self,
        user_id: Uuid,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Journal>, DomainError>;

    /// Apply a partial update; returns the updated entry if it exists
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: JournalPatch,
    ) -> Result<Option<Journal>, DomainError>;

    /// Write a generated summary and sentiment onto an entry.
    /// Used by the deferred persistence runner; returns whether a row matched.
    async fn record_analysis(
        &self,
        id: Uuid,
        user_id: Uuid,
        summary: &str,
        sentiment: f32,
    ) -> Result<bool, DomainError>;

    /// Delete a journal entry; returns whether a row was removed
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError>;
}
