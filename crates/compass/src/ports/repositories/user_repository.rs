//! User Repository Port

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, NewUser, User, UserPatch};

/// Repository interface for User accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user; fails with `Conflict` when the email is taken
    async fn create(&self, input: NewUser) -> Result<User, DomainError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Apply a partial update; returns the updated user if it exists
    async fn update(&self, id: Uuid, patch: UserPatch) -> Result<Option<User>, DomainError>;

    /// Delete a user; returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Check whether an account exists for an email
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError>;
}
