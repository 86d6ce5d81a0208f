//! PostgreSQL repository implementations

mod goal_repository;
mod journal_repository;
mod task_repository;
mod user_repository;

pub use goal_repository::PgGoalRepository;
pub use journal_repository::PgJournalRepository;
pub use task_repository::PgTaskRepository;
pub use user_repository::PgUserRepository;

use compass::DomainError;

pub(crate) fn db_err(e: sqlx::Error) -> DomainError {
    DomainError::Repository(e.to_string())
}
