//! Infrastructure Adapters
//!
//! Concrete implementations of the domain ports: PostgreSQL repositories and
//! the OpenAI completion provider.

pub mod openai;
pub mod postgres;

pub use openai::OpenAiProvider;
pub use postgres::{PgGoalRepository, PgJournalRepository, PgTaskRepository, PgUserRepository};
