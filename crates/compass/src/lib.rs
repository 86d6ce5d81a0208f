//! Compass Domain Library
//!
//! Core domain types and interfaces for the Compass productivity backend.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (User, Goal, Task, Journal)
//!   - `value_objects/`: Immutable value types (Priority, statuses, Theme)
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces, all owner-scoped
//!   - `services/`: External service interfaces (completion provider)
//!
//! - **Generation** (`generation/`): The AI generation pipeline - prompt
//!   building, response mapping, fallback policy, orchestration, and deferred
//!   persistence of generation side effects.
//!
//! # Usage
//!
//! ```rust,ignore
//! use compass::domain::{Goal, Journal, Task};
//! use compass::generation::GenerationEngine;
//! use compass::ports::{CompletionProvider, GoalRepository};
//! ```

pub mod domain;
pub mod generation;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DomainError, GenerationError, Goal, GoalPatch, GoalStatus, Journal, JournalPatch, NewGoal,
    NewJournal, NewTask, NewUser, Priority, Task, TaskPatch, TaskStatus, Theme, User, UserPatch,
};
pub use generation::{
    DeferredWriter, GenerationEngine, GenerationResult, JournalSummaryContext,
    JournalSummaryRequest, JournalSummaryResult, MoodAnalysisContext, MoodAnalysisRequest,
    MoodAnalysisResult, Origin, TaskDraft, TaskGenerationContext, TaskGenerationRequest,
    TaskGenerationResult,
};
pub use ports::{
    ChatMessage, Completion, CompletionOptions, CompletionProvider, GoalRepository,
    JournalRepository, MessageRole, TaskRepository, UserRepository,
};
