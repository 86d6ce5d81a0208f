//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use compass::{
    Goal, GoalPatch, GoalStatus, Journal, JournalPatch, JournalSummaryResult, MoodAnalysisResult,
    NewGoal, NewJournal, NewTask, NewUser, Origin, Priority, Task, TaskDraft,
    TaskGenerationResult, TaskPatch, TaskStatus, Theme, User, UserPatch,
};

use crate::models::{
    AnalyzeMoodRequest, AuthStatusResponse, DateRange, GenerateTasksRequest, LoginRequest,
    LoginResponse, MessageResponse, RecentMoodResponse, SummarizeJournalRequest,
    UpdateProgressRequest, UpdateStatusRequest,
};
use crate::services::recommend::{
    ActivityStats, Recommendation, RecommendationKind, RecommendationsResponse,
};

use super::users::EmailExistsResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth endpoints
        super::auth::login,
        super::auth::current_user,
        super::auth::status,
        super::auth::logout,
        // User endpoints
        super::users::create_user,
        super::users::current_user,
        super::users::get_user,
        super::users::update_user,
        super::users::delete_user,
        super::users::email_exists,
        // Goal endpoints
        super::goals::create_goal,
        super::goals::list_goals,
        super::goals::get_goal,
        super::goals::update_goal,
        super::goals::update_progress,
        super::goals::delete_goal,
        super::goals::goal_tasks,
        // Task endpoints
        super::tasks::create_task,
        super::tasks::list_tasks,
        super::tasks::pending_tasks,
        super::tasks::get_task,
        super::tasks::update_task,
        super::tasks::complete_task,
        super::tasks::update_status,
        super::tasks::delete_task,
        // Journal endpoints
        super::journals::create_journal,
        super::journals::list_journals,
        super::journals::recent_journals,
        super::journals::search_journals,
        super::journals::journals_in_range,
        super::journals::get_journal,
        super::journals::update_journal,
        super::journals::delete_journal,
        // AI endpoints
        super::ai::generate_tasks,
        super::ai::summarize_journal,
        super::ai::analyze_mood,
        super::ai::recent_mood,
        super::ai::recommendations,
    ),
    components(schemas(
        // Domain
        User,
        NewUser,
        UserPatch,
        Theme,
        Goal,
        NewGoal,
        GoalPatch,
        GoalStatus,
        Task,
        NewTask,
        TaskPatch,
        TaskStatus,
        Priority,
        Journal,
        NewJournal,
        JournalPatch,
        // Generation
        Origin,
        TaskDraft,
        TaskGenerationResult,
        JournalSummaryResult,
        MoodAnalysisResult,
        // DTOs
        LoginRequest,
        LoginResponse,
        AuthStatusResponse,
        MessageResponse,
        EmailExistsResponse,
        UpdateProgressRequest,
        UpdateStatusRequest,
        GenerateTasksRequest,
        SummarizeJournalRequest,
        AnalyzeMoodRequest,
        RecentMoodResponse,
        DateRange,
        Recommendation,
        RecommendationKind,
        ActivityStats,
        RecommendationsResponse,
    )),
    tags(
        (name = "Auth", description = "Development login and session info"),
        (name = "Users", description = "Account management"),
        (name = "Goals", description = "Goal CRUD and progress tracking"),
        (name = "Tasks", description = "Task CRUD and status transitions"),
        (name = "Journals", description = "Journal CRUD, search and ranges"),
        (name = "AI", description = "Generation endpoints and recommendations")
    ),
    info(
        title = "Compass API",
        description = "Goal-based productivity backend with AI-assisted task generation and journal insights"
    )
)]
pub struct ApiDoc;
