//! AI Routes - generation endpoints and recommendations
//!
//! These handlers resolve the domain entities a request references, hand them
//! to the generation engine, and schedule deferred persistence of the result
//! after the response is produced. Generation failures never surface here;
//! only unresolvable entity references and invalid parameters do.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use compass::generation::MAX_DATE_RANGE_DAYS;
use compass::{
    DomainError, GenerationResult, GoalRepository, GoalStatus, JournalRepository,
    JournalSummaryContext, JournalSummaryRequest, JournalSummaryResult, MoodAnalysisContext,
    MoodAnalysisRequest, MoodAnalysisResult, TaskGenerationContext, TaskGenerationRequest,
    TaskGenerationResult, TaskRepository,
};

use crate::auth::AuthUser;
use crate::models::{
    AnalyzeMoodRequest, DateRange, GenerateTasksRequest, RecentMoodResponse,
    SummarizeJournalRequest,
};
use crate::routes::domain_error;
use crate::services::recommend::{self, RecommendationsResponse};
use crate::{AppEngine, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ai/generate-tasks", post(generate_tasks))
        .route("/api/ai/summarize-journal", post(summarize_journal))
        .route("/api/ai/analyze-mood", post(analyze_mood))
        .route("/api/ai/mood/recent", get(recent_mood))
        .route("/api/ai/recommendations", get(recommendations))
}

/// Query parameters for recent mood analysis
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentMoodQuery {
    #[serde(default = "default_days")]
    pub days: u16,
}

fn default_days() -> u16 {
    7
}

fn engine(state: &AppState) -> Result<&Arc<AppEngine>, (StatusCode, String)> {
    state.engine.as_ref().ok_or((
        StatusCode::SERVICE_UNAVAILABLE,
        "AI generation is not configured".to_string(),
    ))
}

/// Generate tasks for a goal
#[utoipa::path(
    post,
    path = "/api/ai/generate-tasks",
    request_body = GenerateTasksRequest,
    responses(
        (status = 200, description = "Generated task drafts", body = TaskGenerationResult),
        (status = 400, description = "Invalid parameters"),
        (status = 404, description = "Goal not found"),
        (status = 503, description = "AI generation not configured")
    ),
    tag = "AI"
)]
pub async fn generate_tasks(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<GenerateTasksRequest>,
) -> Result<Json<TaskGenerationResult>, (StatusCode, String)> {
    let engine = engine(&state)?;
    let request = TaskGenerationRequest::new(payload.goal_id, payload.preferences, payload.count)
        .map_err(domain_error)?;

    let goal = state
        .goal_repo
        .find_by_id(request.goal_id, user_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Goal", request.goal_id)))?;

    let existing = state
        .task_repo
        .find_by_goal(goal.id, user_id)
        .await
        .map_err(domain_error)?;

    let context = TaskGenerationContext::new(goal, existing);
    let result = engine.generate_tasks(&request, &context).await;

    // Persist after the result is already on its way back to the caller.
    state
        .writer
        .schedule(GenerationResult::Tasks(result.clone()), user_id);

    Ok(Json(result))
}

/// Summarize a journal entry
#[utoipa::path(
    post,
    path = "/api/ai/summarize-journal",
    request_body = SummarizeJournalRequest,
    responses(
        (status = 200, description = "Journal summary", body = JournalSummaryResult),
        (status = 404, description = "Journal not found"),
        (status = 503, description = "AI generation not configured")
    ),
    tag = "AI"
)]
pub async fn summarize_journal(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<SummarizeJournalRequest>,
) -> Result<Json<JournalSummaryResult>, (StatusCode, String)> {
    let engine = engine(&state)?;
    let request = JournalSummaryRequest::new(payload.journal_id);

    let journal = state
        .journal_repo
        .find_by_id(request.journal_id, user_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Journal", request.journal_id)))?;

    let context = JournalSummaryContext::new(journal);
    let result = engine.summarize_journal(&context).await;

    state
        .writer
        .schedule(GenerationResult::JournalSummary(result.clone()), user_id);

    Ok(Json(result))
}

/// Analyze mood patterns across selected journal entries
#[utoipa::path(
    post,
    path = "/api/ai/analyze-mood",
    request_body = AnalyzeMoodRequest,
    responses(
        (status = 200, description = "Mood analysis", body = MoodAnalysisResult),
        (status = 400, description = "Invalid parameters"),
        (status = 503, description = "AI generation not configured")
    ),
    tag = "AI"
)]
pub async fn analyze_mood(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<AnalyzeMoodRequest>,
) -> Result<Json<MoodAnalysisResult>, (StatusCode, String)> {
    let engine = engine(&state)?;
    let request = MoodAnalysisRequest::new(payload.journal_ids, payload.date_range_days)
        .map_err(domain_error)?;

    // Unresolvable ids are dropped; an entirely empty set is handled by the
    // engine's no-data terminal, not treated as an error.
    let mut journals = Vec::new();
    for id in &request.journal_ids {
        if let Some(journal) = state
            .journal_repo
            .find_by_id(*id, user_id)
            .await
            .map_err(domain_error)?
        {
            journals.push(journal);
        }
    }
    journals.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let context = MoodAnalysisContext::new(journals);
    let result = engine.analyze_mood(&request, &context).await;

    Ok(Json(result))
}

/// Analyze mood patterns from recent entries
#[utoipa::path(
    get,
    path = "/api/ai/mood/recent",
    params(RecentMoodQuery),
    responses(
        (status = 200, description = "Mood analysis with range metadata", body = RecentMoodResponse),
        (status = 400, description = "Invalid parameters"),
        (status = 503, description = "AI generation not configured")
    ),
    tag = "AI"
)]
pub async fn recent_mood(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<RecentMoodQuery>,
) -> Result<Json<RecentMoodResponse>, (StatusCode, String)> {
    let engine = engine(&state)?;

    if !(1..=MAX_DATE_RANGE_DAYS).contains(&query.days) {
        return Err(domain_error(DomainError::validation(format!(
            "days must be between 1 and {}",
            MAX_DATE_RANGE_DAYS
        ))));
    }

    let end = chrono::Utc::now();
    let start = end - chrono::Duration::days(i64::from(query.days));
    let journals = state
        .journal_repo
        .find_in_range(user_id, start, end)
        .await
        .map_err(domain_error)?;

    let date_range = match (journals.last(), journals.first()) {
        (Some(oldest), Some(newest)) => Some(DateRange {
            start: oldest.created_at,
            end: newest.created_at,
        }),
        _ => None,
    };
    let journals_count = journals.len();

    let request = MoodAnalysisRequest::new(journals.iter().map(|j| j.id).collect(), query.days)
        .map_err(domain_error)?;
    let context = MoodAnalysisContext::new(journals);
    let analysis = engine.analyze_mood(&request, &context).await;

    Ok(Json(RecentMoodResponse {
        analysis,
        days_analyzed: query.days,
        journals_count,
        date_range,
    }))
}

/// Rule-based quick recommendations from recent activity
#[utoipa::path(
    get,
    path = "/api/ai/recommendations",
    responses(
        (status = 200, description = "Recommendations and stats", body = RecommendationsResponse)
    ),
    tag = "AI"
)]
pub async fn recommendations(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<RecommendationsResponse>, (StatusCode, String)> {
    let pending = state
        .task_repo
        .find_pending(user_id, 5)
        .await
        .map_err(domain_error)?;
    let recent = state
        .journal_repo
        .find_recent(user_id, 3)
        .await
        .map_err(domain_error)?;
    let active_goals = state
        .goal_repo
        .find_by_owner(user_id, Some(GoalStatus::Active), None, 0, 5)
        .await
        .map_err(domain_error)?;

    let mut goals_without_tasks = 0;
    for goal in &active_goals {
        let tasks = state
            .task_repo
            .find_by_goal(goal.id, user_id)
            .await
            .map_err(domain_error)?;
        if tasks.is_empty() {
            goals_without_tasks += 1;
        }
    }

    Ok(Json(recommend::build_recommendations(
        &pending,
        &recent,
        &active_goals,
        goals_without_tasks,
    )))
}
