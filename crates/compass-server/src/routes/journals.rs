//! Journal Routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use compass::{DomainError, Journal, JournalPatch, JournalRepository, NewJournal};

use crate::auth::AuthUser;
use crate::routes::domain_error;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/journals", post(create_journal).get(list_journals))
        .route("/api/journals/recent", get(recent_journals))
        .route("/api/journals/search", get(search_journals))
        .route("/api/journals/range", get(journals_in_range))
        .route(
            "/api/journals/:id",
            get(get_journal).put(update_journal).delete(delete_journal),
        )
}

/// Query parameters for listing journal entries
#[derive(Debug, Deserialize, IntoParams)]
pub struct JournalListQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_list_limit")]
    pub limit: i64,
}

fn default_list_limit() -> i64 {
    100
}

/// Query parameters for recent entries
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentQuery {
    #[serde(default = "default_recent_limit")]
    pub limit: i64,
}

fn default_recent_limit() -> i64 {
    10
}

/// Query parameters for text search
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_recent_limit")]
    pub limit: i64,
}

/// Query parameters for a creation-time range
#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Create a journal entry
#[utoipa::path(
    post,
    path = "/api/journals",
    request_body = NewJournal,
    responses(
        (status = 200, description = "Journal entry created", body = Journal),
        (status = 400, description = "Invalid input")
    ),
    tag = "Journals"
)]
pub async fn create_journal(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<NewJournal>,
) -> Result<Json<Journal>, (StatusCode, String)> {
    payload.validate().map_err(domain_error)?;

    let journal = state
        .journal_repo
        .create(user_id, payload)
        .await
        .map_err(domain_error)?;

    Ok(Json(journal))
}

/// List journal entries, most recent first
#[utoipa::path(
    get,
    path = "/api/journals",
    params(JournalListQuery),
    responses(
        (status = 200, description = "Journal entries", body = Vec<Journal>)
    ),
    tag = "Journals"
)]
pub async fn list_journals(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<JournalListQuery>,
) -> Result<Json<Vec<Journal>>, (StatusCode, String)> {
    let journals = state
        .journal_repo
        .find_by_owner(user_id, query.skip, query.limit)
        .await
        .map_err(domain_error)?;

    Ok(Json(journals))
}

/// List the most recent entries
#[utoipa::path(
    get,
    path = "/api/journals/recent",
    params(RecentQuery),
    responses(
        (status = 200, description = "Recent journal entries", body = Vec<Journal>)
    ),
    tag = "Journals"
)]
pub async fn recent_journals(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<Journal>>, (StatusCode, String)> {
    let journals = state
        .journal_repo
        .find_recent(user_id, query.limit)
        .await
        .map_err(domain_error)?;

    Ok(Json(journals))
}

/// Search entries by title or content
#[utoipa::path(
    get,
    path = "/api/journals/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching journal entries", body = Vec<Journal>)
    ),
    tag = "Journals"
)]
pub async fn search_journals(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Journal>>, (StatusCode, String)> {
    let journals = state
        .journal_repo
        .search(user_id, &query.q, query.limit)
        .await
        .map_err(domain_error)?;

    Ok(Json(journals))
}

/// List entries created within a date range
#[utoipa::path(
    get,
    path = "/api/journals/range",
    params(RangeQuery),
    responses(
        (status = 200, description = "Journal entries in range", body = Vec<Journal>),
        (status = 400, description = "Invalid range")
    ),
    tag = "Journals"
)]
pub async fn journals_in_range(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Journal>>, (StatusCode, String)> {
    if query.start > query.end {
        return Err(domain_error(DomainError::validation(
            "start must not be after end",
        )));
    }

    let journals = state
        .journal_repo
        .find_in_range(user_id, query.start, query.end)
        .await
        .map_err(domain_error)?;

    Ok(Json(journals))
}

/// Get one journal entry
#[utoipa::path(
    get,
    path = "/api/journals/{id}",
    responses(
        (status = 200, description = "Journal entry", body = Journal),
        (status = 404, description = "Journal not found")
    ),
    tag = "Journals"
)]
pub async fn get_journal(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Journal>, (StatusCode, String)> {
    let journal = state
        .journal_repo
        .find_by_id(id, user_id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Journal", id)))?;

    Ok(Json(journal))
}

/// Update a journal entry
#[utoipa::path(
    put,
    path = "/api/journals/{id}",
    request_body = JournalPatch,
    responses(
        (status = 200, description = "Updated journal entry", body = Journal),
        (status = 404, description = "Journal not found")
    ),
    tag = "Journals"
)]
pub async fn update_journal(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<JournalPatch>,
) -> Result<Json<Journal>, (StatusCode, String)> {
    payload.validate().map_err(domain_error)?;

    let journal = state
        .journal_repo
        .update(id, user_id, payload)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Journal", id)))?;

    Ok(Json(journal))
}

/// Delete a journal entry
#[utoipa::path(
    delete,
    path = "/api/journals/{id}",
    responses(
        (status = 204, description = "Journal deleted"),
        (status = 404, description = "Journal not found")
    ),
    tag = "Journals"
)]
pub async fn delete_journal(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = state
        .journal_repo
        .delete(id, user_id)
        .await
        .map_err(domain_error)?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(domain_error(DomainError::not_found("Journal", id)))
    }
}
