//! AI Generation DTOs

use chrono::{DateTime, Utc};
use compass::MoodAnalysisResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

/// Request body for POST /api/ai/generate-tasks
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateTasksRequest {
    pub goal_id: Uuid,
    /// Free-form preferences rendered into the prompt
    #[schema(value_type = Option<Object>)]
    pub preferences: Option<Value>,
    #[serde(default = "default_task_count")]
    pub count: u8,
}

fn default_task_count() -> u8 {
    5
}

/// Request body for POST /api/ai/summarize-journal
#[derive(Debug, Deserialize, ToSchema)]
pub struct SummarizeJournalRequest {
    pub journal_id: Uuid,
}

/// Request body for POST /api/ai/analyze-mood
#[derive(Debug, Deserialize, ToSchema)]
pub struct AnalyzeMoodRequest {
    pub journal_ids: Vec<Uuid>,
    #[serde(default = "default_date_range_days")]
    pub date_range_days: u16,
}

fn default_date_range_days() -> u16 {
    7
}

/// Response for GET /api/ai/mood/recent
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentMoodResponse {
    pub analysis: MoodAnalysisResult,
    pub days_analyzed: u16,
    pub journals_count: usize,
    pub date_range: Option<DateRange>,
}

/// Inclusive creation-time range of the analyzed entries
#[derive(Debug, Serialize, ToSchema)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
