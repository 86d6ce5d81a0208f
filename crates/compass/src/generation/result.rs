//! Generation Results
//!
//! Typed, range-validated outputs of the generation operations. Every result
//! carries an [`Origin`] so callers can tell model-derived content from
//! fallback content. Values are never mutated after creation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Priority;

/// Where a generation result came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Produced by the completion service and validated by the mapper
    ModelDerived,
    /// Produced offline by the fallback policy
    Fallback,
}

/// A generated task that has not been persisted yet.
///
/// Drafts exist only until the deferred writer turns them into stored tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TaskDraft {
    /// Goal this draft belongs to; stamped by the mapper, never taken from
    /// model output
    pub goal_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub estimated_minutes: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Result of a task-generation operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TaskGenerationResult {
    /// Drafts in the order the model returned them
    pub tasks: Vec<TaskDraft>,
    pub reasoning: Option<String>,
    pub origin: Origin,
}

/// Result of a journal-summary operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct JournalSummaryResult {
    /// Entry the summary belongs to
    pub journal_id: Uuid,
    pub summary: String,
    pub key_themes: Vec<String>,
    /// Signed sentiment (-1.0 - 1.0)
    pub sentiment: f32,
    pub mood_analysis: String,
    pub origin: Origin,
}

/// Result of a mood-analysis operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct MoodAnalysisResult {
    /// Signed aggregate sentiment (-1.0 - 1.0)
    pub overall_sentiment: f32,
    /// Trend label; expected vocabulary is improving / declining / stable /
    /// fluctuating but the field is open
    pub mood_trend: String,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    pub origin: Origin,
}

/// Union over the three generation results, as handed to the deferred writer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GenerationResult {
    Tasks(TaskGenerationResult),
    JournalSummary(JournalSummaryResult),
    MoodAnalysis(MoodAnalysisResult),
}
