//! Response Mapper
//!
//! Strict decode-and-validate boundary between raw completion text and typed
//! generation results. Out-of-range values are rejected, never clamped; any
//! violation fails the whole mapping so callers fall back to deterministic
//! content instead of receiving a partially-mapped result.

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use crate::domain::errors::GenerationError;
use crate::domain::Priority;
use crate::generation::result::{
    JournalSummaryResult, MoodAnalysisResult, Origin, TaskDraft, TaskGenerationResult,
};

// Wire shapes as instructed by the prompt builder.

#[derive(Deserialize)]
struct TaskListWire {
    tasks: Vec<TaskWire>,
    #[serde(default)]
    reasoning: Option<String>,
}

#[derive(Deserialize)]
struct TaskWire {
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    estimated_duration: Option<i32>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Deserialize)]
struct JournalSummaryWire {
    summary: String,
    key_themes: Vec<String>,
    sentiment_score: f32,
    mood_analysis: String,
}

#[derive(Deserialize)]
struct MoodAnalysisWire {
    overall_sentiment: f32,
    mood_trend: String,
    insights: Vec<String>,
    recommendations: Vec<String>,
}

/// Parse a task-generation completion; each draft is stamped with `goal_id`.
pub fn parse_task_generation(
    raw: &str,
    goal_id: Uuid,
) -> Result<TaskGenerationResult, GenerationError> {
    let wire: TaskListWire = decode(raw)?;

    let mut tasks = Vec::with_capacity(wire.tasks.len());
    for entry in wire.tasks {
        tasks.push(validate_task(entry, goal_id)?);
    }

    Ok(TaskGenerationResult {
        tasks,
        reasoning: wire.reasoning,
        origin: Origin::ModelDerived,
    })
}

/// Parse a journal-summary completion for the given entry.
pub fn parse_journal_summary(
    raw: &str,
    journal_id: Uuid,
) -> Result<JournalSummaryResult, GenerationError> {
    let wire: JournalSummaryWire = decode(raw)?;

    if wire.summary.trim().is_empty() {
        return Err(malformed("summary is empty"));
    }
    validate_sentiment(wire.sentiment_score, "sentiment_score")?;

    Ok(JournalSummaryResult {
        journal_id,
        summary: wire.summary,
        key_themes: wire.key_themes,
        sentiment: wire.sentiment_score,
        mood_analysis: wire.mood_analysis,
        origin: Origin::ModelDerived,
    })
}

/// Parse a mood-analysis completion.
pub fn parse_mood_analysis(raw: &str) -> Result<MoodAnalysisResult, GenerationError> {
    let wire: MoodAnalysisWire = decode(raw)?;

    validate_sentiment(wire.overall_sentiment, "overall_sentiment")?;
    if wire.mood_trend.trim().is_empty() {
        return Err(malformed("mood_trend is empty"));
    }

    Ok(MoodAnalysisResult {
        overall_sentiment: wire.overall_sentiment,
        mood_trend: wire.mood_trend,
        insights: wire.insights,
        recommendations: wire.recommendations,
        origin: Origin::ModelDerived,
    })
}

fn validate_task(entry: TaskWire, goal_id: Uuid) -> Result<TaskDraft, GenerationError> {
    if entry.title.trim().is_empty() {
        return Err(malformed("task title is empty"));
    }
    if entry.title.chars().count() > MAX_TITLE_LEN {
        return Err(malformed(format!(
            "task title exceeds {} characters",
            MAX_TITLE_LEN
        )));
    }
    if let Some(desc) = &entry.description {
        if desc.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(malformed(format!(
                "task description exceeds {} characters",
                MAX_DESCRIPTION_LEN
            )));
        }
    }
    if let Some(minutes) = entry.estimated_duration {
        if minutes < 1 {
            return Err(malformed(format!(
                "estimated_duration must be at least 1, got {}",
                minutes
            )));
        }
    }

    Ok(TaskDraft {
        goal_id,
        title: entry.title,
        description: entry.description,
        priority: entry.priority,
        estimated_minutes: entry.estimated_duration,
        tags: entry.tags,
    })
}

fn validate_sentiment(value: f32, field: &str) -> Result<(), GenerationError> {
    if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
        return Err(malformed(format!(
            "{} must be between -1 and 1, got {}",
            field, value
        )));
    }
    Ok(())
}

fn malformed(message: impl std::fmt::Display) -> GenerationError {
    GenerationError::MalformedResponse(message.to_string())
}

/// Decode the completion text into a wire struct.
///
/// Models asked for "a single JSON object" still occasionally wrap it in a
/// markdown fence or prose, so extraction cascades: direct parse, fenced
/// block, then the outermost brace-delimited region.
fn decode<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    let value = extract_json(raw)?;
    serde_json::from_value(value).map_err(|e| malformed(e))
}

fn extract_json(raw: &str) -> Result<Value, GenerationError> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return require_object(value);
    }

    if let Some(fenced) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str::<Value>(fenced) {
            return require_object(value);
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return require_object(value);
            }
        }
    }

    Err(malformed("no JSON object found in completion text"))
}

fn require_object(value: Value) -> Result<Value, GenerationError> {
    if value.is_object() {
        Ok(value)
    } else {
        Err(malformed("completion JSON is not an object"))
    }
}

/// Contents of the first ``` fence, tolerating a language tag after the
/// opening backticks.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_open = &text[open + 3..];
    let body_start = after_open.find('\n')? + 1;
    let body = &after_open[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_TASKS: &str = r#"{
        "tasks": [
            {"title": "Buy a keyboard", "description": "A 61-key model is enough", "priority": "high", "estimated_duration": 45, "tags": ["setup"]},
            {"title": "Find a teacher", "priority": "medium", "estimated_duration": 30, "tags": []},
            {"title": "Practice scales", "priority": "low", "estimated_duration": 20, "tags": ["practice"]},
            {"title": "Learn one song", "priority": "medium", "estimated_duration": 90, "tags": ["practice"]},
            {"title": "Record progress", "priority": "low", "estimated_duration": 15, "tags": []}
        ],
        "reasoning": "Setup first, then practice."
    }"#;

    #[test]
    fn test_five_tasks_map_in_order_with_goal_id() {
        let goal_id = Uuid::new_v4();
        let result = parse_task_generation(GOOD_TASKS, goal_id).unwrap();
        assert_eq!(result.tasks.len(), 5);
        assert_eq!(result.tasks[0].title, "Buy a keyboard");
        assert_eq!(result.tasks[4].title, "Record progress");
        assert!(result.tasks.iter().all(|t| t.goal_id == goal_id));
        assert_eq!(result.origin, Origin::ModelDerived);
        assert_eq!(result.reasoning.as_deref(), Some("Setup first, then practice."));
    }

    #[test]
    fn test_missing_tasks_key_rejected() {
        let err = parse_task_generation(r#"{"reasoning": "hm"}"#, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let raw = r#"{"tasks": [{"title": "t", "priority": "urgent"}]}"#;
        assert!(parse_task_generation(raw, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_zero_duration_rejected() {
        let raw = r#"{"tasks": [{"title": "t", "priority": "low", "estimated_duration": 0}]}"#;
        assert!(parse_task_generation(raw, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_empty_title_rejected() {
        let raw = r#"{"tasks": [{"title": "   ", "priority": "low"}]}"#;
        assert!(parse_task_generation(raw, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_missing_priority_defaults_to_medium() {
        let raw = r#"{"tasks": [{"title": "t"}]}"#;
        let result = parse_task_generation(raw, Uuid::new_v4()).unwrap();
        assert_eq!(result.tasks[0].priority, Priority::Medium);
    }

    #[test]
    fn test_fenced_completion_accepted() {
        let raw = format!("Here you go:\n```json\n{}\n```\nHope that helps!", GOOD_TASKS);
        let result = parse_task_generation(&raw, Uuid::new_v4()).unwrap();
        assert_eq!(result.tasks.len(), 5);
    }

    #[test]
    fn test_plain_prose_rejected() {
        assert!(parse_task_generation("I could not generate tasks.", Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_journal_summary_roundtrip() {
        let raw = r#"{
            "summary": "A calm, productive day.",
            "key_themes": ["work", "rest"],
            "sentiment_score": 0.6,
            "mood_analysis": "Generally positive with mild fatigue."
        }"#;
        let journal_id = Uuid::new_v4();
        let result = parse_journal_summary(raw, journal_id).unwrap();
        assert_eq!(result.journal_id, journal_id);
        assert_eq!(result.sentiment, 0.6);
        assert_eq!(result.key_themes, vec!["work", "rest"]);
    }

    #[test]
    fn test_out_of_range_sentiment_rejected_not_clamped() {
        let raw = r#"{
            "summary": "ok",
            "key_themes": [],
            "sentiment_score": 1.5,
            "mood_analysis": "ok"
        }"#;
        assert!(parse_journal_summary(raw, Uuid::new_v4()).is_err());
    }

    #[test]
    fn test_mood_analysis_requires_trend() {
        let raw = r#"{
            "overall_sentiment": 0.2,
            "mood_trend": "",
            "insights": [],
            "recommendations": []
        }"#;
        assert!(parse_mood_analysis(raw).is_err());

        let ok = r#"{
            "overall_sentiment": -0.4,
            "mood_trend": "declining",
            "insights": ["less sleep"],
            "recommendations": ["earlier nights"]
        }"#;
        let result = parse_mood_analysis(ok).unwrap();
        assert_eq!(result.mood_trend, "declining");
        assert_eq!(result.overall_sentiment, -0.4);
    }
}
