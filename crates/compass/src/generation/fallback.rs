//! Fallback Policy
//!
//! Deterministic, offline substitute output used when the completion path
//! fails. Total per kind; output always satisfies the same field invariants
//! as model-derived results and is tagged [`Origin::Fallback`].

use crate::domain::entities::MAX_TITLE_LEN;
use crate::generation::context::{
    JournalSummaryContext, MoodAnalysisContext, TaskGenerationContext,
};
use crate::generation::result::{
    JournalSummaryResult, MoodAnalysisResult, Origin, TaskDraft, TaskGenerationResult,
};

/// Estimated minutes on the generic planning task
const FALLBACK_TASK_MINUTES: i32 = 60;

/// A single generic planning task derived from the goal itself.
pub fn task_generation(context: &TaskGenerationContext) -> TaskGenerationResult {
    let goal = &context.goal;
    let title: String = format!("Work on: {}", goal.title)
        .chars()
        .take(MAX_TITLE_LEN)
        .collect();

    TaskGenerationResult {
        tasks: vec![TaskDraft {
            goal_id: goal.id,
            title,
            description: Some("Break this goal down into smaller steps".to_string()),
            priority: goal.priority,
            estimated_minutes: Some(FALLBACK_TASK_MINUTES),
            tags: vec!["planning".to_string()],
        }],
        reasoning: Some("Fallback task generated because the AI service was unavailable".to_string()),
        origin: Origin::Fallback,
    }
}

/// A neutral placeholder summary for the entry.
pub fn journal_summary(context: &JournalSummaryContext) -> JournalSummaryResult {
    JournalSummaryResult {
        journal_id: context.journal.id,
        summary: "Unable to generate a summary at this time.".to_string(),
        key_themes: vec!["reflection".to_string()],
        sentiment: 0.0,
        mood_analysis: "Analysis unavailable due to a service error.".to_string(),
        origin: Origin::Fallback,
    }
}

/// A neutral mood analysis; the empty-input shape asks the user to start
/// journaling, the error shape asks them to continue.
pub fn mood_analysis(context: &MoodAnalysisContext) -> MoodAnalysisResult {
    if context.is_empty() {
        return MoodAnalysisResult {
            overall_sentiment: 0.0,
            mood_trend: "neutral".to_string(),
            insights: vec!["No journal entries found for analysis".to_string()],
            recommendations: vec![
                "Start journaling regularly to track mood patterns".to_string()
            ],
            origin: Origin::Fallback,
        };
    }

    MoodAnalysisResult {
        overall_sentiment: 0.0,
        mood_trend: "stable".to_string(),
        insights: vec!["Unable to analyze mood patterns at this time".to_string()],
        recommendations: vec!["Continue journaling regularly for better insights".to_string()],
        origin: Origin::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Goal, Journal, NewGoal, NewJournal, Priority};
    use uuid::Uuid;

    fn goal_with_title(title: &str) -> Goal {
        Goal::new(
            Uuid::new_v4(),
            NewGoal {
                title: title.to_string(),
                description: None,
                category: None,
                target_date: None,
                priority: Priority::High,
                tags: vec![],
            },
        )
    }

    fn mock_journal() -> Journal {
        Journal::new(
            Uuid::new_v4(),
            NewJournal {
                title: None,
                content: "entry".to_string(),
                mood_score: None,
                tags: vec![],
            },
        )
    }

    #[test]
    fn test_task_fallback_copies_goal_priority() {
        let ctx = TaskGenerationContext::new(goal_with_title("Learn piano"), vec![]);
        let result = task_generation(&ctx);
        assert_eq!(result.tasks.len(), 1);
        let draft = &result.tasks[0];
        assert_eq!(draft.title, "Work on: Learn piano");
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.estimated_minutes, Some(60));
        assert_eq!(draft.tags, vec!["planning".to_string()]);
        assert_eq!(draft.goal_id, ctx.goal.id);
        assert_eq!(result.origin, Origin::Fallback);
    }

    #[test]
    fn test_task_fallback_title_stays_within_bounds() {
        let ctx = TaskGenerationContext::new(goal_with_title(&"x".repeat(200)), vec![]);
        let result = task_generation(&ctx);
        assert!(result.tasks[0].title.chars().count() <= 200);
    }

    #[test]
    fn test_task_fallback_is_deterministic() {
        let ctx = TaskGenerationContext::new(goal_with_title("Read more"), vec![]);
        assert_eq!(task_generation(&ctx), task_generation(&ctx));
    }

    #[test]
    fn test_journal_fallback_is_neutral() {
        let ctx = JournalSummaryContext::new(mock_journal());
        let result = journal_summary(&ctx);
        assert_eq!(result.sentiment, 0.0);
        assert_eq!(result.key_themes, vec!["reflection".to_string()]);
        assert_eq!(result.journal_id, ctx.journal.id);
        assert_eq!(result.origin, Origin::Fallback);
    }

    #[test]
    fn test_mood_fallback_distinguishes_empty_input() {
        let empty = mood_analysis(&MoodAnalysisContext::new(vec![]));
        assert_eq!(empty.mood_trend, "neutral");
        assert_eq!(
            empty.recommendations,
            vec!["Start journaling regularly to track mood patterns".to_string()]
        );

        let nonempty = mood_analysis(&MoodAnalysisContext::new(vec![mock_journal()]));
        assert_eq!(nonempty.mood_trend, "stable");
        assert_eq!(nonempty.overall_sentiment, 0.0);
    }
}
