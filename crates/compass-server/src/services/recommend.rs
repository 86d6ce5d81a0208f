//! Quick Recommendations - Rule-based activity nudges
//!
//! Derives lightweight suggestions from the user's recent activity without
//! touching the completion service. Rule-based by design so the endpoint is
//! fast and always available.

use serde::Serialize;
use utoipa::ToSchema;

use compass::{Goal, Journal, Priority, Task};

/// Mood average below which self-care is suggested
const LOW_MOOD_THRESHOLD: f32 = 3.0;

/// Kind of recommendation produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    TaskPriority,
    MoodSupport,
    GoalPlanning,
}

/// A single recommendation with a machine-readable action hint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub message: String,
    pub action: String,
}

/// Snapshot counts shown alongside the recommendations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivityStats {
    pub pending_tasks: usize,
    pub recent_journals: usize,
    pub active_goals: usize,
}

/// Response for GET /api/ai/recommendations
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
    pub stats: ActivityStats,
}

/// Build recommendations from recent activity.
///
/// `goals_without_tasks` is the number of active goals that have no tasks
/// attached; the caller computes it since it needs per-goal lookups.
pub fn build_recommendations(
    pending_tasks: &[Task],
    recent_journals: &[Journal],
    active_goals: &[Goal],
    goals_without_tasks: usize,
) -> RecommendationsResponse {
    let mut recommendations = Vec::new();

    let high_priority = pending_tasks
        .iter()
        .filter(|t| t.priority == Priority::High)
        .count();
    if high_priority > 0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::TaskPriority,
            message: format!(
                "You have {} high-priority task{} pending. Consider tackling them first.",
                high_priority,
                if high_priority == 1 { "" } else { "s" }
            ),
            action: "focus_on_priority_tasks".to_string(),
        });
    }

    if let Some(avg) = average_mood(recent_journals) {
        if avg < LOW_MOOD_THRESHOLD {
            recommendations.push(Recommendation {
                kind: RecommendationKind::MoodSupport,
                message: "Your recent journal entries suggest you might benefit from some self-care activities.".to_string(),
                action: "suggest_wellness_activities".to_string(),
            });
        }
    }

    if goals_without_tasks > 0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::GoalPlanning,
            message: format!(
                "You have {} goal{} without specific tasks. Break them down into actionable steps.",
                goals_without_tasks,
                if goals_without_tasks == 1 { "" } else { "s" }
            ),
            action: "create_goal_tasks".to_string(),
        });
    }

    RecommendationsResponse {
        recommendations,
        stats: ActivityStats {
            pending_tasks: pending_tasks.len(),
            recent_journals: recent_journals.len(),
            active_goals: active_goals.len(),
        },
    }
}

fn average_mood(journals: &[Journal]) -> Option<f32> {
    let scores: Vec<i32> = journals.iter().filter_map(|j| j.mood_score).collect();
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<i32>() as f32 / scores.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass::{NewGoal, NewJournal, NewTask};
    use uuid::Uuid;

    fn mock_task(priority: Priority) -> Task {
        Task::new(
            Uuid::new_v4(),
            NewTask {
                title: "t".to_string(),
                description: None,
                priority,
                estimated_minutes: None,
                due_date: None,
                tags: vec![],
                goal_id: None,
            },
            false,
        )
    }

    fn mock_journal(mood: Option<i32>) -> Journal {
        Journal::new(
            Uuid::new_v4(),
            NewJournal {
                title: None,
                content: "entry".to_string(),
                mood_score: mood,
                tags: vec![],
            },
        )
    }

    fn mock_goal() -> Goal {
        Goal::new(
            Uuid::new_v4(),
            NewGoal {
                title: "g".to_string(),
                description: None,
                category: None,
                target_date: None,
                priority: Priority::Medium,
                tags: vec![],
            },
        )
    }

    #[test]
    fn test_high_priority_tasks_trigger_recommendation() {
        let tasks = vec![mock_task(Priority::High), mock_task(Priority::Low)];
        let response = build_recommendations(&tasks, &[], &[], 0);
        assert_eq!(response.recommendations.len(), 1);
        assert_eq!(
            response.recommendations[0].kind,
            RecommendationKind::TaskPriority
        );
        assert!(response.recommendations[0].message.contains("1 high-priority task"));
    }

    #[test]
    fn test_low_mood_triggers_self_care() {
        let journals = vec![mock_journal(Some(2)), mock_journal(Some(1))];
        let response = build_recommendations(&[], &journals, &[], 0);
        assert_eq!(
            response.recommendations[0].kind,
            RecommendationKind::MoodSupport
        );
    }

    #[test]
    fn test_good_mood_triggers_nothing() {
        let journals = vec![mock_journal(Some(4)), mock_journal(Some(5))];
        let response = build_recommendations(&[], &journals, &[], 0);
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn test_unscored_journals_are_ignored() {
        let journals = vec![mock_journal(None)];
        let response = build_recommendations(&[], &journals, &[], 0);
        assert!(response.recommendations.is_empty());
        assert_eq!(response.stats.recent_journals, 1);
    }

    #[test]
    fn test_goals_without_tasks_trigger_planning() {
        let goals = vec![mock_goal(), mock_goal()];
        let response = build_recommendations(&[], &[], &goals, 2);
        assert_eq!(
            response.recommendations[0].kind,
            RecommendationKind::GoalPlanning
        );
        assert!(response.recommendations[0].message.contains("2 goals"));
        assert_eq!(response.stats.active_goals, 2);
    }
}
