//! Generation Contexts
//!
//! Read-only snapshots of the domain entities grounding one generation call.
//! Contexts are built per call by the boundary layer and discarded after the
//! engine returns; nothing here is persisted.

use crate::domain::{Goal, Journal, Task};

/// Most existing tasks rendered into a task-generation prompt
pub const MAX_CONTEXT_TASKS: usize = 10;
/// Most journal entries rendered into a mood-analysis prompt
pub const MAX_CONTEXT_JOURNALS: usize = 10;

/// Context for task generation: the goal plus its most recent tasks
#[derive(Debug, Clone)]
pub struct TaskGenerationContext {
    pub goal: Goal,
    /// Most recent first; capped to bound prompt size
    pub existing_tasks: Vec<Task>,
}

impl TaskGenerationContext {
    /// `existing_tasks` is expected most-recent-first; entries beyond the cap
    /// are dropped.
    pub fn new(goal: Goal, mut existing_tasks: Vec<Task>) -> Self {
        existing_tasks.truncate(MAX_CONTEXT_TASKS);
        Self {
            goal,
            existing_tasks,
        }
    }
}

/// Context for summarizing a single journal entry
#[derive(Debug, Clone)]
pub struct JournalSummaryContext {
    pub journal: Journal,
}

impl JournalSummaryContext {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

/// Context for mood analysis across recent journal entries
#[derive(Debug, Clone)]
pub struct MoodAnalysisContext {
    /// Most recent first; capped to bound prompt size
    pub journals: Vec<Journal>,
}

impl MoodAnalysisContext {
    /// `journals` is expected most-recent-first; entries beyond the cap are
    /// dropped. An empty context is valid and short-circuits the engine to
    /// its no-data fallback.
    pub fn new(mut journals: Vec<Journal>) -> Self {
        journals.truncate(MAX_CONTEXT_JOURNALS);
        Self { journals }
    }

    pub fn is_empty(&self) -> bool {
        self.journals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewGoal, NewJournal, Priority};
    use uuid::Uuid;

    fn mock_goal() -> Goal {
        Goal::new(
            Uuid::new_v4(),
            NewGoal {
                title: "Learn piano".to_string(),
                description: None,
                category: None,
                target_date: None,
                priority: Priority::Medium,
                tags: vec![],
            },
        )
    }

    fn mock_journal(content: &str) -> Journal {
        Journal::new(
            Uuid::new_v4(),
            NewJournal {
                title: None,
                content: content.to_string(),
                mood_score: Some(3),
                tags: vec![],
            },
        )
    }

    #[test]
    fn test_task_context_caps_existing_tasks() {
        let goal = mock_goal();
        let tasks: Vec<Task> = (0..15)
            .map(|i| {
                Task::new(
                    goal.user_id,
                    crate::domain::NewTask {
                        title: format!("task {}", i),
                        description: None,
                        priority: Priority::Medium,
                        estimated_minutes: None,
                        due_date: None,
                        tags: vec![],
                        goal_id: Some(goal.id),
                    },
                    false,
                )
            })
            .collect();

        let ctx = TaskGenerationContext::new(goal, tasks);
        assert_eq!(ctx.existing_tasks.len(), MAX_CONTEXT_TASKS);
        // The cap keeps the head of the list, i.e. the most recent entries.
        assert_eq!(ctx.existing_tasks[0].title, "task 0");
    }

    #[test]
    fn test_mood_context_caps_journals() {
        let journals: Vec<Journal> = (0..12).map(|i| mock_journal(&format!("day {}", i))).collect();
        let ctx = MoodAnalysisContext::new(journals);
        assert_eq!(ctx.journals.len(), MAX_CONTEXT_JOURNALS);
        assert!(!ctx.is_empty());
        assert!(MoodAnalysisContext::new(vec![]).is_empty());
    }
}
