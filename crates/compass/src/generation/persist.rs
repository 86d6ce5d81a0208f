//! Deferred Persistence Runner
//!
//! Best-effort writes of generation side effects, scheduled after the caller
//! already has its response. Each item is attempted independently; failures
//! are logged and discarded, never retried, never surfaced. Mood analysis
//! results are returned to the caller only and never persisted.

use std::sync::Arc;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::domain::NewTask;
use crate::generation::result::{GenerationResult, JournalSummaryResult, TaskGenerationResult};
use crate::ports::{JournalRepository, TaskRepository};

/// Schedules fire-and-forget persistence of generation results
pub struct DeferredWriter<T, J>
where
    T: TaskRepository + 'static,
    J: JournalRepository + 'static,
{
    tasks: Arc<T>,
    journals: Arc<J>,
}

impl<T, J> DeferredWriter<T, J>
where
    T: TaskRepository + 'static,
    J: JournalRepository + 'static,
{
    pub fn new(tasks: Arc<T>, journals: Arc<J>) -> Self {
        Self { tasks, journals }
    }

    /// Queue the result's side effects on a detached task and return its
    /// handle. The handle is for tests and shutdown hooks; callers respond
    /// without awaiting it.
    pub fn schedule(&self, result: GenerationResult, user_id: Uuid) -> JoinHandle<()> {
        let tasks = self.tasks.clone();
        let journals = self.journals.clone();

        tokio::spawn(async move {
            match result {
                GenerationResult::Tasks(result) => {
                    persist_task_drafts(tasks.as_ref(), result, user_id).await;
                }
                GenerationResult::JournalSummary(result) => {
                    persist_journal_analysis(journals.as_ref(), result, user_id).await;
                }
                // Mood analysis is ephemeral.
                GenerationResult::MoodAnalysis(_) => {}
            }
        })
    }
}

async fn persist_task_drafts<T: TaskRepository>(
    tasks: &T,
    result: TaskGenerationResult,
    user_id: Uuid,
) {
    for draft in result.tasks {
        let title = draft.title.clone();
        let input = NewTask {
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            estimated_minutes: draft.estimated_minutes,
            due_date: None,
            tags: draft.tags,
            goal_id: Some(draft.goal_id),
        };

        if let Err(e) = tasks.create(user_id, input, true).await {
            tracing::warn!("failed to persist generated task \"{}\": {}", title, e);
        }
    }
}

async fn persist_journal_analysis<J: JournalRepository>(
    journals: &J,
    result: JournalSummaryResult,
    user_id: Uuid,
) {
    match journals
        .record_analysis(result.journal_id, user_id, &result.summary, result.sentiment)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!(
                "journal {} disappeared before its analysis could be stored",
                result.journal_id
            );
        }
        Err(e) => {
            tracing::warn!(
                "failed to store analysis for journal {}: {}",
                result.journal_id,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use crate::domain::{
        Journal, JournalPatch, NewJournal, Priority, Task, TaskPatch, TaskStatus,
    };
    use crate::generation::result::{Origin, TaskDraft};
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Task repository that records creates and fails on selected titles
    #[derive(Default)]
    struct MockTaskRepo {
        created: Mutex<Vec<Task>>,
        fail_titles: HashSet<String>,
    }

    #[async_trait]
    impl TaskRepository for MockTaskRepo {
        async fn create(
            &self,
            user_id: Uuid,
            input: NewTask,
            ai_generated: bool,
        ) -> Result<Task, DomainError> {
            if self.fail_titles.contains(&input.title) {
                return Err(DomainError::Repository("storage timeout".to_string()));
            }
            let task = Task::new(user_id, input, ai_generated);
            self.created.lock().unwrap().push(task.clone());
            Ok(task)
        }

        async fn find_by_id(&self, _: Uuid, _: Uuid) -> Result<Option<Task>, DomainError> {
            unimplemented!()
        }

        async fn find_by_owner(
            &self,
            _: Uuid,
            _: Option<TaskStatus>,
            _: Option<Uuid>,
            _: i64,
            _: i64,
        ) -> Result<Vec<Task>, DomainError> {
            unimplemented!()
        }

        async fn find_by_goal(&self, _: Uuid, _: Uuid) -> Result<Vec<Task>, DomainError> {
            unimplemented!()
        }

        async fn find_pending(&self, _: Uuid, _: i64) -> Result<Vec<Task>, DomainError> {
            unimplemented!()
        }

        async fn update(
            &self,
            _: Uuid,
            _: Uuid,
            _: TaskPatch,
        ) -> Result<Option<Task>, DomainError> {
            unimplemented!()
        }

        async fn set_status(
            &self,
            _: Uuid,
            _: Uuid,
            _: TaskStatus,
        ) -> Result<Option<Task>, DomainError> {
            unimplemented!()
        }

        async fn delete(&self, _: Uuid, _: Uuid) -> Result<bool, DomainError> {
            unimplemented!()
        }
    }

    /// Journal repository that records analysis writes
    #[derive(Default)]
    struct MockJournalRepo {
        analyses: Mutex<Vec<(Uuid, String, f32)>>,
    }

    #[async_trait]
    impl JournalRepository for MockJournalRepo {
        async fn create(&self, _: Uuid, _: NewJournal) -> Result<Journal, DomainError> {
            unimplemented!()
        }

        async fn find_by_id(&self, _: Uuid, _: Uuid) -> Result<Option<Journal>, DomainError> {
            unimplemented!()
        }

        async fn find_by_owner(
            &self,
            _: Uuid,
            _: i64,
            _: i64,
        ) -> Result<Vec<Journal>, DomainError> {
            unimplemented!()
        }

        async fn find_recent(&self, _: Uuid, _: i64) -> Result<Vec<Journal>, DomainError> {
            unimplemented!()
        }

        async fn find_in_range(
            &self,
            _: Uuid,
            _: DateTime<Utc>,
            _: DateTime<Utc>,
        ) -> Result<Vec<Journal>, DomainError> {
            unimplemented!()
        }

        async fn search(&self, _: Uuid, _: &str, _: i64) -> Result<Vec<Journal>, DomainError> {
            unimplemented!()
        }

        async fn update(
            &self,
            _: Uuid,
            _: Uuid,
            _: JournalPatch,
        ) -> Result<Option<Journal>, DomainError> {
            unimplemented!()
        }

        async fn record_analysis(
            &self,
            id: Uuid,
            _user_id: Uuid,
            summary: &str,
            sentiment: f32,
        ) -> Result<bool, DomainError> {
            self.analyses
                .lock()
                .unwrap()
                .push((id, summary.to_string(), sentiment));
            Ok(true)
        }

        async fn delete(&self, _: Uuid, _: Uuid) -> Result<bool, DomainError> {
            unimplemented!()
        }
    }

    fn draft(goal_id: Uuid, title: &str) -> TaskDraft {
        TaskDraft {
            goal_id,
            title: title.to_string(),
            description: None,
            priority: Priority::Medium,
            estimated_minutes: Some(30),
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_failing_draft_does_not_block_siblings() {
        let goal_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let task_repo = Arc::new(MockTaskRepo {
            created: Mutex::new(vec![]),
            fail_titles: HashSet::from(["second".to_string()]),
        });
        let journal_repo = Arc::new(MockJournalRepo::default());
        let writer = DeferredWriter::new(task_repo.clone(), journal_repo);

        let result = TaskGenerationResult {
            tasks: vec![
                draft(goal_id, "first"),
                draft(goal_id, "second"),
                draft(goal_id, "third"),
            ],
            reasoning: None,
            origin: Origin::ModelDerived,
        };

        writer
            .schedule(GenerationResult::Tasks(result), user_id)
            .await
            .unwrap();

        let created = task_repo.created.lock().unwrap();
        let titles: Vec<&str> = created.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "third"]);
        assert!(created.iter().all(|t| t.ai_generated));
        assert!(created.iter().all(|t| t.goal_id == Some(goal_id)));
    }

    #[tokio::test]
    async fn test_journal_analysis_lands_on_the_right_entry() {
        let journal_id = Uuid::new_v4();
        let task_repo = Arc::new(MockTaskRepo::default());
        let journal_repo = Arc::new(MockJournalRepo::default());
        let writer = DeferredWriter::new(task_repo, journal_repo.clone());

        let result = JournalSummaryResult {
            journal_id,
            summary: "A quiet week.".to_string(),
            key_themes: vec!["rest".to_string()],
            sentiment: 0.3,
            mood_analysis: "Calm overall.".to_string(),
            origin: Origin::ModelDerived,
        };

        writer
            .schedule(GenerationResult::JournalSummary(result), Uuid::new_v4())
            .await
            .unwrap();

        let analyses = journal_repo.analyses.lock().unwrap();
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].0, journal_id);
        assert_eq!(analyses[0].1, "A quiet week.");
        assert_eq!(analyses[0].2, 0.3);
    }

    #[tokio::test]
    async fn test_mood_results_are_never_persisted() {
        let task_repo = Arc::new(MockTaskRepo::default());
        let journal_repo = Arc::new(MockJournalRepo::default());
        let writer = DeferredWriter::new(task_repo.clone(), journal_repo.clone());

        let result = crate::generation::result::MoodAnalysisResult {
            overall_sentiment: 0.1,
            mood_trend: "stable".to_string(),
            insights: vec![],
            recommendations: vec![],
            origin: Origin::ModelDerived,
        };

        writer
            .schedule(GenerationResult::MoodAnalysis(result), Uuid::new_v4())
            .await
            .unwrap();

        assert!(task_repo.created.lock().unwrap().is_empty());
        assert!(journal_repo.analyses.lock().unwrap().is_empty());
    }
}
