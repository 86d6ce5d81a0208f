//! Generation Engine
//!
//! Per-operation orchestration: build the prompt, invoke the provider once,
//! map the completion or fall back. Stateless across invocations; concurrent
//! calls are fully independent. Provider failures and malformed completions
//! are absorbed here - callers always receive a well-formed result.

use std::sync::Arc;

use crate::generation::context::{
    JournalSummaryContext, MoodAnalysisContext, TaskGenerationContext,
};
use crate::generation::request::{MoodAnalysisRequest, TaskGenerationRequest};
use crate::generation::result::{
    JournalSummaryResult, MoodAnalysisResult, TaskGenerationResult,
};
use crate::generation::{fallback, mapper, prompt};
use crate::ports::CompletionProvider;

/// Orchestrates the generation pipeline against an injected provider
pub struct GenerationEngine<P: CompletionProvider> {
    provider: Arc<P>,
}

impl<P: CompletionProvider> GenerationEngine<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Generate task drafts for a goal. Total: degrades to the fallback
    /// planning task on any provider or mapping failure.
    pub async fn generate_tasks(
        &self,
        request: &TaskGenerationRequest,
        context: &TaskGenerationContext,
    ) -> TaskGenerationResult {
        let prompt = prompt::task_generation(context, request.count, request.preferences.as_ref());

        match self.provider.complete(&prompt.messages, &prompt.options).await {
            Ok(completion) => {
                match mapper::parse_task_generation(&completion.content, context.goal.id) {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!("task generation response rejected: {}", e);
                        fallback::task_generation(context)
                    }
                }
            }
            Err(e) => {
                tracing::warn!("task generation call failed: {}", e);
                fallback::task_generation(context)
            }
        }
    }

    /// Summarize one journal entry. Total: degrades to a neutral placeholder
    /// summary on any provider or mapping failure.
    pub async fn summarize_journal(
        &self,
        context: &JournalSummaryContext,
    ) -> JournalSummaryResult {
        let prompt = prompt::journal_summary(context);

        match self.provider.complete(&prompt.messages, &prompt.options).await {
            Ok(completion) => {
                match mapper::parse_journal_summary(&completion.content, context.journal.id) {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!("journal summary response rejected: {}", e);
                        fallback::journal_summary(context)
                    }
                }
            }
            Err(e) => {
                tracing::warn!("journal summary call failed: {}", e);
                fallback::journal_summary(context)
            }
        }
    }

    /// Analyze mood patterns over recent entries. An empty context never
    /// reaches the provider: it short-circuits to the no-data fallback.
    pub async fn analyze_mood(
        &self,
        request: &MoodAnalysisRequest,
        context: &MoodAnalysisContext,
    ) -> MoodAnalysisResult {
        if context.is_empty() {
            return fallback::mood_analysis(context);
        }

        let prompt = prompt::mood_analysis(context, request.date_range_days);

        match self.provider.complete(&prompt.messages, &prompt.options).await {
            Ok(completion) => match mapper::parse_mood_analysis(&completion.content) {
                Ok(result) => result,
                Err(e) => {
                    tracing::warn!("mood analysis response rejected: {}", e);
                    fallback::mood_analysis(context)
                }
            },
            Err(e) => {
                tracing::warn!("mood analysis call failed: {}", e);
                fallback::mood_analysis(context)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::GenerationError;
    use crate::domain::{Goal, Journal, NewGoal, NewJournal, Priority};
    use crate::generation::result::Origin;
    use crate::ports::{ChatMessage, Completion, CompletionOptions};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    /// Provider that returns a canned response and counts invocations
    struct MockProvider {
        response: Result<String, String>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        fn ok(content: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(content.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionProvider for MockProvider {
        async fn complete(
            &self,
            _messages: &[ChatMessage],
            _options: &CompletionOptions,
        ) -> Result<Completion, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(content) => Ok(Completion {
                    content: content.clone(),
                    model: "mock".to_string(),
                }),
                Err(message) => Err(GenerationError::Service(message.clone())),
            }
        }

        fn provider_name(&self) -> &str {
            "mock"
        }

        fn model_id(&self) -> &str {
            "mock"
        }
    }

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

    fn tasks_json(count: usize) -> String {
        let tasks: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"title": "Step {}", "description": "Do step {}", "priority": "medium", "estimated_duration": 30, "tags": ["piano"]}}"#,
                    i + 1,
                    i + 1
                )
            })
            .collect();
        format!(
            r#"{{"tasks": [{}], "reasoning": "ordered steps"}}"#,
            tasks.join(",")
        )
    }

    #[tokio::test]
    async fn test_successful_generation_is_model_derived() {
        let provider = MockProvider::ok(&tasks_json(3));
        let engine = GenerationEngine::new(provider.clone());
        let context = TaskGenerationContext::new(mock_goal(), vec![]);
        let request = TaskGenerationRequest::new(context.goal.id, None, 3).unwrap();

        let result = engine.generate_tasks(&request, &context).await;

        assert_eq!(result.origin, Origin::ModelDerived);
        assert_eq!(result.tasks.len(), 3);
        assert!(result.tasks.iter().all(|t| t.goal_id == context.goal.id));
        assert!(result
            .tasks
            .iter()
            .all(|t| t.estimated_minutes.unwrap() >= 1));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_service_error_yields_exact_fallback() {
        let provider = MockProvider::failing("rate limited");
        let engine = GenerationEngine::new(provider);
        let context = TaskGenerationContext::new(mock_goal(), vec![]);
        let request = TaskGenerationRequest::new(context.goal.id, None, 5).unwrap();

        let result = engine.generate_tasks(&request, &context).await;

        assert_eq!(result, fallback::task_generation(&context));
        assert_eq!(result.origin, Origin::Fallback);
    }

    #[tokio::test]
    async fn test_malformed_response_never_partially_maps() {
        // Second task carries an out-of-set priority; the first is fine.
        let raw = r#"{"tasks": [
            {"title": "ok task", "priority": "low"},
            {"title": "bad task", "priority": "urgent"}
        ]}"#;
        let provider = MockProvider::ok(raw);
        let engine = GenerationEngine::new(provider);
        let context = TaskGenerationContext::new(mock_goal(), vec![]);
        let request = TaskGenerationRequest::new(context.goal.id, None, 2).unwrap();

        let result = engine.generate_tasks(&request, &context).await;

        assert_eq!(result.origin, Origin::Fallback);
        assert_eq!(result.tasks.len(), 1);
        assert!(result.tasks[0].title.starts_with("Work on:"));
    }

    #[tokio::test]
    async fn test_journal_summary_falls_back_on_bad_sentiment() {
        let raw = r#"{"summary": "s", "key_themes": [], "sentiment_score": 2.0, "mood_analysis": "m"}"#;
        let provider = MockProvider::ok(raw);
        let engine = GenerationEngine::new(provider);
        let context = JournalSummaryContext::new(mock_journal("Long day."));

        let result = engine.summarize_journal(&context).await;

        assert_eq!(result.origin, Origin::Fallback);
        assert_eq!(result.sentiment, 0.0);
        assert_eq!(result.journal_id, context.journal.id);
    }

    #[tokio::test]
    async fn test_empty_mood_context_never_calls_provider() {
        let provider = MockProvider::ok("{}");
        let engine = GenerationEngine::new(provider.clone());
        let context = MoodAnalysisContext::new(vec![]);
        let request = MoodAnalysisRequest::new(vec![], 7).unwrap();

        let result = engine.analyze_mood(&request, &context).await;

        assert_eq!(provider.call_count(), 0);
        assert_eq!(
            result.recommendations,
            vec!["Start journaling regularly to track mood patterns".to_string()]
        );
        assert_eq!(result.mood_trend, "neutral");
    }

    #[tokio::test]
    async fn test_mood_analysis_happy_path() {
        let raw = r#"{"overall_sentiment": 0.4, "mood_trend": "improving",
            "insights": ["more sleep"], "recommendations": ["keep it up"]}"#;
        let provider = MockProvider::ok(raw);
        let engine = GenerationEngine::new(provider);
        let context = MoodAnalysisContext::new(vec![mock_journal("Slept well.")]);
        let request = MoodAnalysisRequest::new(vec![context.journals[0].id], 7).unwrap();

        let result = engine.analyze_mood(&request, &context).await;

        assert_eq!(result.origin, Origin::ModelDerived);
        assert_eq!(result.mood_trend, "improving");
        assert!((-1.0..=1.0).contains(&result.overall_sentiment));
    }
}
