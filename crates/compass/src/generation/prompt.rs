//! Prompt Builder
//!
//! Pure functions that render completion prompts from generation contexts.
//! Each builder pins the JSON layout the response mapper decodes; the two
//! sides form one contract and must change together.

use serde_json::Value;

use crate::domain::Journal;
use crate::generation::context::{
    JournalSummaryContext, MoodAnalysisContext, TaskGenerationContext,
};
use crate::ports::{ChatMessage, CompletionOptions};

/// Characters of journal content rendered per entry in mood analysis
pub const JOURNAL_EXCERPT_CHARS: usize = 200;

/// A fully rendered prompt: role-tagged messages plus generation parameters
#[derive(Debug, Clone)]
pub struct CompletionPrompt {
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
}

/// Build the task-generation prompt for a goal.
pub fn task_generation(
    context: &TaskGenerationContext,
    count: u8,
    preferences: Option<&Value>,
) -> CompletionPrompt {
    let goal = &context.goal;

    let existing = if context.existing_tasks.is_empty() {
        "No existing tasks".to_string()
    } else {
        context
            .existing_tasks
            .iter()
            .map(|t| format!("- {}: {}", t.title, t.status))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let preferences = preferences
        .and_then(|p| serde_json::to_string_pretty(p).ok())
        .unwrap_or_else(|| "No specific preferences".to_string());

    let user = format!(
        r#"You are helping a user make progress on a goal. Generate {count} actionable, specific tasks.

Goal:
- Title: {title}
- Description: {description}
- Category: {category}
- Priority: {priority}
- Current progress: {progress}%
- Target date: {target_date}

Existing tasks (for context):
{existing}

User preferences:
{preferences}

Generate tasks that are:
1. Specific and actionable
2. Appropriately sized (not too big or too small)
3. Logically sequenced toward the goal
4. Varied in approach and skill requirements
5. Each carrying an estimated duration in minutes

Reply with a single JSON object of this exact shape:
{{
    "tasks": [
        {{
            "title": "Task title",
            "description": "Detailed description",
            "priority": "high|medium|low",
            "estimated_duration": 60,
            "tags": ["tag1", "tag2"]
        }}
    ],
    "reasoning": "Brief explanation of task selection and sequencing"
}}"#,
        count = count,
        title = goal.title,
        description = goal.description.as_deref().unwrap_or("No description provided"),
        category = goal.category.as_deref().unwrap_or("General"),
        priority = goal.priority,
        progress = goal.progress,
        target_date = goal
            .target_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "No deadline".to_string()),
        existing = existing,
        preferences = preferences,
    );

    CompletionPrompt {
        messages: vec![
            ChatMessage::system(
                "You are a helpful productivity coach. Always reply with a single valid JSON object.",
            ),
            ChatMessage::user(user),
        ],
        options: CompletionOptions {
            max_tokens: 2000,
            temperature: 0.7,
        },
    }
}

/// Build the journal-summary prompt for one entry.
pub fn journal_summary(context: &JournalSummaryContext) -> CompletionPrompt {
    let journal = &context.journal;

    let user = format!(
        r#"Analyze this journal entry and provide insights:

Title: {title}
Content: {content}
Mood: {mood}
Date: {date}

Provide:
1. A concise summary (2-3 sentences)
2. Key themes identified
3. A sentiment score between -1 (very negative) and 1 (very positive)
4. Mood analysis and insights

Reply with a single JSON object of this exact shape:
{{
    "summary": "Brief summary of the entry",
    "key_themes": ["theme1", "theme2", "theme3"],
    "sentiment_score": 0.5,
    "mood_analysis": "Detailed mood and emotional analysis"
}}"#,
        title = journal.title.as_deref().unwrap_or("Untitled"),
        content = journal.content,
        mood = mood_label(journal),
        date = journal.created_at.format("%Y-%m-%d"),
    );

    CompletionPrompt {
        messages: vec![
            ChatMessage::system(
                "You are an empathetic journal analyst. Provide thoughtful, non-judgmental insights. Always reply with a single valid JSON object.",
            ),
            ChatMessage::user(user),
        ],
        options: CompletionOptions {
            max_tokens: 800,
            temperature: 0.3,
        },
    }
}

/// Build the mood-analysis prompt over recent entries.
pub fn mood_analysis(context: &MoodAnalysisContext, date_range_days: u16) -> CompletionPrompt {
    let entries = context
        .journals
        .iter()
        .map(|j| {
            format!(
                "Date: {}, Mood: {}, Content: {}",
                j.created_at.format("%Y-%m-%d"),
                j.mood_score
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                excerpt(&j.content, JOURNAL_EXCERPT_CHARS),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        r#"Analyze these journal entries from the past {days} days for mood patterns and trends:

{entries}

Provide:
1. An overall sentiment score between -1 and 1
2. The mood trend (improving/declining/stable/fluctuating)
3. Key insights about patterns, triggers, or themes
4. Practical recommendations for mood improvement

Reply with a single JSON object of this exact shape:
{{
    "overall_sentiment": 0.2,
    "mood_trend": "improving",
    "insights": ["insight1", "insight2", "insight3"],
    "recommendations": ["recommendation1", "recommendation2", "recommendation3"]
}}"#,
        days = date_range_days,
        entries = entries,
    );

    CompletionPrompt {
        messages: vec![
            ChatMessage::system(
                "You are a skilled mood analyst and wellness coach. Provide actionable insights. Always reply with a single valid JSON object.",
            ),
            ChatMessage::user(user),
        ],
        options: CompletionOptions {
            max_tokens: 1000,
            temperature: 0.3,
        },
    }
}

fn mood_label(journal: &Journal) -> String {
    match journal.mood_score {
        Some(score) => {
            let label = match score {
                1 => "very sad",
                2 => "sad",
                3 => "neutral",
                4 => "happy",
                _ => "very happy",
            };
            format!("{}/5 ({})", score, label)
        }
        None => "Not specified".to_string(),
    }
}

/// First `max_chars` characters of `text`, with an ellipsis when truncated.
pub(crate) fn excerpt(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Goal, Journal, NewGoal, NewJournal, NewTask, Priority, Task};
    use crate::ports::MessageRole;
    use uuid::Uuid;

    fn mock_goal() -> Goal {
        Goal::new(
            Uuid::new_v4(),
            NewGoal {
                title: "Learn piano".to_string(),
                description: Some("Play a full piece by December".to_string()),
                category: Some("music".to_string()),
                target_date: None,
                priority: Priority::Medium,
                tags: vec![],
            },
        )
    }

    fn mock_task(goal: &Goal, title: &str) -> Task {
        Task::new(
            goal.user_id,
            NewTask {
                title: title.to_string(),
                description: None,
                priority: Priority::Medium,
                estimated_minutes: None,
                due_date: None,
                tags: vec![],
                goal_id: Some(goal.id),
            },
            false,
        )
    }

    fn mock_journal(content: &str, mood: Option<i32>) -> Journal {
        Journal::new(
            Uuid::new_v4(),
            NewJournal {
                title: None,
                content: content.to_string(),
                mood_score: mood,
                tags: vec![],
            },
        )
    }

    #[test]
    fn test_task_prompt_embeds_goal_and_tasks() {
        let goal = mock_goal();
        let tasks = vec![mock_task(&goal, "Buy a keyboard")];
        let ctx = TaskGenerationContext::new(goal, tasks);
        let prompt = task_generation(&ctx, 3, None);

        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(prompt.messages[0].role, MessageRole::System);
        let body = &prompt.messages[1].content;
        assert!(body.contains("Generate 3 actionable"));
        assert!(body.contains("Learn piano"));
        assert!(body.contains("- Buy a keyboard: pending"));
        assert!(body.contains("\"tasks\""));
        assert_eq!(prompt.options.temperature, 0.7);
        assert_eq!(prompt.options.max_tokens, 2000);
    }

    #[test]
    fn test_task_prompt_renders_preferences_block() {
        let ctx = TaskGenerationContext::new(mock_goal(), vec![]);
        let prefs = serde_json::json!({"work_style": "short sessions"});
        let prompt = task_generation(&ctx, 5, Some(&prefs));
        assert!(prompt.messages[1].content.contains("short sessions"));

        let without = task_generation(&ctx, 5, None);
        assert!(without.messages[1].content.contains("No specific preferences"));
    }

    #[test]
    fn test_journal_prompt_uses_untitled_placeholder() {
        let ctx = JournalSummaryContext::new(mock_journal("Rough day at work.", Some(2)));
        let prompt = journal_summary(&ctx);
        let body = &prompt.messages[1].content;
        assert!(body.contains("Title: Untitled"));
        assert!(body.contains("Rough day at work."));
        assert!(body.contains("2/5 (sad)"));
        assert_eq!(prompt.options.temperature, 0.3);
    }

    #[test]
    fn test_mood_prompt_truncates_long_entries() {
        let long = "x".repeat(500);
        let ctx = MoodAnalysisContext::new(vec![mock_journal(&long, Some(4))]);
        let prompt = mood_analysis(&ctx, 7);
        let body = &prompt.messages[1].content;
        assert!(body.contains("past 7 days"));
        assert!(!body.contains(&"x".repeat(JOURNAL_EXCERPT_CHARS + 1)));
        assert!(body.contains(&format!("{}...", "x".repeat(JOURNAL_EXCERPT_CHARS))));
    }

    #[test]
    fn test_excerpt_is_char_safe() {
        assert_eq!(excerpt("héllo", 10), "héllo");
        assert_eq!(excerpt("héllo wörld", 5), "héllo...");
    }
}
