//! PostgreSQL implementation of JournalRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use compass::{DomainError, Journal, JournalPatch, JournalRepository, NewJournal};

use super::db_err;

/// PostgreSQL implementation of JournalRepository
pub struct PgJournalRepository {
    pool: PgPool,
}

impl PgJournalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct JournalRow {
    id: Uuid,
    user_id: Uuid,
    title: Option<String>,
    content: String,
    mood_score: Option<i32>,
    tags: Vec<String>,
    summary: Option<String>,
    sentiment: Option<f32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<JournalRow> for Journal {
    fn from(row: JournalRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            content: row.content,
            mood_score: row.mood_score,
            tags: row.tags,
            summary: row.summary,
            sentiment: row.sentiment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl JournalRepository for PgJournalRepository {
    async fn create(&self, user_id: Uuid, input: NewJournal) -> Result<Journal, DomainError> {
        let journal = Journal::new(user_id, input);

        sqlx::query(
            r#"
            INSERT INTO journals
                (id, user_id, title, content, mood_score, tags, summary,
                 sentiment, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(journal.id)
        .bind(journal.user_id)
        .bind(&journal.title)
        .bind(&journal.content)
        .bind(journal.mood_score)
        .bind(&journal.tags)
        .bind(&journal.summary)
        .bind(journal.sentiment)
        .bind(journal.created_at)
        .bind(journal.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(journal)
    }

    async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Journal>, DomainError> {
        let row = sqlx::query_as::<_, JournalRow>(
            "SELECT * FROM journals WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Journal::from))
    }

    async fn find_by_owner(
        &self,
        user_id: Uuid,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Journal>, DomainError> {
        let rows = sqlx::query_as::<_, JournalRow>(
            r#"
            SELECT * FROM journals
            WHERE user_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Journal::from).collect())
    }

    async fn find_recent(&self, user_id: Uuid, limit: i64) -> Result<Vec<Journal>, DomainError> {
        self.find_by_owner(user_id, 0, limit).await
    }

    async fn find_in_range(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Journal>, DomainError> {
        let rows = sqlx::query_as::<_, JournalRow>(
            r#"
            SELECT * FROM journals
            WHERE user_id = $1 AND created_at >= $2 AND created_at <= $3
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Journal::from).collect())
    }

    async fn search(
        &self,
        user_id: Uuid,
        query: &str,
        limit: i64,
    ) -> Result<Vec<Journal>, DomainError> {
        let pattern = format!("%{}%", query);

        let rows = sqlx::query_as::<_, JournalRow>(
            r#"
            SELECT * FROM journals
            WHERE user_id = $1 AND (title ILIKE $2 OR content ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(rows.into_iter().map(Journal::from).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: JournalPatch,
    ) -> Result<Option<Journal>, DomainError> {
        let row = sqlx::query_as::<_, JournalRow>(
            r#"
            UPDATE journals SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                mood_score = COALESCE($5, mood_score),
                tags = COALESCE($6, tags),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(patch.title)
        .bind(patch.content)
        .bind(patch.mood_score)
        .bind(patch.tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(row.map(Journal::from))
    }

    async fn record_analysis(
        &self,
        id: Uuid,
        user_id: Uuid,
        summary: &str,
        sentiment: f32,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE journals SET summary = $3, sentiment = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(summary)
        .bind(sentiment)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM journals WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }
}
