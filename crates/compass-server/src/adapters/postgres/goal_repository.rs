//! PostgreSQL implementation of GoalRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use compass::{DomainError, Goal, GoalPatch, GoalRepository, GoalStatus, NewGoal};

use super::db_err;

/// PostgreSQL implementation of GoalRepository
pub struct PgGoalRepository {
    pool: PgPool,
}

impl PgGoalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct GoalRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: Option<String>,
    category: Option<String>,
    target_date: Option<chrono::DateTime<chrono::Utc>>,
    priority: String,
    status: String,
    progress: f32,
    tags: Vec<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<GoalRow> for Goal {
    type Error = DomainError;

    fn try_from(row: GoalRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            category: row.category,
            target_date: row.target_date,
            priority: row.priority.parse().map_err(DomainError::Repository)?,
            status: row.status.parse().map_err(DomainError::Repository)?,
            progress: row.progress,
            tags: row.tags,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl GoalRepository for PgGoalRepository {
    async fn create(&self, user_id: Uuid, input: NewGoal) -> Result<Goal, DomainError> {
        let goal = Goal::new(user_id, input);

        sqlx::query(
            r#"
            INSERT INTO goals
                (id, user_id, title, description, category, target_date,
                 priority, status, progress, tags, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(goal.id)
        .bind(goal.user_id)
        .bind(&goal.title)
        .bind(&goal.description)
        .bind(&goal.category)
        .bind(goal.target_date)
        .bind(goal.priority.to_string())
        .bind(goal.status.to_string())
        .bind(goal.progress)
        .bind(&goal.tags)
        .bind(goal.created_at)
        .bind(goal.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(goal)
    }

    async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Goal>, DomainError> {
        let row = sqlx::query_as::<_, GoalRow>(
            "SELECT * FROM goals WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Goal::try_from).transpose()
    }

    async fn find_by_owner(
        &self,
        user_id: Uuid,
        status: Option<GoalStatus>,
        category: Option<&str>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Goal>, DomainError> {
        let rows = sqlx::query_as::<_, GoalRow>(
            r#"
            SELECT * FROM goals
            WHERE user_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::text IS NULL OR category = $3)
            ORDER BY created_at DESC
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(user_id)
        .bind(status.map(|s| s.to_string()))
        .bind(category.map(str::to_string))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Goal::try_from).collect()
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: GoalPatch,
    ) -> Result<Option<Goal>, DomainError> {
        let row = sqlx::query_as::<_, GoalRow>(
            r#"
            UPDATE goals SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                target_date = COALESCE($6, target_date),
                priority = COALESCE($7, priority),
                status = COALESCE($8, status),
                tags = COALESCE($9, tags),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.category)
        .bind(patch.target_date)
        .bind(patch.priority.map(|p| p.to_string()))
        .bind(patch.status.map(|s| s.to_string()))
        .bind(patch.tags)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Goal::try_from).transpose()
    }

    async fn set_progress(
        &self,
        id: Uuid,
        user_id: Uuid,
        progress: f32,
    ) -> Result<Option<Goal>, DomainError> {
        let row = sqlx::query_as::<_, GoalRow>(
            r#"
            UPDATE goals SET progress = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(progress)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Goal::try_from).transpose()
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }
}
