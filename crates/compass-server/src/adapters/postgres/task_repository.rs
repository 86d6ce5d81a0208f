//! PostgreSQL implementation of TaskRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use compass::{DomainError, NewTask, Task, TaskPatch, TaskRepository, TaskStatus};

use super::db_err;

/// PostgreSQL implementation of TaskRepository
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    user_id: Uuid,
    goal_id: Option<Uuid>,
    title: String,
    description: Option<String>,
    priority: String,
    status: String,
    ai_generated: bool,
    estimated_minutes: Option<i32>,
    actual_minutes: Option<i32>,
    due_date: Option<chrono::DateTime<chrono::Utc>>,
    tags: Vec<String>,
    completed_at: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = DomainError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            goal_id: row.goal_id,
            title: row.title,
            description: row.description,
            priority: row.priority.parse().map_err(DomainError::Repository)?,
            status: row.status.parse().map_err(DomainError::Repository)?,
            ai_generated: row.ai_generated,
            estimated_minutes: row.estimated_minutes,
            actual_minutes: row.actual_minutes,
            due_date: row.due_date,
            tags: row.tags,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(
        &self,
        user_id: Uuid,
        input: NewTask,
        ai_generated: bool,
    ) -> Result<Task, DomainError> {
        let task = Task::new(user_id, input, ai_generated);

        sqlx::query(
            r#"
            INSERT INTO tasks
                (id, user_id, goal_id, title, description, priority, status,
                 ai_generated, estimated_minutes, actual_minutes, due_date,
                 tags, completed_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(task.id)
        .bind(task.user_id)
        .bind(task.goal_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.priority.to_string())
        .bind(task.status.to_string())
        .bind(task.ai_generated)
        .bind(task.estimated_minutes)
        .bind(task.actual_minutes)
        .bind(task.due_date)
        .bind(&task.tags)
        .bind(task.completed_at)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(task)
    }

    async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, DomainError> {
        let row = sqlx::query_as::<_, TaskRow>(
            "SELECT * FROM tasks WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Task::try_from).transpose()
    }

    async fn find_by_owner(
        &self,
        user_id: Uuid,
        status: Option<TaskStatus>,
        goal_id: Option<Uuid>,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT * FROM tasks
            WHERE user_id = $1
              AND ($2::text IS NULL OR status = $2)
              AND ($3::uuid IS NULL OR goal_id = $3)
            ORDER BY created_at DESC
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(user_id)
        .bind(status.map(|s| s.to_string()))
        .bind(goal_id)
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn find_by_goal(&self, goal_id: Uuid, user_id: Uuid) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT * FROM tasks
            WHERE goal_id = $1 AND user_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(goal_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn find_pending(&self, user_id: Uuid, limit: i64) -> Result<Vec<Task>, DomainError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT * FROM tasks
            WHERE user_id = $1 AND status = 'pending'
            ORDER BY
                CASE priority WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END,
                created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: TaskPatch,
    ) -> Result<Option<Task>, DomainError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                priority = COALESCE($5, priority),
                status = COALESCE($6, status),
                estimated_minutes = COALESCE($7, estimated_minutes),
                actual_minutes = COALESCE($8, actual_minutes),
                due_date = COALESCE($9, due_date),
                tags = COALESCE($10, tags),
                goal_id = COALESCE($11, goal_id),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.priority.map(|p| p.to_string()))
        .bind(patch.status.map(|s| s.to_string()))
        .bind(patch.estimated_minutes)
        .bind(patch.actual_minutes)
        .bind(patch.due_date)
        .bind(patch.tags)
        .bind(patch.goal_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Task::try_from).transpose()
    }

    async fn set_status(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<Task>, DomainError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks SET
                status = $3,
                completed_at = CASE WHEN $3 = 'completed' THEN NOW() ELSE NULL END,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(status.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(Task::try_from).transpose()
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }
}
