use super::task_models::Task;
use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Equality filters applied in SQL; free-text search and ordering happen
/// in memory on the fetched list.
#[derive(Debug, Default)]
pub struct TaskFilters {
    pub category_id: Option<Uuid>,
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, user_id: Uuid, filters: TaskFilters) -> Result<Vec<Task>> {
        let mut query = "SELECT * FROM tasks WHERE user_id = $1".to_string();
        let mut params_count = 1;

        if filters.category_id.is_some() {
            params_count += 1;
            query.push_str(&format!(" AND category_id = ${}", params_count));
        }

        if filters.status.is_some() {
            params_count += 1;
            query.push_str(&format!(" AND status = ${}", params_count));
        }

        query.push_str(" ORDER BY created_at DESC");

        let mut db_query = sqlx::query_as::<_, Task>(&query).bind(user_id);

        if let Some(category_id) = filters.category_id {
            db_query = db_query.bind(category_id);
        }

        if let Some(status) = filters.status {
            db_query = db_query.bind(status);
        }

        let tasks = db_query.fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    pub async fn find_by_id(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(task)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        priority: &str,
        deadline: DateTime<Utc>,
        category_id: Option<Uuid>,
    ) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (user_id, title, description, priority, deadline, category_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(deadline)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: &str,
        description: Option<&str>,
        priority: &str,
        deadline: DateTime<Utc>,
        category_id: Option<Uuid>,
    ) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET
                title = $1,
                description = $2,
                priority = $3,
                deadline = $4,
                category_id = $5,
                updated_at = NOW()
             WHERE id = $6 AND user_id = $7
             RETURNING *",
        )
        .bind(title)
        .bind(description)
        .bind(priority)
        .bind(deadline)
        .bind(category_id)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        user_id: Uuid,
        status: &str,
    ) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET status = $1, updated_at = NOW()
             WHERE id = $2 AND user_id = $3
             RETURNING *",
        )
        .bind(status)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn set_attachment_url(
        &self,
        id: Uuid,
        user_id: Uuid,
        attachment_url: &str,
    ) -> Result<Option<Task>> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET attachment_url = $1, updated_at = NOW()
             WHERE id = $2 AND user_id = $3
             RETURNING *",
        )
        .bind(attachment_url)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
