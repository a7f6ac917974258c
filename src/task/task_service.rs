use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::summary::{completed_count, deadline_notice, progress_percent, upcoming_titles};
use super::task_dto::{CreateTaskRequest, TaskSummaryResponse, TaskView, UpdateTaskRequest};
use super::task_models::{Task, TaskPriority, TaskStatus};
use super::task_repository::{TaskFilters, TaskRepository};
use super::view::{apply_view, deadline_flag, SortOrder};
use crate::category::category_repository::CategoryRepository;
use crate::error::{AppError, Result};

pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Service layer for task-related business logic.
#[derive(Clone)]
pub struct TaskService {
    repo: TaskRepository,
    category_repo: CategoryRepository,
}

impl TaskService {
    pub fn new(repo: TaskRepository, category_repo: CategoryRepository) -> Self {
        Self {
            repo,
            category_repo,
        }
    }

    /// Fetch the owner's tasks (category/status filters applied in SQL),
    /// then apply the in-memory search + sort view and resolve category
    /// names, falling back for stale soft references.
    pub async fn list_tasks(
        &self,
        user_id: Uuid,
        filters: TaskFilters,
        search: Option<&str>,
        order: SortOrder,
    ) -> Result<Vec<TaskView>> {
        let tasks = self.repo.find_all(user_id, filters).await?;
        let categories = self.category_repo.find_all_by_user(user_id).await?;
        let names: HashMap<Uuid, String> =
            categories.into_iter().map(|c| (c.id, c.name)).collect();

        let today = Utc::now().date_naive();
        let view = apply_view(&tasks, search, order);

        Ok(view
            .into_iter()
            .map(|task| {
                let category_name = task
                    .category_id
                    .and_then(|id| names.get(&id).cloned())
                    .unwrap_or_else(|| UNCATEGORIZED_LABEL.to_string());
                let flag = deadline_flag(&task, today);
                TaskView {
                    category_name,
                    deadline_flag: flag,
                    task,
                }
            })
            .collect())
    }

    pub async fn get_task(&self, user_id: Uuid, task_id: Uuid) -> Result<Task> {
        self.repo
            .find_by_id(task_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn create_task(&self, user_id: Uuid, payload: CreateTaskRequest) -> Result<Task> {
        let priority = payload
            .priority
            .unwrap_or_else(|| TaskPriority::Medium.to_string());
        self.repo
            .create(
                user_id,
                &payload.title,
                payload.description.as_deref(),
                &priority,
                payload.deadline,
                payload.category_id,
            )
            .await
    }

    pub async fn update_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        payload: UpdateTaskRequest,
    ) -> Result<Task> {
        let priority = payload
            .priority
            .unwrap_or_else(|| TaskPriority::Medium.to_string());
        self.repo
            .update(
                task_id,
                user_id,
                &payload.title,
                payload.description.as_deref(),
                &priority,
                payload.deadline,
                payload.category_id,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    /// Read-then-write with no version check: two sessions toggling the same
    /// task can overwrite each other, last write wins.
    pub async fn toggle_status(&self, user_id: Uuid, task_id: Uuid) -> Result<Task> {
        let task = self.get_task(user_id, task_id).await?;
        let next = if task.is_done() {
            TaskStatus::NotDone
        } else {
            TaskStatus::Done
        };
        self.repo
            .update_status(task_id, user_id, next.as_str())
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> Result<u64> {
        self.repo.delete(task_id, user_id).await
    }

    /// Called only after the blob write has completed, so a stored reference
    /// always points at an existing blob.
    pub async fn attach_file(&self, user_id: Uuid, task_id: Uuid, url: &str) -> Result<Task> {
        self.repo
            .set_attachment_url(task_id, user_id, url)
            .await?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    pub async fn summary(&self, user_id: Uuid) -> Result<TaskSummaryResponse> {
        let tasks = self.repo.find_all(user_id, TaskFilters::default()).await?;
        let today = Utc::now().date_naive();
        let upcoming = upcoming_titles(&tasks, today);
        let notice = deadline_notice(&upcoming);

        Ok(TaskSummaryResponse {
            total: tasks.len(),
            completed: completed_count(&tasks),
            percent: progress_percent(&tasks).round() as u32,
            upcoming,
            notice,
        })
    }
}
