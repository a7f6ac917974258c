use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::task_models::Task;
use super::view::DeadlineFlag;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub description: Option<String>,
    /// Mandatory at creation; only stored rows may lack one.
    pub deadline: DateTime<Utc>,
    pub priority: Option<String>,
    pub category_id: Option<Uuid>,
}

/// Full replacement of the editable fields. Status, attachment, and creation
/// time are never touched by an update.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub description: Option<String>,
    pub deadline: DateTime<Utc>,
    pub priority: Option<String>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    /// Resolved category name, or the fallback label for missing/stale refs.
    pub category_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_flag: Option<DeadlineFlag>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskSummaryResponse {
    pub total: usize,
    pub completed: usize,
    /// Rounded to the nearest integer for display.
    pub percent: u32,
    pub upcoming: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}
