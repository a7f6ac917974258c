use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::task_dto::{CreateTaskRequest, TaskSummaryResponse, TaskView, UpdateTaskRequest};
use super::task_models::Task;
use super::task_repository::TaskFilters;
use super::view::SortOrder;
use crate::{
    error::{AppError, Result},
    state::AppState,
};

#[derive(Deserialize)]
pub struct TaskListQuery {
    category_id: Option<Uuid>,
    status: Option<String>,
    search: Option<String>,
    sort: Option<String>,
}

/// Get all tasks for the authenticated user
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(
        ("category_id" = Option<Uuid>, Query, description = "Filter by category"),
        ("status" = Option<String>, Query, description = "Filter by status (Done, NotDone)"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring match on title or description"),
        ("sort" = Option<String>, Query, description = "Sort order (deadline_asc, deadline_desc, title_asc, created_desc, priority_desc, priority_asc)")
    ),
    responses(
        (status = 200, description = "List of tasks", body = [TaskView]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<Vec<TaskView>>> {
    let filters = TaskFilters {
        category_id: query.category_id,
        status: query.status,
    };
    let order = SortOrder::parse(query.sort.as_deref());

    let tasks = state
        .task_service
        .list_tasks(user_id, filters, query.search.as_deref(), order)
        .await?;

    Ok(Json(tasks))
}

/// Progress and upcoming-deadline summary
#[utoipa::path(
    get,
    path = "/api/tasks/summary",
    responses(
        (status = 200, description = "Completion progress and deadline notice", body = TaskSummaryResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn task_summary(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<TaskSummaryResponse>> {
    let summary = state.task_service.summary(user_id).await?;
    Ok(Json(summary))
}

/// Get a single task
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 200, description = "The task", body = Task),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn get_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Task>> {
    let task = state.task_service.get_task(user_id, task_id).await?;
    Ok(Json(task))
}

/// Create a task (title and deadline are mandatory)
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let task = state.task_service.create_task(user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Replace a task's editable fields
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(task_id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let task = state
        .task_service
        .update_task(user_id, task_id, payload)
        .await?;

    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(task_id): Path<Uuid>,
) -> Result<StatusCode> {
    let rows_affected = state.task_service.delete_task(user_id, task_id).await?;

    if rows_affected == 0 {
        return Err(AppError::NotFound("Task not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Flip a task between Done and NotDone
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}/toggle",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task with flipped status", body = Task),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn toggle_task_status(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Task>> {
    let task = state.task_service.toggle_status(user_id, task_id).await?;
    Ok(Json(task))
}

/// Upload an attachment; replaces the task's stored reference once the blob
/// write has completed
#[utoipa::path(
    post,
    path = "/api/tasks/{id}/attachment",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task with new attachment reference", body = Task),
        (status = 400, description = "Missing or malformed file field"),
        (status = 404, description = "Task not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "tasks",
    security(("bearer_auth" = []))
)]
pub async fn upload_attachment(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(task_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<Task>> {
    // 404 before anything is written to the blob store.
    state.task_service.get_task(user_id, task_id).await?;

    let mut stored_url = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Malformed multipart payload".to_string()))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("attachment").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::BadRequest("Failed to read uploaded file".to_string()))?;
            stored_url = Some(state.storage.store(user_id, &file_name, &bytes).await?);
        }
    }

    let url =
        stored_url.ok_or_else(|| AppError::BadRequest("Missing 'file' field".to_string()))?;

    let task = state
        .task_service
        .attach_file(user_id, task_id, &url)
        .await?;

    Ok(Json(task))
}
