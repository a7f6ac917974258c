use super::category_dto::CreateCategoryRequest;
use super::category_models::Category;
use crate::{
    error::{AppError, Result},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

/// List the authenticated user's categories
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "List of categories", body = [Category]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<Json<Vec<Category>>> {
    let categories = state.category_service.list_categories(user_id).await?;
    Ok(Json(categories))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be blank".to_string()));
    }

    let category = state
        .category_service
        .create_category(user_id, name)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a category (referencing tasks are left untouched)
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = Uuid, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(("bearer_auth" = []))
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode> {
    state
        .category_service
        .delete_category(user_id, category_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
