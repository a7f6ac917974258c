use crate::{
    auth::{auth_dto, auth_handlers},
    category::{category_dto, category_handlers, category_models},
    middleware::auth_middleware,
    state::AppState,
    task::{task_dto, task_handlers, task_models, view},
    user::{user_dto, user_handlers, user_models},
};
use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handlers::register,
        auth_handlers::login,
        auth_handlers::refresh_token,
        auth_handlers::logout,
        user_handlers::get_current_user,
        user_handlers::update_current_user,
        user_handlers::change_password,
        task_handlers::list_tasks,
        task_handlers::task_summary,
        task_handlers::get_task,
        task_handlers::create_task,
        task_handlers::update_task,
        task_handlers::delete_task,
        task_handlers::toggle_task_status,
        task_handlers::upload_attachment,
        category_handlers::list_categories,
        category_handlers::create_category,
        category_handlers::delete_category,
    ),
    components(
        schemas(
            auth_dto::RegisterRequest,
            auth_dto::LoginRequest,
            auth_dto::AuthResponse,
            auth_dto::RefreshTokenRequest,
            auth_dto::RefreshTokenResponse,
            user_dto::UpdateProfileRequest,
            user_dto::ChangePasswordRequest,
            user_models::UserResponse,
            task_dto::CreateTaskRequest,
            task_dto::UpdateTaskRequest,
            task_dto::TaskView,
            task_dto::TaskSummaryResponse,
            task_models::Task,
            task_models::TaskStatus,
            task_models::TaskPriority,
            view::DeadlineFlag,
            category_dto::CreateCategoryRequest,
            category_models::Category,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "Profile endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "categories", description = "Category endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes (no auth required)
    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login))
        .route("/refresh", post(auth_handlers::refresh_token))
        .route("/logout", post(auth_handlers::logout));

    // Protected routes (auth required)
    let user_routes = Router::new()
        .route(
            "/me",
            get(user_handlers::get_current_user).put(user_handlers::update_current_user),
        )
        .route("/me/password", put(user_handlers::change_password))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let task_routes = Router::new()
        .route(
            "/",
            get(task_handlers::list_tasks).post(task_handlers::create_task),
        )
        .route("/summary", get(task_handlers::task_summary))
        .route(
            "/:id",
            get(task_handlers::get_task)
                .put(task_handlers::update_task)
                .delete(task_handlers::delete_task),
        )
        .route("/:id/toggle", patch(task_handlers::toggle_task_status))
        .route("/:id/attachment", post(task_handlers::upload_attachment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let category_routes = Router::new()
        .route(
            "/",
            get(category_handlers::list_categories).post(category_handlers::create_category),
        )
        .route("/:id", delete(category_handlers::delete_category))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/tasks", task_routes)
        .nest("/categories", category_routes);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .nest_service("/files", ServeDir::new(state.storage.root()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
