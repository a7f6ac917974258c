mod auth;
mod category;
mod db;
mod error;
mod middleware;
mod routes;
mod state;
mod storage;
mod task;
mod user;

use db::{create_pool, run_migrations};
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use storage::BlobStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,taskdeck=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    let storage = BlobStore::new(config.storage_root.clone());

    // Create repositories
    let user_repository = user::user_repository::UserRepository::new(db.clone());
    let task_repository = task::task_repository::TaskRepository::new(db.clone());
    let category_repository = category::category_repository::CategoryRepository::new(db.clone());
    let refresh_token_repository = auth::auth_repository::RefreshTokenRepository::new(db.clone());

    // Create services
    let auth_service = auth::auth_service::AuthService::new(
        db.clone(),
        user_repository.clone(),
        refresh_token_repository,
        config.jwt_secret.clone(),
    );
    let user_service = user::user_service::UserService::new(user_repository);
    let task_service =
        task::task_service::TaskService::new(task_repository, category_repository.clone());
    let category_service = category::category_service::CategoryService::new(category_repository);

    // Create application state
    let state = AppState {
        config: config.clone(),
        storage,
        auth_service,
        user_service,
        task_service,
        category_service,
    };

    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
