use crate::auth::auth_service::AuthService;
use crate::category::category_service::CategoryService;
use crate::storage::BlobStore;
use crate::task::task_service::TaskService;
use crate::user::user_service::UserService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub storage: BlobStore,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub task_service: TaskService,
    pub category_service: CategoryService,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub storage_root: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set"),
            storage_root: std::env::var("STORAGE_ROOT")
                .unwrap_or_else(|_| "./uploads".to_string()),
        }
    }
}
