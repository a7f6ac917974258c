use super::{category_models::Category, category_repository::CategoryRepository};
use crate::error::{AppError, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct CategoryService {
    repo: CategoryRepository,
}

impl CategoryService {
    pub fn new(repo: CategoryRepository) -> Self {
        Self { repo }
    }

    pub async fn list_categories(&self, user_id: Uuid) -> Result<Vec<Category>> {
        self.repo.find_all_by_user(user_id).await
    }

    pub async fn create_category(&self, user_id: Uuid, name: &str) -> Result<Category> {
        self.repo.create(user_id, name).await
    }

    /// Tasks referencing the category keep their stale id and render the
    /// fallback label instead.
    pub async fn delete_category(&self, user_id: Uuid, category_id: Uuid) -> Result<()> {
        let rows_affected = self.repo.delete(category_id, user_id).await?;

        if rows_affected == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        Ok(())
    }
}
