use super::{user_models::UserResponse, user_repository::UserRepository};
use crate::auth::{hash_password, verify_password};
use crate::error::{AppError, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    pub fn new(user_repository: UserRepository) -> Self {
        Self { user_repository }
    }

    pub async fn get_current_user(&self, user_id: Uuid) -> Result<UserResponse> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(user.into())
    }

    pub async fn update_name(&self, user_id: Uuid, name: &str) -> Result<UserResponse> {
        let user = self.user_repository.update_name(user_id, name).await?;
        Ok(user.into())
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(current_password, &user.password_hash)? {
            return Err(AppError::Authentication(
                "Current password is incorrect".to_string(),
            ));
        }

        let password_hash = hash_password(new_password)?;
        self.user_repository
            .update_password_hash(user_id, &password_hash)
            .await
    }
}
