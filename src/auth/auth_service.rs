use crate::auth::auth_repository::RefreshTokenRepository;
use crate::auth::{create_access_token, create_refresh_token, hash_password, verify_password, verify_jwt};
use crate::db::DbPool;
use crate::error::Result;
use crate::user::user_models::User;
use crate::user::user_repository::UserRepository;
use chrono::{Duration, Utc};

#[derive(Clone)]
pub struct AuthService {
    db: DbPool,
    user_repo: UserRepository,
    refresh_token_repo: RefreshTokenRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        db: DbPool,
        user_repo: UserRepository,
        refresh_token_repo: RefreshTokenRepository,
        jwt_secret: String,
    ) -> Self {
        Self {
            db,
            user_repo,
            refresh_token_repo,
            jwt_secret,
        }
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String, String)> {
        let password_hash = hash_password(password)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .user_repo
            .create_with_tx(&mut tx, name, email, &password_hash)
            .await?;

        let access_token = create_access_token(user.id, &user.email, &self.jwt_secret)?;
        let refresh_token = create_refresh_token(user.id, &user.email, &self.jwt_secret)?;

        let expires_at = Utc::now() + Duration::days(7);
        self.refresh_token_repo
            .create_with_tx(&mut tx, user.id, &refresh_token, expires_at)
            .await?;

        tx.commit().await?;

        Ok((user, access_token, refresh_token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String, String)> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| crate::error::AppError::Authentication("Invalid credentials".into()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(crate::error::AppError::Authentication(
                "Invalid credentials".into(),
            ));
        }

        let access_token = create_access_token(user.id, &user.email, &self.jwt_secret)?;
        let refresh_token = create_refresh_token(user.id, &user.email, &self.jwt_secret)?;

        let expires_at = Utc::now() + Duration::days(7);
        self.refresh_token_repo
            .create(user.id, &refresh_token, expires_at)
            .await?;

        Ok((user, access_token, refresh_token))
    }

    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<(String, String)> {
        let claims = verify_jwt(refresh_token, &self.jwt_secret)?;

        self.refresh_token_repo
            .find_by_token(refresh_token)
            .await?
            .ok_or_else(|| crate::error::AppError::Authentication("Invalid refresh token".into()))?;

        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| crate::error::AppError::Authentication("Invalid token claims".into()))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| crate::error::AppError::Authentication("User not found".into()))?;

        let new_access_token = create_access_token(user.id, &user.email, &self.jwt_secret)?;
        let new_refresh_token = create_refresh_token(user.id, &user.email, &self.jwt_secret)?;

        // Rotate the refresh token: the old one is gone the moment the new
        // one exists.
        let mut tx = self.db.begin().await?;

        self.refresh_token_repo
            .delete_by_token_with_tx(&mut tx, refresh_token)
            .await?;

        let expires_at = Utc::now() + Duration::days(7);
        self.refresh_token_repo
            .create_with_tx(&mut tx, user.id, &new_refresh_token, expires_at)
            .await?;

        tx.commit().await?;

        Ok((new_access_token, new_refresh_token))
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        self.refresh_token_repo.delete_by_token(refresh_token).await
    }
}
