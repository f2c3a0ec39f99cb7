use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{ProfileResponseDto, UpdatePasswordDto};
use crate::features::users::repository::UserRepository;

/// Service for profile and credential management
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn profile(&self, user_id: i64) -> Result<ProfileResponseDto> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user_id)))?;

        Ok(user.into())
    }

    pub async fn update_password(&self, user_id: i64, dto: UpdatePasswordDto) -> Result<()> {
        let hash = hash_password(dto.new_password).await?;

        let updated = self.users.update_password(user_id, &hash).await?;
        if updated == 0 {
            return Err(AppError::NotFound(format!(
                "User with id {} not found",
                user_id
            )));
        }

        Ok(())
    }
}

/// Bcrypt work runs on the blocking pool, off the async workers.
pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}
