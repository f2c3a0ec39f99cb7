use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, LoginResponseDto};
use crate::features::auth::services::TokenService;
use crate::features::users::repository::UserRepository;

/// Unknown email and wrong password collapse into this one message so the
/// response never reveals which of the two failed.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Service for credential checks and session token issuance
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    pub async fn login(&self, dto: LoginRequestDto) -> Result<LoginResponseDto> {
        let user = self
            .users
            .find_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

        let password = dto.password;
        let hash = user.password.clone();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Password check failed: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let (access_token, expires_at) = self.tokens.generate(user.id)?;

        Ok(LoginResponseDto {
            access_token,
            expires_at,
        })
    }
}
