use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::models::User;

/// Response DTO for the authenticated user's profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponseDto {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for ProfileResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

/// Request DTO for changing the current password
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordDto {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}
