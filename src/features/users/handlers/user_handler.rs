use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::users::dtos::{ProfileResponseDto, UpdatePasswordDto};
use crate::features::users::services::UserService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/admin/users/profile",
    responses(
        (status = 200, description = "User fetched successfully", body = ApiResponse<ProfileResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_profile(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<ProfileResponseDto>>> {
    let profile = service.profile(user.id).await?;
    Ok(Json(ApiResponse::success(
        profile,
        "User fetched successfully",
    )))
}

/// Change the authenticated user's password
#[utoipa::path(
    put,
    path = "/api/admin/users/update-password",
    request_body = UpdatePasswordDto,
    responses(
        (status = 200, description = "Password updated successfully"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "users",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_password(
    user: AuthenticatedUser,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<UpdatePasswordDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.update_password(user.id, dto).await?;
    Ok(Json(ApiResponse::success(
        (),
        "Password updated successfully",
    )))
}
