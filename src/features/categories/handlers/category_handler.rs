use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::categories::dtos::{
    CategoryPageParams, CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::services::CategoryService;
use crate::shared::types::ApiResponse;

/// List all categories
#[utoipa::path(
    get,
    path = "/api/admin/categories",
    responses(
        (status = 200, description = "Categories fetched successfully", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let categories = service.list().await?;
    Ok(Json(ApiResponse::success(
        categories,
        "Categories fetched successfully",
    )))
}

/// Get a category by id
#[utoipa::path(
    get,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category fetched successfully", body = ApiResponse<CategoryResponseDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    let category = service.get(id).await?;
    Ok(Json(ApiResponse::success(
        category,
        "Category fetched successfully",
    )))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/admin/categories",
    request_body = CreateCategoryDto,
    responses(
        (status = 200, description = "Category created successfully", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Slug conflict")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_category(
    user: AuthenticatedUser,
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<CreateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.create(user.id, dto).await?;
    Ok(Json(ApiResponse::success(
        category,
        "Category created successfully",
    )))
}

/// Update a category
#[utoipa::path(
    put,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    request_body = UpdateCategoryDto,
    responses(
        (status = 200, description = "Category updated successfully", body = ApiResponse<CategoryResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateCategoryDto>,
) -> Result<Json<ApiResponse<CategoryResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let category = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(
        category,
        "Category updated successfully",
    )))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/api/admin/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Category still referenced by contents")
    ),
    tag = "categories",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        (),
        "Category deleted successfully",
    )))
}

/// List categories for the public site, paged
#[utoipa::path(
    get,
    path = "/api/fe/categories",
    params(CategoryPageParams),
    responses(
        (status = 200, description = "Categories fetched successfully", body = ApiResponse<Vec<CategoryResponseDto>>),
        (status = 400, description = "Invalid page parameters")
    ),
    tag = "categories"
)]
pub async fn list_categories_public(
    State(service): State<Arc<CategoryService>>,
    Query(params): Query<CategoryPageParams>,
) -> Result<Json<ApiResponse<Vec<CategoryResponseDto>>>> {
    let (page, per_page) = params.parse()?;
    let (categories, pagination) = service.list_page(page, per_page).await?;

    Ok(Json(ApiResponse::success_with_pagination(
        categories,
        "Categories fetched successfully",
        pagination,
    )))
}
