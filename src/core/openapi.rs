use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::contents::{
    dtos as contents_dtos, handlers as contents_handlers, models as contents_models,
};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::{ApiResponse, Meta, PaginationMeta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        // Users
        users_handlers::get_profile,
        users_handlers::update_password,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        categories_handlers::list_categories_public,
        // Contents
        contents_handlers::list_contents,
        contents_handlers::get_content,
        contents_handlers::create_content,
        contents_handlers::update_content,
        contents_handlers::delete_content,
        contents_handlers::upload_content_image,
        contents_handlers::list_contents_public,
        contents_handlers::get_content_public,
    ),
    components(
        schemas(
            // Shared
            Meta,
            PaginationMeta,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::LoginResponseDto,
            ApiResponse<auth_dtos::LoginResponseDto>,
            // Users
            users_dtos::ProfileResponseDto,
            users_dtos::UpdatePasswordDto,
            ApiResponse<users_dtos::ProfileResponseDto>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Contents
            contents_models::ContentStatus,
            contents_dtos::ContentResponseDto,
            contents_dtos::CreateContentDto,
            contents_dtos::UpdateContentDto,
            contents_dtos::UploadImageDto,
            contents_dtos::UploadImageResponseDto,
            ApiResponse<Vec<contents_dtos::ContentResponseDto>>,
            ApiResponse<contents_dtos::ContentResponseDto>,
            ApiResponse<contents_dtos::UploadImageResponseDto>,
        )
    ),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "Profile and password management"),
        (name = "categories", description = "Content categories"),
        (name = "contents", description = "News content management and public listing"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Newsdesk API",
        version = "0.1.0",
        description = "API documentation for Newsdesk",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
