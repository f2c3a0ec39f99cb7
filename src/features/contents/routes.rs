use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::features::contents::handlers::content_handler;
use crate::features::contents::services::ContentService;
use crate::shared::constants::MAX_UPLOAD_SIZE;

/// Admin-scoped content routes; the bearer-auth layer is applied in main.
pub fn admin_routes(service: Arc<ContentService>) -> Router {
    Router::new()
        .route("/api/admin/contents", get(content_handler::list_contents))
        .route("/api/admin/contents", post(content_handler::create_content))
        .route(
            // Uploads carry a larger body limit than the global cap.
            "/api/admin/contents/upload-image",
            post(content_handler::upload_content_image)
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE)),
        )
        .route(
            "/api/admin/contents/{id}",
            get(content_handler::get_content),
        )
        .route(
            "/api/admin/contents/{id}",
            put(content_handler::update_content),
        )
        .route(
            "/api/admin/contents/{id}",
            delete(content_handler::delete_content),
        )
        .with_state(service)
}

/// Public content routes for the frontend site
pub fn public_routes(service: Arc<ContentService>) -> Router {
    Router::new()
        .route("/api/fe/contents", get(content_handler::list_contents_public))
        .route(
            "/api/fe/contents/{id}",
            get(content_handler::get_content_public),
        )
        .with_state(service)
}
