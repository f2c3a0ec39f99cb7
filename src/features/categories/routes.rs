use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::features::categories::handlers::category_handler;
use crate::features::categories::services::CategoryService;

/// Admin-scoped category routes; the bearer-auth layer is applied in main.
pub fn admin_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/admin/categories",
            get(category_handler::list_categories),
        )
        .route(
            "/api/admin/categories",
            post(category_handler::create_category),
        )
        .route(
            "/api/admin/categories/{id}",
            get(category_handler::get_category),
        )
        .route(
            "/api/admin/categories/{id}",
            put(category_handler::update_category),
        )
        .route(
            "/api/admin/categories/{id}",
            delete(category_handler::delete_category),
        )
        .with_state(service)
}

/// Public category routes for the frontend site
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/fe/categories",
            get(category_handler::list_categories_public),
        )
        .with_state(service)
}
