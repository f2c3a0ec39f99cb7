use crate::features::users::handlers::user_handler;
use crate::features::users::services::UserService;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

/// Admin-scoped user routes; the bearer-auth layer is applied in main.
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route("/api/admin/users/profile", get(user_handler::get_profile))
        .route(
            "/api/admin/users/update-password",
            put(user_handler::update_password),
        )
        .with_state(service)
}
