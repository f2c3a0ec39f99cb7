use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{routing::post, Router};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/login", post(handlers::login))
        .with_state(service)
}
