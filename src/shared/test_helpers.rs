#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn test_admin_user() -> AuthenticatedUser {
    AuthenticatedUser { id: 1 }
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(test_admin_user());
    next.run(request).await
}

/// Wraps a router with a layer that authenticates every request as the test
/// admin, standing in for the bearer-token middleware.
#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
