use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity injected into request extensions once a bearer token verifies.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub id: i64,
}

/// Signed payload carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    /// Token id; the user id as a string
    pub jti: String,
}
