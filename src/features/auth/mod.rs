//! Authentication feature.
//!
//! Stateless email/password login issuing HS256 session tokens, plus the
//! token verification used by the admin-route middleware.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/login` | Exchange credentials for a session token |

pub mod dtos;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;

pub use model::AuthenticatedUser;
pub use services::{AuthService, TokenService};
