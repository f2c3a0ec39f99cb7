//! User account management feature.
//!
//! Profile and password management for the authenticated admin account, plus
//! the idempotent startup seed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/users/profile` | Get the authenticated user's profile |
//! | PUT | `/api/admin/users/update-password` | Change the authenticated user's password |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seeder;
pub mod services;

pub use models::User;
pub use repository::{PgUserRepository, UserRepository};
