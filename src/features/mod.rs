//! Features layer - One module per API feature
//!
//! Each feature keeps its DTOs, handlers, models, repository, routes and
//! services together.

pub mod auth;
pub mod categories;
pub mod contents;
pub mod users;
