//! Category taxonomy feature.
//!
//! CRUD over content categories with automatic slug resolution: a title is
//! slugified and suffixed until it is unique among stored slugs.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/categories` | List all categories |
//! | POST | `/api/admin/categories` | Create a category |
//! | GET | `/api/admin/categories/{id}` | Get a category by id |
//! | PUT | `/api/admin/categories/{id}` | Update a category |
//! | DELETE | `/api/admin/categories/{id}` | Delete an unused category |
//! | GET | `/api/fe/categories` | List categories for the public site, paged |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{CategoryRepository, PgCategoryRepository};
pub use services::CategoryService;
