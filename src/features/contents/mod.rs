//! Content management feature.
//!
//! CRUD over news content with filtered, paginated listings and image
//! uploads to object storage. The admin surface sees every record; the
//! public surface only sees `PUBLISHED` ones.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/contents` | List contents with filters, drafts included |
//! | POST | `/api/admin/contents` | Create a content record |
//! | GET | `/api/admin/contents/{id}` | Get a content record by id |
//! | PUT | `/api/admin/contents/{id}` | Update a content record |
//! | DELETE | `/api/admin/contents/{id}` | Delete a content record |
//! | POST | `/api/admin/contents/upload-image` | Upload a content image |
//! | GET | `/api/fe/contents` | List published contents |
//! | GET | `/api/fe/contents/{id}` | Get a content record |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{ContentRepository, PgContentRepository};
pub use services::ContentService;
