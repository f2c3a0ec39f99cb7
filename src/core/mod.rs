//! Core layer - Application-wide infrastructure
//!
//! Configuration, database pool, error taxonomy, extractors, HTTP
//! middleware and the OpenAPI document.

pub mod config;
pub mod database;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod openapi;
