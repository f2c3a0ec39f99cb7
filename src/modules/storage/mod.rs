//! Storage module for uploaded content images
//!
//! Provides the object-storage seam used by the content service and its
//! Cloudflare R2 implementation.

mod r2_client;

pub use r2_client::{ObjectStorage, R2Client};
