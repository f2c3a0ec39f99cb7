//! Shared layer - Cross-feature building blocks
//!
//! Response envelope, constants, slug resolution, pagination math and test
//! helpers.

pub mod constants;
pub mod pagination;
pub mod slug;
pub mod test_helpers;
pub mod types;
