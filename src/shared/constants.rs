/// Default page size for admin listings
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Default page size for public (front-end) content listings
pub const PUBLIC_PAGE_SIZE: i64 = 6;

// =============================================================================
// UPLOAD CONSTANTS
// =============================================================================

/// Maximum accepted image upload size (10 MiB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Content types accepted by the image upload endpoint
pub const ALLOWED_IMAGE_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Returns true when the given content type may be uploaded as a content image.
pub fn is_image_type_allowed(content_type: &str) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&content_type)
}
