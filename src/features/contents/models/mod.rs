mod content;

pub use content::{split_tags, ContentRecord, ContentStatus, NewContent};
