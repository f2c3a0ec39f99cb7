mod category;

pub use category::{Category, CategoryRecord};
