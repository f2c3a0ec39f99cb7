mod user_service;

pub use user_service::{hash_password, UserService};
