pub mod user_handler;

pub use user_handler::{__path_get_profile, __path_update_password, get_profile, update_password};
