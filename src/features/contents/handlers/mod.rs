pub mod content_handler;

pub use content_handler::{
    __path_create_content, __path_delete_content, __path_get_content, __path_get_content_public,
    __path_list_contents, __path_list_contents_public, __path_update_content,
    __path_upload_content_image, create_content, delete_content, get_content, get_content_public,
    list_contents, list_contents_public, update_content, upload_content_image,
};
