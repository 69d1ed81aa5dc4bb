//! Operations invoked by the file-manager UI
//!
//! Organized by concern, one free async fn per operation, each taking the
//! caller's [`StoreConfig`](crate::config::StoreConfig):
//! - `list`: delimiter listing shaped into the folder/file view
//! - `objects`: delete, copy, rename, folder create/delete
//! - `upload`: put, get, head
//! - `presigned`: presigned URL generation

mod list;
mod objects;
mod presigned;
mod upload;

pub use list::{list_folder, FileEntry, FolderEntry, FolderListing};
pub use objects::{
    copy_object, create_folder, delete_folder, delete_object, rename_object,
};
pub use presigned::{presigned_get_url, presigned_put_url, DEFAULT_URL_EXPIRY_SECS};
pub use upload::{download_object, object_metadata, upload_object, ObjectMetadata};
