//! Storage core for a web file manager on S3-compatible object stores
//! (MinIO, Cloudflare R2, AWS S3).
//!
//! The crate is organized into:
//! - `config`: connection settings and S3 client construction
//! - `store`: the list/delete contract the deleter runs against
//! - `deleter`: recursive prefix ("folder") deletion, the one operation with
//!   real failure-handling in it
//! - `recent`: recently-deleted folder bookkeeping that masks list lag
//! - `ops`: the operations the UI invokes (list, upload, rename, ...)
//! - `files`: content types, icons and display formatting

pub mod config;
pub mod deleter;
pub mod files;
pub mod ops;
pub mod recent;
pub mod store;

pub use config::{create_client, S3Result, StoreConfig};
pub use deleter::{normalize_prefix, DeletionOutcome, SweepError, MAX_DELETE_BATCH};
pub use ops::{
    copy_object, create_folder, delete_folder, delete_object, download_object, list_folder,
    object_metadata, presigned_get_url, presigned_put_url, rename_object, upload_object,
    FileEntry, FolderEntry, FolderListing, ObjectMetadata, DEFAULT_URL_EXPIRY_SECS,
};
pub use recent::{JsonFileStore, MemoryStore, RecentStore, RecentlyDeletedSet};
pub use store::{ListPage, ObjectStore, ObjectVersionRef, S3Store};
