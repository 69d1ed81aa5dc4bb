//! Object-store contract the folder deleter runs against
//!
//! The deleter only needs paginated listing and single/batch delete, so that
//! surface is a trait: production code wires in [`S3Store`], tests wire in a
//! scripted fake. Store-specific version conventions (MinIO's `"null"`
//! sentinel) stay behind [`ObjectStore::null_version`].

mod s3;

pub use s3::S3Store;

use crate::config::S3Result;

/// One page of a paginated listing under a prefix.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    pub keys: Vec<String>,
    /// Version marker the listing exposed, if any; applies to every key on
    /// this page.
    pub version_marker: Option<String>,
    pub next_token: Option<String>,
    pub has_more: bool,
}

/// An object key plus the version it should be deleted as. `None` addresses
/// the current/unversioned object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectVersionRef {
    pub key: String,
    pub version_id: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait ObjectStore {
    /// Fetch one page of object keys under `prefix`.
    async fn list_objects_page(&self, prefix: &str, token: Option<&str>) -> S3Result<ListPage>;

    /// Delete a single object, optionally a specific version, optionally
    /// bypassing governance retention.
    async fn delete_object(
        &self,
        key: &str,
        version_id: Option<&str>,
        bypass_retention: bool,
    ) -> S3Result<()>;

    /// Delete up to [`MAX_DELETE_BATCH`](crate::deleter::MAX_DELETE_BATCH)
    /// objects in one call. `quiet` asks the store to omit per-object
    /// success acknowledgements.
    async fn delete_objects_batch(&self, entries: &[ObjectVersionRef], quiet: bool)
        -> S3Result<()>;

    /// Sentinel version id this store uses to address the null/default
    /// version during deletes (MinIO: `"null"`). `None` means the store has
    /// no such convention and versioned delete attempts are skipped.
    fn null_version(&self) -> Option<&str>;
}
