//! Object operations (delete, copy, rename, folders)

use crate::config::{create_client, S3Result, StoreConfig};
use crate::deleter;
use crate::recent::{RecentStore, RecentlyDeletedSet};
use crate::store::S3Store;
use aws_sdk_s3::primitives::ByteStream;
use log::error;

/// Delete a single object.
pub async fn delete_object(config: &StoreConfig, key: &str) -> S3Result<()> {
    let client = create_client(config)?;
    client
        .delete_object()
        .bucket(&config.bucket_name)
        .key(key)
        .send()
        .await?;
    Ok(())
}

/// Copy an object within the bucket.
pub async fn copy_object(config: &StoreConfig, source_key: &str, dest_key: &str) -> S3Result<()> {
    let client = create_client(config)?;
    let copy_source = format!(
        "{}/{}",
        config.bucket_name,
        urlencoding::encode(source_key)
    );

    client
        .copy_object()
        .bucket(&config.bucket_name)
        .copy_source(copy_source)
        .key(dest_key)
        .send()
        .await?;

    Ok(())
}

/// Rename an object (copy then delete).
pub async fn rename_object(config: &StoreConfig, old_key: &str, new_key: &str) -> S3Result<()> {
    copy_object(config, old_key, new_key).await?;
    delete_object(config, old_key).await?;
    Ok(())
}

/// Create a folder by writing its zero-byte marker object. Recreating a path
/// that was just deleted makes it visible in listings again.
pub async fn create_folder<P: RecentStore>(
    config: &StoreConfig,
    recent: &mut RecentlyDeletedSet<P>,
    path: &str,
) -> S3Result<()> {
    let folder_key = deleter::normalize_prefix(path);

    let client = create_client(config)?;
    client
        .put_object()
        .bucket(&config.bucket_name)
        .key(&folder_key)
        .body(ByteStream::from_static(b""))
        .send()
        .await?;

    recent.clear(&folder_key);
    Ok(())
}

/// Delete a folder and everything under it. Best effort: objects that survive
/// both delete attempts are skipped rather than aborting the sweep, and
/// concurrent mutations of the same prefix are not guarded against.
pub async fn delete_folder<P: RecentStore>(
    config: &StoreConfig,
    recent: &mut RecentlyDeletedSet<P>,
    prefix: &str,
) -> bool {
    let store = match S3Store::from_config(config) {
        Ok(store) => store,
        Err(e) => {
            error!("cannot build store client for folder delete: {}", e);
            return false;
        }
    };

    deleter::delete_folder(&store, recent, prefix).await
}
