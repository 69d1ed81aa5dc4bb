//! Presigned URL generation

use crate::config::{create_client, S3Result, StoreConfig};
use aws_sdk_s3::presigning::PresigningConfig;
use std::time::Duration;

pub const DEFAULT_URL_EXPIRY_SECS: u64 = 3600;

/// Generate a presigned URL for downloading an object.
pub async fn presigned_get_url(
    config: &StoreConfig,
    key: &str,
    expires_in_secs: u64,
) -> S3Result<String> {
    let client = create_client(config)?;

    let presigning_config = PresigningConfig::builder()
        .expires_in(Duration::from_secs(expires_in_secs))
        .build()?;

    let presigned_request = client
        .get_object()
        .bucket(&config.bucket_name)
        .key(key)
        .presigned(presigning_config)
        .await?;

    Ok(presigned_request.uri().to_string())
}

/// Generate a presigned URL for uploading an object (PUT).
pub async fn presigned_put_url(
    config: &StoreConfig,
    key: &str,
    expires_in_secs: u64,
) -> S3Result<String> {
    let client = create_client(config)?;

    let presigning_config = PresigningConfig::builder()
        .expires_in(Duration::from_secs(expires_in_secs))
        .build()?;

    let presigned_request = client
        .put_object()
        .bucket(&config.bucket_name)
        .key(key)
        .presigned(presigning_config)
        .await?;

    Ok(presigned_request.uri().to_string())
}
