//! Upload, download and metadata operations

use crate::config::{create_client, S3Result, StoreConfig};
use crate::files;
use aws_sdk_s3::primitives::ByteStream;
use serde::Serialize;
use std::collections::HashMap;

/// Upload an object with a simple PUT and return its etag. When no content
/// type is given, one is guessed from the key's extension.
pub async fn upload_object(
    config: &StoreConfig,
    key: &str,
    body: Vec<u8>,
    content_type: Option<&str>,
) -> S3Result<String> {
    let client = create_client(config)?;
    let content_type = content_type.unwrap_or_else(|| files::content_type_for(key));

    let response = client
        .put_object()
        .bucket(&config.bucket_name)
        .key(key)
        .body(ByteStream::from(body))
        .content_type(content_type)
        .send()
        .await?;

    Ok(response.e_tag().unwrap_or_default().to_string())
}

/// Download an object into memory.
pub async fn download_object(config: &StoreConfig, key: &str) -> S3Result<Vec<u8>> {
    let client = create_client(config)?;

    let response = client
        .get_object()
        .bucket(&config.bucket_name)
        .key(key)
        .send()
        .await?;

    let data = response.body.collect().await?;
    Ok(data.into_bytes().to_vec())
}

#[derive(Debug, Clone, Serialize)]
pub struct ObjectMetadata {
    pub content_type: String,
    pub size: i64,
    pub last_modified: String,
    pub metadata: HashMap<String, String>,
}

/// HEAD an object.
pub async fn object_metadata(config: &StoreConfig, key: &str) -> S3Result<ObjectMetadata> {
    let client = create_client(config)?;

    let response = client
        .head_object()
        .bucket(&config.bucket_name)
        .key(key)
        .send()
        .await?;

    Ok(ObjectMetadata {
        content_type: response.content_type().unwrap_or_default().to_string(),
        size: response.content_length().unwrap_or(0),
        last_modified: response
            .last_modified()
            .map(|dt| dt.to_string())
            .unwrap_or_default(),
        metadata: response.metadata().cloned().unwrap_or_default(),
    })
}
