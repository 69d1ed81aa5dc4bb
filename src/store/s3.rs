//! aws-sdk-s3 implementation of [`ObjectStore`]

use super::{ListPage, ObjectStore, ObjectVersionRef};
use crate::config::{create_client, S3Result, StoreConfig};
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;

/// Version id MinIO accepts for the null/default version of an object.
const NULL_VERSION: &str = "null";

pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn from_config(config: &StoreConfig) -> S3Result<Self> {
        Ok(Self::new(create_client(config)?, &config.bucket_name))
    }
}

impl ObjectStore for S3Store {
    async fn list_objects_page(&self, prefix: &str, token: Option<&str>) -> S3Result<ListPage> {
        let mut request = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .max_keys(1000);

        if let Some(token) = token {
            request = request.continuation_token(token);
        }

        let response = request.send().await?;

        let keys = response
            .contents()
            .iter()
            .filter_map(|obj| obj.key().map(str::to_string))
            .collect();

        Ok(ListPage {
            keys,
            // A v2 listing carries no version information.
            version_marker: None,
            next_token: response.next_continuation_token().map(str::to_string),
            has_more: response.is_truncated().unwrap_or(false),
        })
    }

    async fn delete_object(
        &self,
        key: &str,
        version_id: Option<&str>,
        bypass_retention: bool,
    ) -> S3Result<()> {
        let mut request = self.client.delete_object().bucket(&self.bucket).key(key);

        if let Some(version_id) = version_id {
            request = request.version_id(version_id);
        }
        if bypass_retention {
            request = request.bypass_governance_retention(true);
        }

        request.send().await?;
        Ok(())
    }

    async fn delete_objects_batch(
        &self,
        entries: &[ObjectVersionRef],
        quiet: bool,
    ) -> S3Result<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut objects = Vec::with_capacity(entries.len());
        for entry in entries {
            objects.push(
                ObjectIdentifier::builder()
                    .key(&entry.key)
                    .set_version_id(entry.version_id.clone())
                    .build()?,
            );
        }

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(quiet)
            .build()?;

        self.client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await?;

        Ok(())
    }

    fn null_version(&self) -> Option<&str> {
        Some(NULL_VERSION)
    }
}
