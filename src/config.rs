//! Store configuration and S3 client construction

use aws_config::Region;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Builder as S3ConfigBuilder;
use aws_sdk_s3::Client;
use serde::{Deserialize, Serialize};

pub type S3Result<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Connection settings for one bucket on an S3-compatible endpoint.
///
/// Supplied once by the caller; nothing in this crate mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    /// Path-style addressing, required for MinIO and most self-hosted stores.
    #[serde(default = "default_force_path_style")]
    pub force_path_style: bool,
}

fn default_force_path_style() -> bool {
    true
}

/// Build an S3 client for the configured endpoint.
pub fn create_client(config: &StoreConfig) -> S3Result<Client> {
    let credentials = Credentials::new(
        &config.access_key_id,
        &config.secret_access_key,
        None,
        None,
        "s3fm",
    );

    let mut builder = S3ConfigBuilder::new()
        .credentials_provider(credentials)
        .region(Region::new(config.region.clone()))
        .endpoint_url(&config.endpoint);

    if config.force_path_style {
        builder = builder.force_path_style(true);
    }

    Ok(Client::from_conf(builder.build()))
}
