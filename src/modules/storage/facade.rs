//! Public file storage facade
//!
//! Narrow capability surface over an [`ObjectStore`]: upload, delete and
//! public URL construction. Every upload is stored as public-read.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::core::config::StorageConfig;
use crate::core::error::Result;
use crate::modules::storage::minio_client::MinIOClient;
use crate::modules::storage::object_store::{ContentReader, ObjectStore, PutObjectOptions};

/// File storage capability exposed to the rest of an application
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Upload `size` bytes from `content` as `object_name`, readable by anyone
    ///
    /// Overwrites any existing object with the same name. Returns the number
    /// of bytes written.
    async fn upload(
        &self,
        content: &mut ContentReader,
        object_name: &str,
        size: u64,
        content_type: &str,
    ) -> Result<u64>;

    /// Delete `object_name` from the bucket
    async fn delete(&self, object_name: &str) -> Result<()>;

    /// Direct URL of `object_name`
    ///
    /// Performs no I/O and no escaping; the object is not checked for existence.
    fn public_url(&self, object_name: &str) -> String;

    /// Replace the underlying client handle
    fn configure_client(&mut self, client: Arc<dyn ObjectStore>);
}

/// Storage facade backed by an S3-compatible bucket
pub struct StorageClient {
    client: Arc<dyn ObjectStore>,
    bucket_name: String,
    base_path: String,
}

impl StorageClient {
    /// Build a facade around an existing client handle
    pub fn with_client(config: &StorageConfig, client: Arc<dyn ObjectStore>) -> Self {
        Self {
            client,
            bucket_name: config.bucket_name.clone(),
            base_path: config.base_path.clone(),
        }
    }

    /// Build a facade connected to the endpoint in `config`
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        let client = MinIOClient::from_config(config)?;

        info!(
            "Storage facade initialized for endpoint: {}, bucket: {}, base_path: {}",
            client.endpoint(),
            config.bucket_name,
            config.base_path
        );

        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Build a facade from the `STORAGE_*` environment variables
    pub fn from_env() -> Result<Self> {
        let config = StorageConfig::from_env()?;
        Self::from_config(&config)
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

impl fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageClient")
            .field("bucket_name", &self.bucket_name)
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl FileStorage for StorageClient {
    #[instrument(skip(self, content), fields(bucket = %self.bucket_name))]
    async fn upload(
        &self,
        content: &mut ContentReader,
        object_name: &str,
        size: u64,
        content_type: &str,
    ) -> Result<u64> {
        let options = PutObjectOptions::public_read(content_type);
        let written = self
            .client
            .put_object(&self.bucket_name, object_name, content, size, &options)
            .await?;

        Ok(written)
    }

    #[instrument(skip(self), fields(bucket = %self.bucket_name))]
    async fn delete(&self, object_name: &str) -> Result<()> {
        self.client
            .remove_object(&self.bucket_name, object_name)
            .await?;

        Ok(())
    }

    fn public_url(&self, object_name: &str) -> String {
        format!(
            "https://{}.{}/{}",
            self.bucket_name, self.base_path, object_name
        )
    }

    fn configure_client(&mut self, client: Arc<dyn ObjectStore>) {
        self.client = client;
    }
}
