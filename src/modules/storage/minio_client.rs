//! MinIO/S3-compatible storage client
//!
//! Implements [`ObjectStore`] on top of the rust-s3 crate. Signing,
//! connection handling and the wire protocol all live in the SDK.

use async_trait::async_trait;
use reqwest::Url;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::core::config::StorageConfig;
use crate::core::error::{StorageError, TransportError};
use crate::modules::storage::object_store::{ContentReader, ObjectStore, PutObjectOptions};

/// MinIO/S3-compatible storage client
pub struct MinIOClient {
    region: Region,
    credentials: Credentials,
    endpoint: String,
}

impl MinIOClient {
    /// Upper bound for the buffer reserved ahead of reading an upload
    const MAX_PREALLOC_BYTES: u64 = 8 * 1024 * 1024;

    /// Create a client for `endpoint`
    ///
    /// `endpoint` may be a bare `host[:port]`, in which case `use_tls` picks
    /// the scheme, or a full `http(s)://` URL. No request is sent here.
    pub fn new(
        endpoint: &str,
        access_key: &str,
        secret_key: &str,
        use_tls: bool,
        region: &str,
    ) -> Result<Self, StorageError> {
        let endpoint = normalize_endpoint(endpoint, use_tls)?;

        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| {
                StorageError::Configuration(format!("Failed to create storage credentials: {}", e))
            })?;

        let region = Region::Custom {
            region: region.to_string(),
            endpoint: endpoint.clone(),
        };

        Ok(Self {
            region,
            credentials,
            endpoint,
        })
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self, StorageError> {
        Self::new(
            &config.endpoint,
            &config.access_key,
            &config.secret_key,
            config.use_tls,
            &config.region,
        )
    }

    /// The endpoint URL requests are sent to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Bucket handle for a single request, carrying `headers` on every call
    fn bucket<'a, I>(&self, name: &str, headers: I) -> Result<Box<Bucket>, TransportError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut bucket = Bucket::new(name, self.region.clone(), self.credentials.clone())?;
        // Path-style URLs (http://endpoint/bucket instead of http://bucket.endpoint)
        bucket.set_path_style();

        for (key, value) in headers {
            if !is_valid_header(key, value) {
                return Err(TransportError::InvalidMetadata(key.clone()));
            }
            bucket.add_header(key, value);
        }

        Ok(bucket)
    }
}

#[async_trait]
impl ObjectStore for MinIOClient {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        reader: &mut ContentReader,
        size: u64,
        options: &PutObjectOptions,
    ) -> Result<u64, TransportError> {
        if key.is_empty() {
            return Err(TransportError::InvalidObjectName(key.to_string()));
        }

        let mut data = Vec::with_capacity(size.min(Self::MAX_PREALLOC_BYTES) as usize);
        reader.take(size).read_to_end(&mut data).await?;

        let actual = data.len() as u64;
        if actual != size {
            return Err(TransportError::SizeMismatch {
                expected: size,
                actual,
            });
        }

        let handle = self.bucket(bucket, &options.user_metadata)?;
        let response = handle
            .put_object_with_content_type(key, &data, &options.content_type)
            .await?;
        check_status(response.status_code(), response.as_slice(), "upload", bucket, key)?;

        debug!("Uploaded file '{}' ({} bytes) to bucket '{}'", key, actual, bucket);
        Ok(actual)
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), TransportError> {
        if key.is_empty() {
            return Err(TransportError::InvalidObjectName(key.to_string()));
        }

        let handle = self.bucket(bucket, std::iter::empty())?;
        let response = handle.delete_object(key).await?;
        check_status(response.status_code(), response.as_slice(), "delete", bucket, key)?;

        debug!("Deleted file '{}' from bucket '{}'", key, bucket);
        Ok(())
    }
}

/// Turn a non-2xx response into an error
fn check_status(
    code: u16,
    body: &[u8],
    action: &str,
    bucket: &str,
    key: &str,
) -> Result<(), TransportError> {
    if (200..300).contains(&code) {
        return Ok(());
    }

    let body = String::from_utf8_lossy(body).into_owned();
    warn!(
        "Failed to {} file '{}' in bucket '{}': status {}",
        action, key, bucket, code
    );
    Err(TransportError::Status { code, body })
}

fn normalize_endpoint(endpoint: &str, use_tls: bool) -> Result<String, StorageError> {
    let endpoint = endpoint.trim().trim_end_matches('/');

    let candidate = if endpoint.contains("://") {
        endpoint.to_string()
    } else {
        let scheme = if use_tls { "https" } else { "http" };
        format!("{}://{}", scheme, endpoint)
    };

    let url = Url::parse(&candidate).map_err(|e| {
        StorageError::Configuration(format!("Invalid storage endpoint {:?}: {}", endpoint, e))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(StorageError::Configuration(format!(
            "Unsupported storage endpoint scheme: {}",
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(StorageError::Configuration(format!(
            "Storage endpoint has no host: {:?}",
            endpoint
        )));
    }

    Ok(candidate)
}

fn is_valid_header(key: &str, value: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        && value.bytes().all(|b| b == b'\t' || (b' '..=b'~').contains(&b))
}
