//! Underlying object store collaborator
//!
//! The facade talks to the store only through [`ObjectStore`], which keeps the
//! SDK surface out of callers and lets tests swap in a double.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::core::error::TransportError;

/// Header granting anonymous read access to an uploaded object
pub const ACL_HEADER: &str = "x-amz-acl";

/// Canned ACL applied to every upload
pub const PUBLIC_READ: &str = "public-read";

/// Byte stream accepted for uploads
pub type ContentReader = dyn AsyncRead + Unpin + Send;

/// Per-request options for a put
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PutObjectOptions {
    /// MIME type stored with the object
    pub content_type: String,
    /// Extra request headers sent with the put
    pub user_metadata: BTreeMap<String, String>,
}

impl PutObjectOptions {
    /// Options for an anonymously readable object
    pub fn public_read(content_type: &str) -> Self {
        let mut user_metadata = BTreeMap::new();
        user_metadata.insert(ACL_HEADER.to_string(), PUBLIC_READ.to_string());

        Self {
            content_type: content_type.to_string(),
            user_metadata,
        }
    }

    pub fn acl(&self) -> Option<&str> {
        self.user_metadata.get(ACL_HEADER).map(String::as_str)
    }
}

/// S3-compatible client capability used by the storage facade
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `size` bytes read from `reader` under `key` in `bucket`
    ///
    /// Returns the number of bytes written. Bytes past `size` are left unread;
    /// a stream shorter than `size` fails with `SizeMismatch`.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        reader: &mut ContentReader,
        size: u64,
        options: &PutObjectOptions,
    ) -> Result<u64, TransportError>;

    /// Remove `key` from `bucket`
    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), TransportError>;
}
