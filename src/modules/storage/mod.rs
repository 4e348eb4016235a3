//! Storage module for public file hosting
//!
//! Provides a narrow upload/delete/URL facade over a MinIO/S3-compatible
//! storage client.

mod facade;
mod minio_client;
mod object_store;

pub use facade::{FileStorage, StorageClient};
pub use minio_client::MinIOClient;
pub use object_store::{
    ContentReader, ObjectStore, PutObjectOptions, ACL_HEADER, PUBLIC_READ,
};
