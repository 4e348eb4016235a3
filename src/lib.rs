//! Public object storage facade over an S3-compatible bucket
//!
//! ```no_run
//! use storage_facade::{FileStorage, StorageClient};
//!
//! # async fn run() -> storage_facade::Result<()> {
//! let storage = StorageClient::from_env()?;
//! let mut content: &[u8] = b"hello";
//! storage.upload(&mut content, "greetings/hello.txt", 5, "text/plain").await?;
//! println!("{}", storage.public_url("greetings/hello.txt"));
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod modules;
mod shared;

pub use crate::core::config::StorageConfig;
pub use crate::core::error::{Result, StorageError, TransportError};
pub use crate::modules::storage::{
    ContentReader, FileStorage, MinIOClient, ObjectStore, PutObjectOptions, StorageClient,
};
