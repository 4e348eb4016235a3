#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use tokio::io::AsyncReadExt;
#[cfg(test)]
use tokio::sync::Mutex;

#[cfg(test)]
use crate::core::config::StorageConfig;
#[cfg(test)]
use crate::core::error::TransportError;
#[cfg(test)]
use crate::modules::storage::{ContentReader, ObjectStore, PutObjectOptions};

/// Install a log subscriber that writes through the test harness
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
pub fn test_config(bucket_name: &str, base_path: &str) -> StorageConfig {
    StorageConfig {
        access_key: "test-access-key".to_string(),
        secret_key: "test-secret-key".to_string(),
        endpoint: "localhost:9000".to_string(),
        bucket_name: bucket_name.to_string(),
        base_path: base_path.to_string(),
        use_tls: false,
        region: "us-east-1".to_string(),
    }
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Put {
        bucket: String,
        key: String,
        size: u64,
        content: Vec<u8>,
        options: PutObjectOptions,
    },
    Remove {
        bucket: String,
        key: String,
    },
}

/// Object store double that records every call
///
/// Optionally answers puts or removes with a fixed error status.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingObjectStore {
    calls: Mutex<Vec<RecordedCall>>,
    put_failure: Option<(u16, String)>,
    remove_failure: Option<(u16, String)>,
}

#[cfg(test)]
#[allow(dead_code)]
impl RecordingObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_put(code: u16, body: &str) -> Self {
        Self {
            put_failure: Some((code, body.to_string())),
            ..Self::default()
        }
    }

    pub fn failing_remove(code: u16, body: &str) -> Self {
        Self {
            remove_failure: Some((code, body.to_string())),
            ..Self::default()
        }
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

#[cfg(test)]
#[async_trait]
impl ObjectStore for RecordingObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        reader: &mut ContentReader,
        size: u64,
        options: &PutObjectOptions,
    ) -> Result<u64, TransportError> {
        let mut content = Vec::new();
        reader.take(size).read_to_end(&mut content).await?;

        self.calls.lock().await.push(RecordedCall::Put {
            bucket: bucket.to_string(),
            key: key.to_string(),
            size,
            content: content.clone(),
            options: options.clone(),
        });

        match &self.put_failure {
            Some((code, body)) => Err(TransportError::Status {
                code: *code,
                body: body.clone(),
            }),
            None => Ok(content.len() as u64),
        }
    }

    async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), TransportError> {
        self.calls.lock().await.push(RecordedCall::Remove {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });

        match &self.remove_failure {
            Some((code, body)) => Err(TransportError::Status {
                code: *code,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}
