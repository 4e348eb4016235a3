use std::env;
use std::fmt;

use crate::core::error::{Result, StorageError};

/// Connection settings for the S3-compatible object store
///
/// Read once from the environment; absent variables become empty strings
/// and are handed to the storage client untouched.
#[derive(Clone)]
pub struct StorageConfig {
    /// Access key for authentication
    pub access_key: String,
    /// Secret key for authentication
    pub secret_key: String,
    /// Storage endpoint, either `host[:port]` or a full URL
    pub endpoint: String,
    /// Bucket holding every uploaded object
    pub bucket_name: String,
    /// Public domain suffix used when building object URLs
    pub base_path: String,
    /// Talk to a bare `host[:port]` endpoint over HTTPS
    pub use_tls: bool,
    /// Region used for request signing
    pub region: String,
}

impl StorageConfig {
    const DEFAULT_REGION: &'static str = "us-east-1";

    pub fn from_env() -> Result<Self> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Error loading .env file: {}", e);
            }
        }

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the config from any variable source
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).unwrap_or_default();

        let use_tls = match lookup("STORAGE_USE_TLS").filter(|s| !s.is_empty()) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                StorageError::Configuration(format!(
                    "STORAGE_USE_TLS must be a boolean, got {:?}",
                    raw
                ))
            })?,
            None => false,
        };

        let region = lookup("STORAGE_REGION")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_REGION.to_string());

        Ok(Self {
            access_key: var("STORAGE_ACCESS_KEY"),
            secret_key: var("STORAGE_SECRET_ACCESS_KEY"),
            endpoint: var("STORAGE_ENDPOINT"),
            bucket_name: var("STORAGE_BUCKET_NAME"),
            base_path: var("STORAGE_BASE_PATH"),
            use_tls,
            region,
        })
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .field("endpoint", &self.endpoint)
            .field("bucket_name", &self.bucket_name)
            .field("base_path", &self.base_path)
            .field("use_tls", &self.use_tls)
            .field("region", &self.region)
            .finish()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_reads_storage_variables() {
        let config = StorageConfig::from_vars(lookup_from(&[
            ("STORAGE_ACCESS_KEY", "AKIA123"),
            ("STORAGE_SECRET_ACCESS_KEY", "s3cr3t"),
            ("STORAGE_ENDPOINT", "nyc3.digitaloceanspaces.com"),
            ("STORAGE_BUCKET_NAME", "mybucket"),
            ("STORAGE_BASE_PATH", "cdn.example.com"),
        ]))
        .unwrap();

        assert_eq!(config.access_key, "AKIA123");
        assert_eq!(config.secret_key, "s3cr3t");
        assert_eq!(config.endpoint, "nyc3.digitaloceanspaces.com");
        assert_eq!(config.bucket_name, "mybucket");
        assert_eq!(config.base_path, "cdn.example.com");
        assert!(!config.use_tls);
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_missing_variables_become_empty() {
        let config = StorageConfig::from_vars(|_| None).unwrap();

        assert_eq!(config.access_key, "");
        assert_eq!(config.secret_key, "");
        assert_eq!(config.endpoint, "");
        assert_eq!(config.bucket_name, "");
        assert_eq!(config.base_path, "");
    }

    #[test]
    fn test_use_tls_and_region() {
        let config = StorageConfig::from_vars(lookup_from(&[
            ("STORAGE_USE_TLS", "TRUE"),
            ("STORAGE_REGION", "ap-southeast-1"),
        ]))
        .unwrap();

        assert!(config.use_tls);
        assert_eq!(config.region, "ap-southeast-1");
    }

    #[test]
    fn test_invalid_use_tls_is_configuration_error() {
        let err = StorageConfig::from_vars(lookup_from(&[("STORAGE_USE_TLS", "maybe")]))
            .unwrap_err();

        assert!(matches!(err, StorageError::Configuration(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StorageConfig::from_vars(lookup_from(&[(
            "STORAGE_SECRET_ACCESS_KEY",
            "do-not-print",
        )]))
        .unwrap();

        let printed = format!("{:?}", config);
        assert!(!printed.contains("do-not-print"));
        assert!(printed.contains("***"));
    }
}
