//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the object storage facade and its S3-compatible client.

pub mod storage;
