//! ObjectStore trait definition
//!
//! This trait defines the interface for S3-compatible storage operations.
//! It allows the server to be decoupled from the specific S3 SDK implementation.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::ConnectionCredentials;

/// Metadata for a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name
    pub name: String,

    /// Creation timestamp
    pub created: Option<Timestamp>,
}

/// Metadata for an object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Last modified timestamp
    pub last_modified: Option<Timestamp>,

    /// ETag without surrounding quotes
    pub etag: Option<String>,

    /// Storage class
    pub storage_class: Option<String>,

    /// Content type
    pub content_type: Option<String>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo with only key and size known
    pub fn new(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            last_modified: None,
            etag: None,
            storage_class: None,
            content_type: None,
        }
    }
}

/// Result of a list operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResult {
    /// Listed objects
    pub items: Vec<ObjectInfo>,

    /// Whether the result is truncated (more items available)
    pub truncated: bool,

    /// Continuation token for pagination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

/// Options for list operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of keys to return per request
    pub max_keys: Option<i32>,

    /// Delimiter for grouping
    pub delimiter: Option<String>,

    /// Prefix to filter by
    pub prefix: Option<String>,

    /// Continuation token for pagination
    pub continuation_token: Option<String>,
}

/// Downloaded object content
#[derive(Debug, Clone, Default)]
pub struct ObjectBody {
    /// Object bytes
    pub data: Vec<u8>,

    /// Content type reported by the backend
    pub content_type: Option<String>,

    /// Content length reported by the backend
    pub content_length: Option<i64>,
}

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List buckets
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>>;

    /// Create a bucket
    async fn create_bucket(&self, bucket: &str) -> Result<()>;

    /// Delete a bucket
    async fn delete_bucket(&self, bucket: &str) -> Result<()>;

    /// List one page of objects in a bucket
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult>;

    /// Get object content
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectBody>;

    /// Upload an object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo>;

    /// Delete an object
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// Generate a presigned GET URL that forces the response content type
    async fn presigned_get_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        expires: Duration,
    ) -> Result<String>;
}

/// Builds an [`ObjectStore`] from browser-supplied credentials
///
/// Building a store must not touch the network; callers test the
/// connection themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self, credentials: &ConnectionCredentials) -> Result<Arc<dyn ObjectStore>>;
}

/// List every object under `prefix`, following continuation tokens
pub async fn list_all_objects(
    store: &dyn ObjectStore,
    bucket: &str,
    prefix: Option<String>,
) -> Result<Vec<ObjectInfo>> {
    let mut items = Vec::new();
    let mut options = ListOptions {
        prefix,
        ..Default::default()
    };

    loop {
        let page = store.list_objects(bucket, options.clone()).await?;
        items.extend(page.items);

        match page.continuation_token {
            Some(token) if page.truncated => options.continuation_token = Some(token),
            _ => break,
        }
    }

    Ok(items)
}
