//! Wire data model shared with the browser UI
//!
//! Field names are part of the contract with the frontend and must stay snake_case.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::{BucketInfo, ObjectInfo};

/// Display format used for bucket creation dates and object modification times
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp the way the UI displays it (UTC)
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.strftime(TIMESTAMP_FORMAT).to_string()
}

/// Parameters for connecting to an S3-compatible endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionCredentials {
    /// Endpoint host or URL
    pub endpoint: String,

    /// Access key ID
    pub access_key: String,

    /// Secret access key
    pub secret_key: String,

    /// Region
    pub region: String,

    /// Use https when the endpoint has no scheme
    #[serde(default)]
    pub use_ssl: bool,
}

impl ConnectionCredentials {
    /// Create credentials with TLS disabled
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
            use_ssl: false,
        }
    }

    /// Check that every required field is present
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("endpoint", &self.endpoint),
            ("access_key", &self.access_key),
            ("secret_key", &self.secret_key),
            ("region", &self.region),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Endpoint with a scheme, chosen from `use_ssl` when the user gave a bare host
    pub fn normalized_endpoint(&self) -> Result<String> {
        let endpoint = self.endpoint.trim();
        let endpoint = if endpoint.starts_with("http") {
            endpoint.to_string()
        } else if self.use_ssl {
            format!("https://{endpoint}")
        } else {
            format!("http://{endpoint}")
        };

        url::Url::parse(&endpoint)?;
        Ok(endpoint)
    }

    /// Access key shortened for log output
    pub fn masked_access_key(&self) -> String {
        if self.access_key.chars().count() > 4 {
            let prefix: String = self.access_key.chars().take(4).collect();
            format!("{prefix}...")
        } else {
            "...".to_string()
        }
    }
}

/// Result of a connection attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl ConnectionTestResponse {
    pub fn connected(session_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Connection successful".to_string(),
            session_id: Some(session_id.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            session_id: None,
        }
    }
}

/// Whether the browser holds a live session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub has_session: bool,
}

/// Bucket listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketEntry {
    pub name: String,
    pub creation_date: String,
}

impl BucketEntry {
    /// Convert a bucket, skipping buckets the backend reported without a creation date
    pub fn from_info(info: &BucketInfo) -> Option<Self> {
        if info.name.is_empty() {
            return None;
        }
        let created = info.created?;
        Some(Self {
            name: info.name.clone(),
            creation_date: format_timestamp(created),
        })
    }
}

/// Object listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    pub key: String,
    pub size: i64,
    pub etag: String,
    pub storage_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl From<&ObjectInfo> for ObjectEntry {
    fn from(info: &ObjectInfo) -> Self {
        Self {
            key: info.key.clone(),
            size: info.size_bytes,
            etag: info.etag.clone().unwrap_or_default(),
            storage_class: info.storage_class.clone().unwrap_or_default(),
            last_modified: info.last_modified.map(format_timestamp),
        }
    }
}

/// Response body for a successful upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub message: String,
    pub bucket: String,
    pub key: String,
}

impl UploadReceipt {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            message: "Object uploaded successfully".to_string(),
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

/// Response body carrying a presigned download URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrl {
    pub url: String,
}

/// Response body for logout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutReceipt {
    pub message: String,
}

impl Default for LogoutReceipt {
    fn default() -> Self {
        Self {
            message: "Logged out successfully".to_string(),
        }
    }
}
