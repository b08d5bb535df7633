//! StorageClient trait definition
//!
//! This trait defines the primitive bucket operations the Bucket Manager
//! consumes. It keeps the core decoupled from the specific S3 SDK.

use std::path::Path;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::website::WebsiteConfiguration;

/// Reference to a bucket owned by the session's account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRef {
    /// Bucket name
    pub name: String,

    /// Creation date, when known from a listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
}

impl BucketRef {
    /// Create a reference from a bucket name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created: None,
        }
    }
}

impl std::fmt::Display for BucketRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Summary of an object stored in a bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: u64,

    /// Human-readable size
    pub size_human: String,

    /// ETag (usually MD5 for single-part uploads)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,
}

impl ObjectSummary {
    /// Create a new summary for a key of the given size
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size_bytes: size,
            size_human: humansize::format_size(size, humansize::BINARY),
            etag: None,
            last_modified: None,
        }
    }
}

/// One page of an object listing
#[derive(Debug, Clone, Default)]
pub struct ObjectPage {
    /// Objects in this page
    pub objects: Vec<ObjectSummary>,

    /// Token for the next page, `None` on the last page
    pub next_token: Option<String>,
}

/// Outcome of a bucket creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateBucketOutcome {
    /// The bucket was created by this call
    Created,

    /// The bucket already exists and belongs to the calling account
    AlreadyOwned,

    /// The provider refused to create the bucket
    Failed(String),
}

/// Trait for the cloud storage operations used by the Bucket Manager
///
/// Implemented by the S3 adapter and by in-memory doubles in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Create a bucket in the given region
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<CreateBucketOutcome>;

    /// List buckets owned by the account
    async fn list_buckets(&self) -> Result<Vec<BucketRef>>;

    /// List one page of objects, starting after `continuation_token`
    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage>;

    /// Replace the bucket policy with the given JSON document
    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<()>;

    /// Get the current bucket policy, if one is set
    async fn get_bucket_policy(&self, bucket: &str) -> Result<Option<String>>;

    /// Replace the bucket website configuration
    async fn put_bucket_website(&self, bucket: &str, website: &WebsiteConfiguration)
    -> Result<()>;

    /// Get the current website configuration, if one is set
    async fn get_bucket_website(&self, bucket: &str) -> Result<Option<WebsiteConfiguration>>;

    /// Upload a local file under `key`, returning the number of bytes sent
    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<u64>;
}
