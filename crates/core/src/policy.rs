//! Bucket policy documents
//!
//! A website bucket carries a single statement granting anonymous
//! `s3:GetObject` on every object. The policy is always written whole;
//! there is no merging with an existing document.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Policy language version understood by S3
pub const POLICY_VERSION: &str = "2012-10-17";

/// A bucket policy document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketPolicy {
    pub version: String,
    pub statement: Vec<PolicyStatement>,
}

/// A single policy statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub sid: String,
    pub effect: String,
    pub principal: String,
    pub action: String,
    pub resource: Vec<String>,
}

impl BucketPolicy {
    /// Public read access to every object in `bucket`
    pub fn public_read(bucket: &str) -> Self {
        Self {
            version: POLICY_VERSION.to_string(),
            statement: vec![PolicyStatement {
                sid: "PublicReadGetObject".to_string(),
                effect: "Allow".to_string(),
                principal: "*".to_string(),
                action: "s3:GetObject".to_string(),
                resource: vec![object_wildcard_arn(bucket)],
            }],
        }
    }

    /// Serialize to the compact JSON sent to the provider
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to indented JSON for display
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// ARN matching every object in `bucket`
pub fn object_wildcard_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}/*")
}
