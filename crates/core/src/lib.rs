//! bs-core: Core library for the bucketsite deploy tool
//!
//! This crate provides the core functionality for bucketsite, including:
//! - The Bucket Manager (bucket creation, policy, website hosting, sync)
//! - Content-type resolution for uploaded files
//! - Configuration and credential profile management
//! - The StorageClient trait the S3 adapter implements
//!
//! This crate is independent of any specific S3 SDK so the manager can be
//! tested against in-memory storage.

pub mod bucket;
pub mod config;
pub mod content_type;
pub mod error;
pub mod manager;
pub mod policy;
pub mod profile;
pub mod sync;
pub mod traits;
pub mod website;

pub use bucket::validate_bucket_name;
pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use manager::{BucketManager, BucketSetup};
pub use policy::BucketPolicy;
pub use profile::{Profile, ProfileManager, Session, StaticCredentials};
pub use sync::{SyncReport, SyncUnit};
pub use traits::{BucketRef, CreateBucketOutcome, ObjectPage, ObjectSummary, StorageClient};
pub use website::WebsiteConfiguration;
