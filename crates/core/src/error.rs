//! Error types for bs-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for bs-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bs-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bucket creation rejected for a reason other than "already owned by you"
    #[error("Bucket creation failed: {0}")]
    BucketCreation(String),

    /// Bucket policy rejected by the provider
    #[error("Policy error: {0}")]
    Policy(String),

    /// Website configuration rejected by the provider
    #[error("Website configuration error: {0}")]
    Configuration(String),

    /// Remote resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Local sync root is missing or not a directory
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// A local file name cannot be used as an object key
    #[error("File name is not valid UTF-8: {0}")]
    InvalidFileName(String),

    /// A local file or directory under the sync root could not be read
    #[error("Cannot read '{path}': {source}")]
    LocalIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An upload failed during sync
    #[error("Sync failed at '{key}': {source}")]
    Sync {
        key: String,
        #[source]
        source: Box<Error>,
    },

    /// Transport, auth or throttling failure reported by the provider
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration file error
    #[error("Configuration file error: {0}")]
    Config(String),

    /// Named profile is not configured
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Attach the local path to an IO error raised while walking a tree
    pub fn local_io(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::LocalIo {
            path: path.display().to_string(),
            source,
        }
    }

    /// Wrap a failed upload with the key it was writing
    pub fn sync(key: impl Into<String>, source: Error) -> Self {
        Error::Sync {
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::PathNotFound(_)
            | Error::InvalidFileName(_)
            | Error::LocalIo { .. }
            | Error::Config(_) => 2, // UsageError
            Error::Provider(_) => 3,                        // NetworkError
            Error::NotFound(_) | Error::ProfileNotFound(_) => 5, // NotFound
            Error::BucketCreation(_) => 6,                  // Conflict
            Error::Sync { source, .. } => source.exit_code(),
            _ => 1, // GeneralError
        }
    }
}
