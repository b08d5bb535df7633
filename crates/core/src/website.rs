//! Static website hosting configuration

use serde::{Deserialize, Serialize};

/// Document served for directory requests
pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

/// Document served for errors
pub const DEFAULT_ERROR_DOCUMENT: &str = "error.html";

/// Index and error documents of a website bucket.
///
/// Both documents are required; a configuration with only one of them
/// cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteConfiguration {
    index_document: String,
    error_document: String,
}

impl WebsiteConfiguration {
    pub fn new(index_document: impl Into<String>, error_document: impl Into<String>) -> Self {
        Self {
            index_document: index_document.into(),
            error_document: error_document.into(),
        }
    }

    pub fn index_document(&self) -> &str {
        &self.index_document
    }

    pub fn error_document(&self) -> &str {
        &self.error_document
    }
}

impl Default for WebsiteConfiguration {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_DOCUMENT, DEFAULT_ERROR_DOCUMENT)
    }
}
