//! Credential profiles and session resolution
//!
//! A profile is a named set of connection settings stored in the config
//! file. `--profile NAME` picks a stored profile when one exists and falls
//! back to the AWS shared config/credentials profile of the same name.

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigManager};
use crate::error::{Error, Result};

/// A named credential profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique name for this profile
    pub name: String,

    /// Region override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Custom S3 endpoint URL (S3-compatible services)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Access key ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Secret access key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,

    /// Use path-style bucket addressing
    #[serde(default)]
    pub path_style: bool,
}

impl Profile {
    /// Create an empty profile with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: None,
            endpoint: None,
            access_key: None,
            secret_key: None,
            path_style: false,
        }
    }

    /// Check that the profile is usable
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Config("Profile name cannot be empty".into()));
        }

        if let Some(endpoint) = &self.endpoint {
            url::Url::parse(endpoint)
                .map_err(|e| Error::Config(format!("Invalid endpoint '{endpoint}': {e}")))?;
        }

        if self.access_key.is_some() != self.secret_key.is_some() {
            return Err(Error::Config(
                "Access key and secret key must be given together".into(),
            ));
        }

        Ok(())
    }
}

/// Static credentials taken from a stored profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key: String,
    pub secret_key: String,
}

/// Everything needed to build a storage client. Built once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Region buckets are created in
    pub region: String,

    /// AWS shared-config profile to load credentials from
    pub shared_profile: Option<String>,

    /// Custom endpoint URL
    pub endpoint: Option<String>,

    /// Credentials from a stored profile
    pub credentials: Option<StaticCredentials>,

    /// Use path-style bucket addressing
    pub path_style: bool,
}

impl Session {
    /// Resolve the session for `profile` against the loaded configuration.
    ///
    /// Region precedence: `region` argument, stored profile region, config
    /// default.
    pub fn resolve(config: &Config, profile: Option<&str>, region: Option<&str>) -> Self {
        let stored = profile.and_then(|name| config.profiles.iter().find(|p| p.name == name));

        let region = region
            .map(str::to_string)
            .or_else(|| stored.and_then(|p| p.region.clone()))
            .unwrap_or_else(|| config.defaults.region.clone());

        match stored {
            Some(p) => Self {
                region,
                shared_profile: None,
                endpoint: p.endpoint.clone(),
                credentials: match (&p.access_key, &p.secret_key) {
                    (Some(access_key), Some(secret_key)) => Some(StaticCredentials {
                        access_key: access_key.clone(),
                        secret_key: secret_key.clone(),
                    }),
                    _ => None,
                },
                path_style: p.path_style,
            },
            None => Self {
                region,
                shared_profile: profile.map(str::to_string),
                endpoint: None,
                credentials: None,
                path_style: false,
            },
        }
    }
}

/// Manager for stored profiles
pub struct ProfileManager {
    config_manager: ConfigManager,
}

impl ProfileManager {
    /// Create a new ProfileManager with a specific ConfigManager
    pub fn with_config_manager(config_manager: ConfigManager) -> Self {
        Self { config_manager }
    }

    /// Create a new ProfileManager using the default config location
    pub fn new() -> Result<Self> {
        let config_manager = ConfigManager::new()?;
        Ok(Self { config_manager })
    }

    /// List all stored profiles
    pub fn list(&self) -> Result<Vec<Profile>> {
        Ok(self.config_manager.load()?.profiles)
    }

    /// Get a profile by name
    pub fn get(&self, name: &str) -> Result<Profile> {
        self.config_manager
            .load()?
            .profiles
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))
    }

    /// Add or replace a profile
    pub fn set(&self, profile: Profile) -> Result<()> {
        profile.validate()?;

        let mut config = self.config_manager.load()?;
        config.profiles.retain(|p| p.name != profile.name);
        config.profiles.push(profile);

        self.config_manager.save(&config)
    }

    /// Remove a profile
    pub fn remove(&self, name: &str) -> Result<()> {
        let mut config = self.config_manager.load()?;
        let original_len = config.profiles.len();

        config.profiles.retain(|p| p.name != name);

        if config.profiles.len() == original_len {
            return Err(Error::ProfileNotFound(name.to_string()));
        }

        self.config_manager.save(&config)
    }
}
