use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::{Category, Retention};
use crate::version::Version;
use crate::version::error::VersionParseError;

// =============================================================================
// Marketplace
// =============================================================================

/// Default base URL of the marketplace
pub const DEFAULT_BASE_URL: &str = "https://plugins.matomo.org";

/// Path prefix of the listing endpoints, followed by the category
pub const API_PATH: &str = "/api/2.0/";

// =============================================================================
// Environment
// =============================================================================

/// Host release the catalog is curated for (required)
pub const HOST_VERSION_ENV: &str = "MATOMO_VERSION";

/// Presence enables debug logging
pub const DEBUG_ENV: &str = "DEBUG";

/// Presence prints the run's changes as a commit message body
pub const COMMIT_LOG_ENV: &str = "COMMIT_LOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("MATOMO_VERSION needs to be set to the host release, so compatibility can be checked")]
    MissingHostVersion,

    #[error("Invalid MATOMO_VERSION {value:?}: {source}")]
    InvalidHostVersion {
        value: String,
        source: VersionParseError,
    },
}

/// Settings of one run, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub host_version: Version,
    /// Default log level is `debug` instead of `info`
    pub debug: bool,
    pub commit_log: bool,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub retention: Retention,
    pub categories: Vec<Category>,
}

impl Config {
    /// Creates a configuration with defaults for everything but the host version
    pub fn new(host_version: Version) -> Self {
        Self {
            host_version,
            debug: false,
            commit_log: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            output_dir: PathBuf::from("."),
            retention: Retention::default(),
            categories: Category::ALL.to_vec(),
        }
    }

    /// Reads the environment inputs from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| {
            std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
        })
    }

    /// Reads the environment inputs through `lookup`
    ///
    /// `DEBUG` and `COMMIT_LOG` only need to be present; their value is ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(HOST_VERSION_ENV).ok_or(ConfigError::MissingHostVersion)?;
        let host_version =
            Version::parse_strict(&raw).map_err(|source| ConfigError::InvalidHostVersion {
                value: raw.clone(),
                source,
            })?;

        Ok(Self {
            debug: lookup(DEBUG_ENV).is_some(),
            commit_log: lookup(COMMIT_LOG_ENV).is_some(),
            ..Self::new(host_version)
        })
    }
}
