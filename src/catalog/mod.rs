//! Persisted catalog of known-good package releases
//!
//! # Modules
//!
//! - [`changelog`]: `ADD`/`UPD` lines describing one run
//! - [`merge`]: Combining the previous catalog with this run's entries
//! - [`store`]: Loading and atomically replacing catalog and log files
//! - [`error`]: Error types for catalog persistence

pub mod changelog;
pub mod error;
pub mod merge;
pub mod store;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use changelog::{Change, changes};
pub use merge::{Retention, merge};
pub use store::CatalogStore;

/// Kind of extension, each with its own endpoint and files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Plugins,
    Themes,
}

impl Category {
    /// Processing order of a full run
    pub const ALL: [Category; 2] = [Category::Themes, Category::Plugins];

    /// Returns the string representation used in URLs and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Plugins => "plugins",
            Category::Themes => "themes",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plugins" => Ok(Category::Plugins),
            "themes" => Ok(Category::Themes),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One package's current known-good release
///
/// `sha256` always belongs to the archive of `version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub sha256: String,
    pub url: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub license: String,
    #[serde(default)]
    pub display_name: String,
}

/// Package identifier -> entry
pub type Catalog = BTreeMap<String, CatalogEntry>;

/// Selected release that still lacks a digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub version: String,
    pub description: String,
    pub homepage: String,
    pub license: String,
    pub display_name: String,
}

impl Candidate {
    pub fn into_entry(self, sha256: String) -> CatalogEntry {
        CatalogEntry {
            sha256,
            url: self.url,
            version: self.version,
            description: self.description,
            homepage: self.homepage,
            license: self.license,
            display_name: self.display_name,
        }
    }
}
