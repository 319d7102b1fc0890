//! Registry test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use catalog_sync::catalog::Category;
use catalog_sync::registry::{ApiPackage, Registry, RegistryError};

pub const BASE_URL: &str = "https://marketplace.test";

/// In-memory registry serving fixed listings and archives
pub struct StubRegistry {
    listings: HashMap<Category, Vec<ApiPackage>>,
    archives: HashMap<String, Vec<u8>>,
    downloads: Mutex<Vec<String>>,
}

impl StubRegistry {
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
            archives: HashMap::new(),
            downloads: Mutex::new(Vec::new()),
        }
    }

    pub fn with_listing(mut self, category: Category, packages: Vec<ApiPackage>) -> Self {
        self.listings.insert(category, packages);
        self
    }

    /// Serve `bytes` for the archive of `name` at `version`
    pub fn with_archive(mut self, name: &str, version: &str, bytes: &[u8]) -> Self {
        self.archives
            .insert(archive_url(name, version), bytes.to_vec());
        self
    }

    /// URLs requested through `fetch_archive`, in request order
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Registry for StubRegistry {
    async fn fetch_listing(&self, category: Category) -> Result<Vec<ApiPackage>, RegistryError> {
        self.listings
            .get(&category)
            .cloned()
            .ok_or_else(|| RegistryError::Status {
                status: 404,
                url: format!("{BASE_URL}/api/2.0/{category}"),
            })
    }

    async fn fetch_archive(&self, url: &str) -> Result<Vec<u8>, RegistryError> {
        self.downloads.lock().unwrap().push(url.to_string());
        self.archives
            .get(url)
            .cloned()
            .ok_or_else(|| RegistryError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

pub fn download_path(name: &str, version: &str) -> String {
    format!("/api/2.0/plugins/{name}/download/{version}")
}

pub fn archive_url(name: &str, version: &str) -> String {
    format!("{BASE_URL}{}", download_path(name, version))
}

/// Downloadable package with the given releases in listing order
pub fn package(name: &str, releases: &[(&str, Value)]) -> ApiPackage {
    let versions: Vec<Value> = releases
        .iter()
        .map(|(version, requires)| {
            json!({
                "name": version,
                "download": download_path(name, version),
                "license": {"name": "GPL v3+"},
                "requires": requires
            })
        })
        .collect();

    serde_json::from_value(json!({
        "name": name,
        "displayName": name,
        "isDownloadable": true,
        "isTheme": false,
        "description": format!("{name} description"),
        "homepage": format!("https://example.org/{name}"),
        "versions": versions
    }))
    .unwrap()
}
