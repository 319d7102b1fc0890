//! Marketplace API implementation

use tracing::{debug, info, warn};

use crate::catalog::Category;
use crate::config::API_PATH;
use crate::registry::Registry;
use crate::registry::error::RegistryError;
use crate::registry::types::{ApiPackage, ListingResponse};

/// Registry implementation for the marketplace HTTP API
pub struct MarketplaceRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl MarketplaceRegistry {
    /// Creates a registry talking to `base_url` (no trailing slash)
    pub fn new(base_url: &str) -> Result<Self, RegistryError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("catalog-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn listing_url(&self, category: Category) -> String {
        format!("{}{}{}", self.base_url, API_PATH, category.as_str())
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, RegistryError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Marketplace returned status {}: {}", status, url);
            return Err(RegistryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl Registry for MarketplaceRegistry {
    async fn fetch_listing(&self, category: Category) -> Result<Vec<ApiPackage>, RegistryError> {
        let url = self.listing_url(category);
        info!("Querying marketplace at {}", url);

        let response = self.get(&url).await?;
        let listing: ListingResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse marketplace response: {}", e);
            RegistryError::InvalidResponse {
                url: url.clone(),
                message: e.to_string(),
            }
        })?;

        debug!("Found {} {} in listing", listing.plugins.len(), category);
        Ok(listing.plugins)
    }

    async fn fetch_archive(&self, url: &str) -> Result<Vec<u8>, RegistryError> {
        debug!("Downloading {}", url);

        let response = self.get(url).await?;
        let body = response.bytes().await?;

        Ok(body.to_vec())
    }
}
