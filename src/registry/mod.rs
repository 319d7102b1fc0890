//! Marketplace access
//!
//! # Modules
//!
//! - [`marketplace`]: HTTP implementation against the marketplace API
//! - [`types`]: Wire types of the listing response
//! - [`error`]: Error types for registry requests

#[cfg(test)]
use mockall::automock;

pub mod error;
pub mod marketplace;
pub mod types;

pub use error::RegistryError;
pub use marketplace::MarketplaceRegistry;
pub use types::{ApiPackage, ApiPackageVersion};

use crate::catalog::Category;

/// Trait for fetching listings and archives from the marketplace
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches the complete listing of a category
    ///
    /// # Returns
    /// * `Ok(Vec<ApiPackage>)` - Packages in listing order
    /// * `Err(RegistryError)` - If the request or decoding fails
    async fn fetch_listing(&self, category: Category) -> Result<Vec<ApiPackage>, RegistryError>;

    /// Downloads the archive at `url` and returns its bytes
    async fn fetch_archive(&self, url: &str) -> Result<Vec<u8>, RegistryError>;
}
