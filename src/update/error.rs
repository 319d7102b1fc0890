use thiserror::Error;

use crate::catalog::Category;
use crate::catalog::error::CatalogError;
use crate::registry::RegistryError;
use crate::version::error::RequirementError;

/// Conditions that abort the whole run
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("Failed to fetch the {category} listing: {source}")]
    Listing {
        category: Category,
        source: RegistryError,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Unsupported requirements of {package} {version}: {source}")]
    Requirement {
        package: String,
        version: String,
        source: RequirementError,
    },
}
