//! Update cycle of the catalogs
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│   Select    │────▶│   Digest    │────▶│    Merge    │
//! │  (listing)  │     │(requirement)│     │  (sha256)   │     │   + store   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! Categories are processed one after the other; each one loads its catalog,
//! computes this run's entries and replaces its files before the next starts.

pub mod digest;
pub mod error;
pub mod select;

use tracing::info;

use crate::catalog::{Catalog, CatalogStore, Category, Change, changes, merge};
use crate::config::Config;
use crate::registry::Registry;

pub use digest::{resolve_digests, sha256_hex};
pub use error::UpdateError;
pub use select::{Selection, select_candidates};

/// Result of one category's cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: Category,
    pub changes: Vec<Change>,
    pub catalog: Catalog,
}

/// Run the full cycle for one category
pub async fn update_category(
    category: Category,
    config: &Config,
    registry: &dyn Registry,
    store: &CatalogStore,
) -> Result<CategoryReport, UpdateError> {
    info!("Starting to process {}", category);

    let packages = registry
        .fetch_listing(category)
        .await
        .map_err(|source| UpdateError::Listing { category, source })?;
    let old = store.load(category)?;

    let selection = select_candidates(&packages, &config.host_version, &config.base_url)?;
    info!(
        "{} of {} {} are compatible with {}",
        selection.candidates.len(),
        packages.len(),
        category,
        config.host_version
    );

    let new = resolve_digests(&old, selection.candidates, registry).await;
    let merged = merge(&old, &new, config.retention, &selection.listed);
    let changes = changes(&old, &new);

    store.commit(category, &merged, &changes)?;
    info!("Finished processing {} ({} changes)", category, changes.len());

    Ok(CategoryReport {
        category,
        changes,
        catalog: merged,
    })
}

/// Process every configured category in order, stopping at the first fatal error
pub async fn run(
    config: &Config,
    registry: &dyn Registry,
    store: &CatalogStore,
) -> Result<Vec<CategoryReport>, UpdateError> {
    let mut reports = Vec::with_capacity(config.categories.len());
    for &category in &config.categories {
        reports.push(update_category(category, config, registry, store).await?);
    }
    Ok(reports)
}

/// Commit message body listing the changes of a run
pub fn commit_message(reports: &[CategoryReport]) -> String {
    let mut message = String::new();
    for report in reports {
        if report.changes.is_empty() {
            message.push_str(&format!("{}: no changes\n", report.category));
        }
        for change in &report.changes {
            message.push_str(&format!("{}: {}\n", report.category, change));
        }
    }
    message
}
