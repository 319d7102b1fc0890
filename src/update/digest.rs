//! Archive digests for selected releases
//!
//! A digest is only recomputed when a package is new or its version changed;
//! otherwise the stored digest is carried forward untouched.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::catalog::{Candidate, Catalog};
use crate::registry::Registry;

/// Lowercase hex SHA-256 of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Attach a digest to every candidate
///
/// Candidates whose archive cannot be downloaded are logged and left out, so
/// the previous entry (if any) stays in effect for this run.
pub async fn resolve_digests(
    old: &Catalog,
    candidates: BTreeMap<String, Candidate>,
    registry: &dyn Registry,
) -> Catalog {
    let mut resolved = Catalog::new();

    for (id, candidate) in candidates {
        match old.get(&id) {
            Some(previous) if previous.version == candidate.version => {
                debug!("{} ({}) unchanged, keeping digest", id, candidate.version);
                let sha256 = previous.sha256.clone();
                resolved.insert(id, candidate.into_entry(sha256));
                continue;
            }
            Some(previous) => info!(
                "Package was updated ({} -> {}) -> prefetching {} from {}",
                previous.version, candidate.version, id, candidate.url
            ),
            None => info!(
                "New package found -> prefetching {} ({}) from {}",
                id, candidate.version, candidate.url
            ),
        }

        match registry.fetch_archive(&candidate.url).await {
            Ok(bytes) => {
                let sha256 = sha256_hex(&bytes);
                debug!("{} ({}) sha256 {}", id, candidate.version, sha256);
                resolved.insert(id, candidate.into_entry(sha256));
            }
            Err(e) => {
                warn!(
                    "Prefetch failed for {} ({}) at {}, skipping this run: {}",
                    id, candidate.version, candidate.url, e
                );
            }
        }
    }

    resolved
}
