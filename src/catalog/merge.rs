//! Merge of the previous catalog with the entries produced by a run

use std::collections::HashSet;

use tracing::info;

use crate::catalog::Catalog;

/// What happens to entries whose package left the remote listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Retention {
    /// Stale entries stay in the catalog forever
    #[default]
    KeepForever,
    /// Entries whose id the listing no longer returns are dropped
    Prune,
}

/// Combine `old` and `new`, entries of `new` taking precedence
///
/// `listed` holds every package id returned by the remote listing this run and
/// is only consulted for [`Retention::Prune`].
pub fn merge(old: &Catalog, new: &Catalog, retention: Retention, listed: &HashSet<String>) -> Catalog {
    let mut merged: Catalog = match retention {
        Retention::KeepForever => old.clone(),
        Retention::Prune => old
            .iter()
            .filter(|(id, _)| {
                let keep = listed.contains(*id);
                if !keep {
                    info!("Pruning {}: no longer listed", id);
                }
                keep
            })
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect(),
    };

    merged.extend(new.iter().map(|(id, entry)| (id.clone(), entry.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use rstest::rstest;

    fn entry(version: &str, sha256: &str) -> CatalogEntry {
        CatalogEntry {
            sha256: sha256.to_string(),
            url: format!("https://example.org/{version}.zip"),
            version: version.to_string(),
            description: String::new(),
            homepage: String::new(),
            license: String::new(),
            display_name: String::new(),
        }
    }

    fn listed(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case(Retention::KeepForever)]
    #[case(Retention::Prune)]
    fn merging_a_catalog_with_itself_is_a_no_op(#[case] retention: Retention) {
        let old = Catalog::from([
            ("A".to_string(), entry("1.0", "aa")),
            ("B".to_string(), entry("2.0", "bb")),
        ]);

        let merged = merge(&old, &old, retention, &listed(&["A", "B"]));

        assert_eq!(merged, old);
    }

    #[test]
    fn new_entries_override_old_and_untouched_entries_survive() {
        let old = Catalog::from([
            ("A".to_string(), entry("1.0", "aa")),
            ("Stale".to_string(), entry("0.1", "ss")),
        ]);
        let new = Catalog::from([
            ("A".to_string(), entry("1.1", "a2")),
            ("C".to_string(), entry("3.0", "cc")),
        ]);

        let merged = merge(&old, &new, Retention::KeepForever, &listed(&["A", "C"]));

        assert_eq!(
            merged,
            Catalog::from([
                ("A".to_string(), entry("1.1", "a2")),
                ("C".to_string(), entry("3.0", "cc")),
                ("Stale".to_string(), entry("0.1", "ss")),
            ])
        );
    }

    #[test]
    fn prune_drops_entries_missing_from_listing_only() {
        let old = Catalog::from([
            ("Listed".to_string(), entry("1.0", "ll")),
            ("Stale".to_string(), entry("0.1", "ss")),
        ]);

        let merged = merge(&old, &Catalog::new(), Retention::Prune, &listed(&["Listed"]));

        assert_eq!(
            merged,
            Catalog::from([("Listed".to_string(), entry("1.0", "ll"))])
        );
    }
}
