//! Change log of a single update run

use std::fmt;

use crate::catalog::Catalog;

/// A package that was added or moved to another version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added {
        id: String,
        version: String,
    },
    Updated {
        id: String,
        from: String,
        to: String,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Added { id, version } => write!(f, "ADD {} {}", id, version),
            Change::Updated { id, from, to } => write!(f, "UPD {} {} -> {}", id, from, to),
        }
    }
}

/// Diff the previous catalog against the entries produced by this run
///
/// Unchanged packages and packages only present in `old` produce nothing.
pub fn changes(old: &Catalog, new: &Catalog) -> Vec<Change> {
    new.iter()
        .filter_map(|(id, entry)| match old.get(id) {
            None => Some(Change::Added {
                id: id.clone(),
                version: entry.version.clone(),
            }),
            Some(previous) if previous.version != entry.version => Some(Change::Updated {
                id: id.clone(),
                from: previous.version.clone(),
                to: entry.version.clone(),
            }),
            Some(_) => None,
        })
        .collect()
}

/// Render changes as log file contents, one newline-terminated line each
pub fn render(changes: &[Change]) -> String {
    changes.iter().map(|c| format!("{}\n", c)).collect()
}
