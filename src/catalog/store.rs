//! File-backed catalog storage
//!
//! Each category owns `<dir>/<category>.json` and `<dir>/<category>.log`.
//! Both files are replaced via temporary files in the same directory, so a
//! reader never observes a partially written file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::catalog::changelog::{self, Change};
use crate::catalog::error::CatalogError;
use crate::catalog::{Catalog, Category};

pub struct CatalogStore {
    dir: PathBuf,
}

impl CatalogStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn catalog_path(&self, category: Category) -> PathBuf {
        self.dir.join(format!("{}.json", category))
    }

    pub fn log_path(&self, category: Category) -> PathBuf {
        self.dir.join(format!("{}.log", category))
    }

    /// Load the persisted catalog, treating a missing or blank file as empty
    pub fn load(&self, category: Category) -> Result<Catalog, CatalogError> {
        let path = self.catalog_path(category);
        info!("Loading {:?}", path);

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{:?} does not exist yet, starting from an empty catalog", path);
                return Ok(Catalog::new());
            }
            Err(source) => return Err(CatalogError::Read { path, source }),
        };

        if contents.trim().is_empty() {
            return Ok(Catalog::new());
        }

        let catalog: Catalog = serde_json::from_str(&contents)
            .map_err(|source| CatalogError::Parse { path: path.clone(), source })?;
        info!("Loaded {} entries from {:?}", catalog.len(), path);

        Ok(catalog)
    }

    /// Replace the catalog and change log of a category
    ///
    /// Both temporary files are fully written before either is renamed into
    /// place; the catalog is renamed first.
    pub fn commit(
        &self,
        category: Category,
        catalog: &Catalog,
        changes: &[Change],
    ) -> Result<(), CatalogError> {
        let catalog_path = self.catalog_path(category);
        let log_path = self.log_path(category);

        let mut json = serde_json::to_string_pretty(catalog).map_err(|source| {
            CatalogError::Serialize {
                path: catalog_path.clone(),
                source,
            }
        })?;
        json.push('\n');

        let catalog_tmp = self.write_temp(&catalog_path, &json)?;
        let log_tmp = self.write_temp(&log_path, &changelog::render(changes))?;

        persist(catalog_tmp, &catalog_path)?;
        info!("Replaced {:?} ({} entries)", catalog_path, catalog.len());
        persist(log_tmp, &log_path)?;
        info!("Replaced {:?} ({} changes)", log_path, changes.len());

        Ok(())
    }

    fn write_temp(&self, target: &Path, contents: &str) -> Result<NamedTempFile, CatalogError> {
        let write_err = |source| CatalogError::Write {
            path: target.to_path_buf(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;

        let prefix = format!(
            ".{}-",
            target
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        );
        let mut tmp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(&self.dir)
            .map_err(write_err)?;
        debug!("Writing {:?}", tmp.path());

        tmp.write_all(contents.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        set_readable(&tmp).map_err(write_err)?;

        Ok(tmp)
    }
}

fn persist(tmp: NamedTempFile, target: &Path) -> Result<(), CatalogError> {
    tmp.persist(target)
        .map(|_| ())
        .map_err(|e| CatalogError::Write {
            path: target.to_path_buf(),
            source: e.error,
        })
}

/// Temporary files are created owner-only; published files are world readable
#[cfg(unix)]
fn set_readable(tmp: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_readable(_tmp: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
