//! Selection of the current release of every listed package

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, info_span};

use crate::catalog::Candidate;
use crate::registry::{ApiPackage, ApiPackageVersion};
use crate::update::error::UpdateError;
use crate::version::{Requirements, Version, is_compatible};

/// Outcome of scanning one listing
#[derive(Debug, Default)]
pub struct Selection {
    /// Package id -> selected release
    pub candidates: BTreeMap<String, Candidate>,
    /// Every package id the listing returned
    pub listed: HashSet<String>,
}

/// Pick a release for each downloadable package
///
/// Releases are evaluated in listing order and the last compatible one is
/// kept. Packages that are not downloadable or have no compatible release are
/// left out.
pub fn select_candidates(
    packages: &[ApiPackage],
    host: &Version,
    base_url: &str,
) -> Result<Selection, UpdateError> {
    let base_url = base_url.trim_end_matches('/');
    let mut selection = Selection::default();

    for package in packages {
        selection.listed.insert(package.name.clone());

        if !package.is_downloadable {
            debug!("Skipping {}: not downloadable", package.name);
            continue;
        }

        let mut selected = None;
        for release in &package.versions {
            if release_is_compatible(package, release, host)? {
                selected = Some(Candidate {
                    url: format!("{}{}", base_url, release.download),
                    version: release.name.clone(),
                    description: package.description.clone(),
                    homepage: package.homepage.clone(),
                    license: release.license_name(),
                    display_name: package.display_name.clone(),
                });
            }
        }

        let kind = if package.is_theme { "theme" } else { "plugin" };
        match selected {
            Some(candidate) => {
                info!(
                    "Found {} {} ({}) at {}",
                    kind, package.name, candidate.version, candidate.url
                );
                selection.candidates.insert(package.name.clone(), candidate);
            }
            None => debug!("Skipping {} {}: no compatible release", kind, package.name),
        }
    }

    Ok(selection)
}

fn release_is_compatible(
    package: &ApiPackage,
    release: &ApiPackageVersion,
    host: &Version,
) -> Result<bool, UpdateError> {
    let span = info_span!("release", package = %package.name, version = %release.name);
    let _guard = span.enter();

    let requirement_err = |source| UpdateError::Requirement {
        package: package.name.clone(),
        version: release.name.clone(),
        source,
    };

    let requirements = Requirements::try_from(&release.requires).map_err(requirement_err)?;
    let compatible = is_compatible(&requirements, host).map_err(requirement_err)?;
    debug!("compatible: {}", compatible);

    Ok(compatible)
}
