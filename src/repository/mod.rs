// src/repository/mod.rs

//! Repository abstraction and loading protocol
//!
//! A `Repository` is one configured remote source of installable packages.
//! Each index format implements the trait once; callers hold
//! `Box<dyn Repository>` and stay format-agnostic, driving loads through
//! the shared contract and interpreting packages only through
//! `zip_url`/`icon_url`. New formats are added by implementing one new
//! variant, with no change to callers.

mod osc;

pub use osc::OscRepo;

use crate::config::{Config, RepoEntry};
use crate::package::Package;
use crate::progress::ProgressReporter;
use crate::transport::Transport;
use tracing::{info, warn};

/// Contract every index format implements.
///
/// `load_packages` never propagates an error: network and format problems
/// degrade to an empty result with `is_loaded() == false` and a logged
/// diagnostic. The caller owns the returned records; the repository keeps
/// none of them.
pub trait Repository {
    /// Display name of this source.
    fn name(&self) -> &str;

    /// Base URL. A load may rewrite this in place (scheme fallback).
    fn url(&self) -> &str;

    /// Whether the most recent load fully succeeded.
    fn is_loaded(&self) -> bool;

    /// Stable identifier for the index format (e.g. "osc").
    fn repo_type(&self) -> &'static str;

    /// Fetch and parse the remote index into package records.
    ///
    /// Blocks until the fetch (including any fallback retry) and the full
    /// parse complete. May be called repeatedly; each call re-fetches and
    /// rebuilds the catalog from scratch.
    fn load_packages(
        &mut self,
        transport: &dyn Transport,
        progress: &dyn ProgressReporter,
    ) -> Vec<Package>;

    /// Artifact URL for a package produced by this repository.
    fn zip_url(&self, package: &Package) -> String;

    /// Icon URL for a package, empty when it has none.
    fn icon_url(&self, package: &Package) -> String;
}

/// Construct the repository variant matching a config entry's type.
///
/// Unknown types yield `None` with a diagnostic so the rest of the config
/// stays usable.
pub fn make_repository(entry: &RepoEntry) -> Option<Box<dyn Repository>> {
    match entry.repo_type.as_str() {
        osc::TYPE_OSC => Some(Box::new(OscRepo::new(
            entry.name.clone(),
            entry.url.clone(),
        ))),
        other => {
            warn!(
                "Unknown repository type \"{}\" for \"{}\", skipping",
                other, entry.name
            );
            None
        }
    }
}

/// Build repository instances for every enabled entry in a config.
pub fn from_config(config: &Config) -> Vec<Box<dyn Repository>> {
    config.enabled().filter_map(make_repository).collect()
}

/// Load every repository in sequence and concatenate the catalogs.
///
/// Repositories that fail contribute nothing; their `loaded` flag records
/// the failure.
pub fn load_all(
    repos: &mut [Box<dyn Repository>],
    transport: &dyn Transport,
    progress: &dyn ProgressReporter,
) -> Vec<Package> {
    let mut catalog = Vec::new();
    for repo in repos.iter_mut() {
        let packages = repo.load_packages(transport, progress);
        info!(
            "Loaded {} packages from \"{}\" ({})",
            packages.len(),
            repo.name(),
            repo.repo_type()
        );
        catalog.extend(packages);
    }
    catalog
}
