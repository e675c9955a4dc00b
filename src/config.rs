// src/config.rs

//! Repository configuration
//!
//! Configured sources live in a small JSON document (`repos.json`): an
//! array of entries carrying a name, base URL, index format type, and an
//! enabled flag. A missing file yields the built-in default source; a file
//! that exists but does not parse is an error (silently ignoring a broken
//! config would hide every repository).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

const DEFAULT_REPO_NAME: &str = "Open Shop Channel";
const DEFAULT_REPO_URL: &str = "https://hbb1.oscwii.org";
const DEFAULT_REPO_TYPE: &str = "osc";

/// One configured repository source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    pub url: String,
    /// Index format identifier, matching a loader's `repo_type()`.
    #[serde(rename = "type", default = "default_type")]
    pub repo_type: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_type() -> String {
    DEFAULT_REPO_TYPE.to_string()
}

fn default_enabled() -> bool {
    true
}

/// The full configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub repos: Vec<RepoEntry>,
}

impl Config {
    /// Configuration used when no file is present: the single default
    /// source, enabled.
    pub fn default_sources() -> Self {
        Self {
            repos: vec![RepoEntry {
                name: DEFAULT_REPO_NAME.to_string(),
                url: DEFAULT_REPO_URL.to_string(),
                repo_type: DEFAULT_REPO_TYPE.to_string(),
                enabled: true,
            }],
        }
    }

    /// Load configuration from `path`, falling back to
    /// [`Config::default_sources`] when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "No repository config at {}, using default sources",
                path.display()
            );
            return Ok(Self::default_sources());
        }

        let data = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&data).map_err(|e| {
            Error::Config(format!("Invalid repository config {}: {e}", path.display()))
        })?;

        debug!(
            "Loaded {} repository entries from {}",
            config.repos.len(),
            path.display()
        );
        Ok(config)
    }

    /// Persist configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Entries that should actually be loaded.
    pub fn enabled(&self) -> impl Iterator<Item = &RepoEntry> {
        self.repos.iter().filter(|entry| entry.enabled)
    }
}
