// src/package.rs

//! Canonical package records
//!
//! A `Package` is the format-independent description of one installable
//! artifact, produced by a repository loader and handed to the download
//! pipeline. Loaders fill in whatever their index advertises; everything
//! except the package name is optional.

use serde::{Deserialize, Serialize};

/// Operation requested for a package record.
///
/// Catalog fetches produce `Get` records. `Uninstall` marks locally-derived
/// removal records so the downstream pipeline can dispatch on the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    Get,
    Uninstall,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Uninstall => write!(f, "uninstall"),
        }
    }
}

/// One advertised installable artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    /// Stable unique identifier within the repository. Never empty for a
    /// package that survives parsing.
    pub pkg_name: String,
    /// Display name; falls back to `pkg_name` when the index has none.
    pub title: String,
    /// Requested operation for downstream dispatch.
    pub operation: Operation,
    pub author: Option<String>,
    pub category: Option<String>,
    pub short_desc: Option<String>,
    pub long_desc: Option<String>,
    /// Opaque version string, no ordering semantics.
    pub version: Option<String>,
    /// Release time rendered as `YYYY-MM-DD HH:MM:SS` in the local zone.
    /// Set together with `updated_timestamp` or not at all.
    pub updated: Option<String>,
    /// Release time in Unix seconds.
    pub updated_timestamp: Option<i64>,
    /// Compressed artifact size in bytes. Accumulates across mentions.
    pub download_size: u64,
    /// Installed size in bytes. Accumulates across mentions.
    pub extracted_size: u64,
    /// Artifact location; interpretation is format-specific.
    pub url: Option<String>,
    /// Icon location, when the index advertises one.
    pub icon_url: Option<String>,
}

impl Package {
    /// Create a package record for `pkg_name`. The title defaults to the
    /// name until a loader overrides it.
    pub fn new(pkg_name: impl Into<String>, operation: Operation) -> Self {
        let pkg_name = pkg_name.into();
        Self {
            title: pkg_name.clone(),
            pkg_name,
            operation,
            author: None,
            category: None,
            short_desc: None,
            long_desc: None,
            version: None,
            updated: None,
            updated_timestamp: None,
            download_size: 0,
            extracted_size: 0,
            url: None,
            icon_url: None,
        }
    }
}
