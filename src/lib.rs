// src/lib.rs

//! Quarry
//!
//! Repository-ingestion library for a package-manager client: fetches
//! remote package indexes and normalizes them into a canonical,
//! format-independent catalog for a download/install pipeline.
//!
//! # Architecture
//!
//! - `Repository` is the polymorphic contract over index formats; callers
//!   hold trait objects and never see a concrete format
//! - `Transport` and `ProgressReporter` are injected boundaries, keeping
//!   the network edge and progress sinks swappable
//! - Loading never fails across the repository boundary: problems degrade
//!   to an empty catalog plus the repository's `loaded` flag

pub mod config;
mod error;
pub mod package;
pub mod progress;
pub mod repository;
pub mod transport;

pub use config::{Config, RepoEntry};
pub use error::{Error, Result};
pub use package::{Operation, Package};
pub use progress::{
    CallbackReporter, LogReporter, Phase, ProgressEvent, ProgressReporter, SilentReporter,
};
pub use repository::{OscRepo, Repository, from_config, load_all, make_repository};
pub use transport::{HttpTransport, Transport};
