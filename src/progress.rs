// src/progress.rs

//! Progress reporting for repository loads
//!
//! Loaders emit two kinds of notification: a coarse phase tick once the
//! index has been fetched, and a per-item tick while records are parsed.
//! Reporters are injected by the caller rather than registered globally;
//! pass [`SilentReporter`] when no output is wanted.
//!
//! # Example
//!
//! ```ignore
//! use quarry::progress::{LogReporter, ProgressReporter};
//!
//! let progress = LogReporter::new("homebrew");
//! let packages = repo.load_packages(&transport, &progress);
//! ```

use tracing::info;

/// Load phases reported by loaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Repository metadata has been fetched and is being processed.
    Updating,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Updating => write!(f, "updating"),
        }
    }
}

/// Sink for load progress notifications.
///
/// Both notifications are fire-and-forget; implementations must not fail
/// and should return quickly since they run inline with parsing.
pub trait ProgressReporter: Send + Sync {
    /// A coarse phase completed `step` of `total` steps.
    fn phase(&self, phase: Phase, step: u64, total: u64);

    /// Record `index` of `total` is about to be processed (1-based).
    fn item(&self, total: u64, index: u64);
}

/// No-op reporter for quiet or scripted usage.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl SilentReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for SilentReporter {
    fn phase(&self, _phase: Phase, _step: u64, _total: u64) {}

    fn item(&self, _total: u64, _index: u64) {}
}

/// Logs notifications through tracing at info level.
///
/// Useful for non-interactive environments or when progress belongs in
/// the logs rather than a UI.
#[derive(Debug)]
pub struct LogReporter {
    name: String,
}

impl LogReporter {
    /// Create a logging reporter labelled with `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ProgressReporter for LogReporter {
    fn phase(&self, phase: Phase, step: u64, total: u64) {
        info!("{}: {} ({}/{})", self.name, phase, step, total);
    }

    fn item(&self, total: u64, index: u64) {
        info!("{}: processing {}/{}", self.name, index, total);
    }
}

/// Events emitted by [`CallbackReporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A coarse phase tick.
    Phase { phase: Phase, step: u64, total: u64 },
    /// A per-item tick.
    Item { total: u64, index: u64 },
}

/// Calls a user-provided function on every notification.
///
/// Useful for custom progress handling or GUI integration.
pub struct CallbackReporter<F>
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    callback: F,
}

impl<F> CallbackReporter<F>
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    /// Create a callback reporter wrapping `callback`.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for CallbackReporter<F>
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn phase(&self, phase: Phase, step: u64, total: u64) {
        (self.callback)(ProgressEvent::Phase { phase, step, total });
    }

    fn item(&self, total: u64, index: u64) {
        (self.callback)(ProgressEvent::Item { total, index });
    }
}
