//! Data source abstraction for receiving fleet reports.
//!
//! This module provides a trait-based abstraction for loading the fleet
//! report from various places (a file written by the probe, an HTTP
//! endpoint serving it, or an in-memory channel).

mod channel;
mod error;
mod file;
mod http;
mod report;

pub use channel::ChannelSource;
pub use error::SourceError;
pub use file::FileSource;
pub use http::{fetch_report, HttpSource, HttpSourceBuilder};
pub use report::{ApiStatus, Availability, FleetReport, ProbeError, SpriteStatus};

use std::fmt::Debug;

/// Trait for receiving fleet reports from various sources.
///
/// # Example
///
/// ```
/// use fleetwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("fleet-status.json");
/// if let Some(report) = source.poll() {
///     println!("Got {} sprites", report.sprites.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest report.
    ///
    /// Returns `Some(report)` if a new report is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<FleetReport>;

    /// Start a periodic refresh.
    ///
    /// Sources that notice changes on their own (file watching, channels)
    /// leave this as a no-op.
    fn refresh(&mut self) {}

    /// Start a user-requested reload.
    ///
    /// Unlike [`refresh`](DataSource::refresh), this must produce a fresh
    /// load even when nothing appears to have changed.
    fn reload(&mut self) {
        self.refresh()
    }

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if the last load failed.
    fn error(&self) -> Option<&str>;
}
