//! Channel-based data source.
//!
//! Receives fleet reports via a tokio watch channel. This is useful when the
//! dashboard is embedded next to whatever produces the report, so reports are
//! pushed rather than polled from a file or URL.

use tokio::sync::watch;

use super::{DataSource, FleetReport};

/// A data source that receives fleet reports via a channel.
///
/// The producer sends reports through the channel and this source hands the
/// latest one to the TUI. Until something is sent, the dashboard stays in
/// its loading state.
///
/// # Example
///
/// ```
/// use fleetwatch::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("fleet-probe");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<Option<FleetReport>>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where reports come from
    pub fn new(receiver: watch::Receiver<Option<FleetReport>>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
        }
    }

    /// Create a channel pair for sending reports to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender can be used to push
    /// reports and the source can be used with the dashboard.
    pub fn create(source_description: &str) -> (watch::Sender<Option<FleetReport>>, Self) {
        let (tx, rx) = watch::channel(None);
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<FleetReport> {
        if self.receiver.has_changed().unwrap_or(false) {
            self.receiver.borrow_and_update().clone()
        } else {
            None
        }
    }

    fn reload(&mut self) {
        // Hand the current value out again on the next poll
        self.receiver.mark_changed();
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Nothing to fail here; the producer side owns its errors
        None
    }
}
