//! HTTP data source.
//!
//! Fetches the fleet report from a URL (usually the `fleet-status.json`
//! published next to the dashboard). Requests run on a tokio runtime in the
//! background and results are handed to the TUI through a channel, so
//! `poll()` never blocks.
//!
//! Every request has a timeout, and transport failures or 5xx responses are
//! retried at most `retries` times before the error is reported.

use std::time::{Duration, Instant};

use reqwest::Client;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::{DataSource, FleetReport, SourceError};

/// Pause between a failed attempt and its retry.
const RETRY_DELAY: Duration = Duration::from_millis(250);

type FetchResult = Result<FleetReport, SourceError>;

/// Fetch and parse a fleet report, retrying transient failures.
pub async fn fetch_report(client: &Client, url: &str, retries: u32) -> FetchResult {
    let mut attempt = 0;
    loop {
        match fetch_once(client, url).await {
            Ok(report) => return Ok(report),
            Err(e) if e.is_retryable() && attempt < retries => {
                attempt += 1;
                warn!(url, attempt, error = %e, "fleet report fetch failed, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn fetch_once(client: &Client, url: &str) -> FetchResult {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(SourceError::Status(response.status().as_u16()));
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

/// A data source that fetches fleet reports over HTTP.
///
/// The first fetch starts as soon as the source is built. Further fetches
/// start on [`refresh`](DataSource::refresh) (only once `refresh_interval`
/// has elapsed since the last one) or on [`reload`](DataSource::reload).
/// At most one fetch is in flight at a time.
#[derive(Debug)]
pub struct HttpSource {
    client: Client,
    url: String,
    retries: u32,
    refresh_interval: Option<Duration>,
    runtime: Handle,
    sender: mpsc::Sender<FetchResult>,
    receiver: mpsc::Receiver<FetchResult>,
    in_flight: bool,
    last_fetch: Option<Instant>,
    description: String,
    last_error: Option<String>,
}

impl HttpSource {
    /// Create a new builder for configuring the source.
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::default()
    }

    /// Returns the URL being fetched.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether a fetch is currently running.
    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    fn start_fetch(&mut self) {
        if self.in_flight {
            return;
        }
        self.in_flight = true;
        self.last_fetch = Some(Instant::now());
        self.last_error = None;

        let client = self.client.clone();
        let url = self.url.clone();
        let retries = self.retries;
        let tx = self.sender.clone();

        debug!(url = %url, "starting fleet report fetch");
        self.runtime.spawn(async move {
            let result = fetch_report(&client, &url, retries).await;
            // Receiver dropped means the dashboard is gone
            let _ = tx.send(result).await;
        });
    }
}

impl DataSource for HttpSource {
    fn poll(&mut self) -> Option<FleetReport> {
        match self.receiver.try_recv() {
            Ok(Ok(report)) => {
                self.in_flight = false;
                self.last_error = None;
                info!(url = %self.url, sprites = report.sprites.len(), "fleet report fetched");
                Some(report)
            }
            Ok(Err(e)) => {
                self.in_flight = false;
                warn!(url = %self.url, error = %e, "fleet report fetch failed");
                self.last_error = Some(e.to_string());
                None
            }
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                self.in_flight = false;
                self.last_error = Some(SourceError::Disconnected.to_string());
                None
            }
        }
    }

    fn refresh(&mut self) {
        let Some(interval) = self.refresh_interval else {
            return;
        };
        let due = self.last_fetch.map_or(true, |t| t.elapsed() >= interval);
        if due {
            self.start_fetch();
        }
    }

    fn reload(&mut self) {
        self.start_fetch();
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Builder for [`HttpSource`].
#[derive(Debug, Default)]
pub struct HttpSourceBuilder {
    url: Option<String>,
    timeout: Option<Duration>,
    retries: Option<u32>,
    refresh_interval: Option<Duration>,
}

impl HttpSourceBuilder {
    /// Set the report URL (e.g., "http://localhost:4321/fleet-status.json").
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the per-request timeout (default: 5 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set how many times a transient failure is retried (default: 1).
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Re-fetch periodically. Without this, only explicit reloads fetch again.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Build the source and start the first fetch on `runtime`.
    pub fn build(self, runtime: Handle) -> Result<HttpSource, SourceError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(5));
        let client = Client::builder().timeout(timeout).build()?;

        let url = self
            .url
            .unwrap_or_else(|| "http://localhost:4321/fleet-status.json".to_string());
        let (sender, receiver) = mpsc::channel(4);

        let mut source = HttpSource {
            client,
            description: format!("url: {}", url),
            url,
            retries: self.retries.unwrap_or(1),
            refresh_interval: self.refresh_interval,
            runtime,
            sender,
            receiver,
            in_flight: false,
            last_fetch: None,
            last_error: None,
        };
        source.start_fetch();
        Ok(source)
    }
}
