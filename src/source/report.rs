//! Shared types for fleet reports.
//!
//! These types match the JSON document written by the fleet probe. They are
//! the data contract between the external producer and this dashboard, which
//! only ever consumes them.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SourceError;

/// API status reported for a sprite.
///
/// The producer owns this enumeration. Values this dashboard does not know
/// about are kept verbatim in [`ApiStatus::Other`] instead of being rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApiStatus {
    Warm,
    Cold,
    Running,
    NotFound,
    Error,
    Unknown,
    /// Any other value, including the empty string.
    Other(String),
}

impl ApiStatus {
    /// Returns the wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            ApiStatus::Warm => "warm",
            ApiStatus::Cold => "cold",
            ApiStatus::Running => "running",
            ApiStatus::NotFound => "not_found",
            ApiStatus::Error => "error",
            ApiStatus::Unknown => "unknown",
            ApiStatus::Other(s) => s,
        }
    }

    /// True when the producer sent no status (absent, null or empty).
    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Default for ApiStatus {
    fn default() -> Self {
        ApiStatus::Other(String::new())
    }
}

impl From<&str> for ApiStatus {
    fn from(s: &str) -> Self {
        match s {
            "warm" => ApiStatus::Warm,
            "cold" => ApiStatus::Cold,
            "running" => ApiStatus::Running,
            "not_found" => ApiStatus::NotFound,
            "error" => ApiStatus::Error,
            "unknown" => ApiStatus::Unknown,
            other => ApiStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for ApiStatus {
    fn from(s: String) -> Self {
        ApiStatus::from(s.as_str())
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ApiStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(ApiStatus::from).unwrap_or_default())
    }
}

/// A three-valued availability flag.
///
/// JSON `null` (or a missing field) means the probe could not tell, which is
/// not the same thing as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Availability {
    #[default]
    Unknown,
    Yes,
    No,
}

impl From<Option<bool>> for Availability {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Availability::Unknown,
            Some(true) => Availability::Yes,
            Some(false) => Availability::No,
        }
    }
}

impl From<Availability> for Option<bool> {
    fn from(value: Availability) -> Self {
        match value {
            Availability::Unknown => None,
            Availability::Yes => Some(true),
            Availability::No => Some(false),
        }
    }
}

impl Serialize for Availability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Option::<bool>::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Availability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<bool>::deserialize(deserializer)?.into())
    }
}

/// Health snapshot for a single sprite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteStatus {
    /// Unique sprite name, also the key into the team registry.
    pub name: String,

    #[serde(default)]
    pub api_status: ApiStatus,

    /// API latency in milliseconds. `None` when the API was not probed.
    #[serde(default)]
    pub api_response_ms: Option<u64>,

    #[serde(default)]
    pub responsive: Availability,

    #[serde(default)]
    pub probe_response_ms: Option<u64>,

    #[serde(default)]
    pub claude_available: Availability,

    #[serde(default)]
    pub codex_available: Availability,

    /// Overall health as decided by the probe. Displayed as-is.
    pub healthy: bool,
}

/// A sprite the probe failed to check, reported separately from `sprites`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeError {
    pub sprite: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// A point-in-time fleet health snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetReport {
    /// Creation time as written by the producer.
    #[serde(default)]
    pub timestamp: String,
    pub total: u64,
    pub healthy: u64,
    pub unhealthy: u64,
    /// Sprites in probe order.
    #[serde(default)]
    pub sprites: Vec<SpriteStatus>,
    #[serde(default)]
    pub errors: Vec<ProbeError>,
}

impl FleetReport {
    /// Load and parse a report from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a report from a JSON string.
    pub fn parse(content: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Describe producer-side count violations.
    ///
    /// The counts are expected to satisfy `healthy + unhealthy == total` with
    /// both in `[0, total]`. A report that breaks this is still displayed;
    /// the returned messages are surfaced as warnings.
    pub fn consistency_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.healthy > self.total {
            warnings.push(format!(
                "healthy count {} exceeds total {}",
                self.healthy, self.total
            ));
        }
        if self.unhealthy > self.total {
            warnings.push(format!(
                "unhealthy count {} exceeds total {}",
                self.unhealthy, self.total
            ));
        }
        if self.healthy.saturating_add(self.unhealthy) != self.total {
            warnings.push(format!(
                "healthy ({}) + unhealthy ({}) != total ({})",
                self.healthy, self.unhealthy, self.total
            ));
        }

        warnings
    }
}
