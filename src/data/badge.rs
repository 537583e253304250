//! Badge classification for sprite statuses.
//!
//! Maps raw report fields to a display [`Tier`] and label. Nothing here
//! re-derives health: the probe's `healthy` flag is taken as given.

use serde::Serialize;

use crate::source::{ApiStatus, Availability};

/// Placeholder shown for absent optional values.
pub const MISSING: &str = "—";

/// Coarse color classification used by badges and gauges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Positive,
    Warning,
    Negative,
    Neutral,
    Info,
}

impl Tier {
    /// Tier for a health percentage: `>= 80` positive, `>= 50` warning,
    /// anything lower negative.
    pub fn from_percent(percent: u8) -> Self {
        if percent >= 80 {
            Tier::Positive
        } else if percent >= 50 {
            Tier::Warning
        } else {
            Tier::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Positive => "positive",
            Tier::Warning => "warning",
            Tier::Negative => "negative",
            Tier::Neutral => "neutral",
            Tier::Info => "info",
        }
    }
}

impl ApiStatus {
    /// Display tier for this status. Unrecognized values are neutral.
    pub fn tier(&self) -> Tier {
        match self {
            ApiStatus::Warm => Tier::Positive,
            ApiStatus::Running => Tier::Info,
            ApiStatus::Cold => Tier::Warning,
            ApiStatus::NotFound | ApiStatus::Error => Tier::Negative,
            ApiStatus::Unknown | ApiStatus::Other(_) => Tier::Neutral,
        }
    }
}

/// Primary health label for a sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthBadge {
    pub label: String,
    pub tier: Tier,
}

impl HealthBadge {
    /// A healthy sprite always reads "Healthy", whatever its API status.
    /// Otherwise the raw status is shown, or "Unhealthy" when there is none.
    pub fn new(healthy: bool, status: &ApiStatus) -> Self {
        if healthy {
            return Self {
                label: "Healthy".to_string(),
                tier: Tier::Positive,
            };
        }

        let label = if status.is_empty() {
            "Unhealthy".to_string()
        } else {
            status.as_str().to_string()
        };
        Self {
            label,
            tier: Tier::Negative,
        }
    }
}

/// Availability label for a tool, e.g. "claude: yes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolBadge {
    pub label: String,
    pub tier: Tier,
}

impl ToolBadge {
    pub fn new(tool: &str, available: Availability) -> Self {
        let (answer, tier) = match available {
            Availability::Unknown => ("?", Tier::Neutral),
            Availability::Yes => ("yes", Tier::Positive),
            Availability::No => ("no", Tier::Negative),
        };
        Self {
            label: format!("{}: {}", tool, answer),
            tier,
        }
    }
}

/// Format an optional latency. Zero is a real measurement, not "absent".
pub fn format_ms(value: Option<u64>) -> String {
    match value {
        Some(ms) => format!("{}ms", ms),
        None => MISSING.to_string(),
    }
}

/// Format a tri-state flag for detail views.
pub fn format_availability(value: Availability) -> &'static str {
    match value {
        Availability::Unknown => "?",
        Availability::Yes => "yes",
        Availability::No => "no",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tiers() {
        assert_eq!(ApiStatus::Warm.tier(), Tier::Positive);
        assert_eq!(ApiStatus::Running.tier(), Tier::Info);
        assert_eq!(ApiStatus::Cold.tier(), Tier::Warning);
        assert_eq!(ApiStatus::NotFound.tier(), Tier::Negative);
        assert_eq!(ApiStatus::Error.tier(), Tier::Negative);
        assert_eq!(ApiStatus::Unknown.tier(), Tier::Neutral);
        assert_eq!(ApiStatus::from("hibernating").tier(), Tier::Neutral);
        assert_eq!(ApiStatus::default().tier(), Tier::Neutral);
    }

    #[test]
    fn test_percent_tier_boundaries() {
        assert_eq!(Tier::from_percent(100), Tier::Positive);
        assert_eq!(Tier::from_percent(80), Tier::Positive);
        assert_eq!(Tier::from_percent(79), Tier::Warning);
        assert_eq!(Tier::from_percent(75), Tier::Warning);
        assert_eq!(Tier::from_percent(50), Tier::Warning);
        assert_eq!(Tier::from_percent(49), Tier::Negative);
        assert_eq!(Tier::from_percent(0), Tier::Negative);
    }

    #[test]
    fn test_unhealthy_shows_raw_status() {
        let badge = HealthBadge::new(false, &ApiStatus::Cold);
        assert_eq!(badge.label, "cold");
        assert_eq!(badge.tier, Tier::Negative);
    }

    #[test]
    fn test_healthy_overrides_status() {
        let badge = HealthBadge::new(true, &ApiStatus::Warm);
        assert_eq!(badge.label, "Healthy");

        // The probe's verdict wins even when the status looks bad
        let badge = HealthBadge::new(true, &ApiStatus::Cold);
        assert_eq!(badge.label, "Healthy");
        assert_eq!(badge.tier, Tier::Positive);
    }

    #[test]
    fn test_unhealthy_without_status() {
        let badge = HealthBadge::new(false, &ApiStatus::default());
        assert_eq!(badge.label, "Unhealthy");
    }

    #[test]
    fn test_tool_badges() {
        let unknown = ToolBadge::new("claude", Availability::Unknown);
        assert_eq!(unknown.label, "claude: ?");
        assert_eq!(unknown.tier, Tier::Neutral);

        let yes = ToolBadge::new("codex", Availability::Yes);
        assert_eq!(yes.label, "codex: yes");
        assert_eq!(yes.tier, Tier::Positive);

        let no = ToolBadge::new("codex", Availability::No);
        assert_eq!(no.label, "codex: no");
        assert_eq!(no.tier, Tier::Negative);
    }

    #[test]
    fn test_format_ms() {
        assert_eq!(format_ms(Some(142)), "142ms");
        assert_eq!(format_ms(Some(0)), "0ms");
        assert_eq!(format_ms(None), "—");
    }
}
