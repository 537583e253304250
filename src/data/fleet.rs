//! Fleet aggregation, filtering and the processed view model.
//!
//! This module turns a raw [`FleetReport`] into [`FleetData`]: every sprite
//! annotated with its resolved team and badges, plus the summary numbers the
//! header shows.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use super::badge::{HealthBadge, Tier, ToolBadge};
use super::team::{TeamRegistry, UNKNOWN_TEAM};
use crate::source::{FleetReport, ProbeError, SpriteStatus};

/// Healthy share of the fleet as a whole percentage.
///
/// An empty fleet is 0%, so a caller that needs to tell "no sprites" apart
/// from "nothing healthy" must also look at `total`. Rounds half up. A
/// `healthy` count above `total` is clamped to 100%.
pub fn health_percent(healthy: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let healthy = u128::from(healthy.min(total));
    let total = u128::from(total);
    ((healthy * 200 + total) / (total * 2)) as u8
}

/// Selector value that shows every team.
pub const ALL_TEAMS: &str = "all";

/// Team selection for the sprite table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TeamFilter {
    #[default]
    All,
    Team(String),
}

impl TeamFilter {
    /// Whether a sprite resolved to `team` is visible under this filter.
    pub fn matches(&self, team: &str) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(name) => name == team,
        }
    }

    /// Selector label, e.g. "All Teams" or "Dev - General purpose workspaces".
    pub fn label(&self, registry: &TeamRegistry) -> String {
        match self {
            TeamFilter::All => "All Teams".to_string(),
            TeamFilter::Team(name) => registry
                .get(name)
                .map_or_else(|| name.clone(), |t| t.display_name()),
        }
    }

    /// Next entry in the selector: All, then every team in registry order.
    pub fn next(&self, registry: &TeamRegistry) -> Self {
        let options = Self::options(registry);
        let index = self.position(&options).map_or(0, |i| (i + 1) % options.len());
        options[index].clone()
    }

    /// Previous entry in the selector.
    pub fn prev(&self, registry: &TeamRegistry) -> Self {
        let options = Self::options(registry);
        let index = self
            .position(&options)
            .map_or(0, |i| (i + options.len() - 1) % options.len());
        options[index].clone()
    }

    fn options(registry: &TeamRegistry) -> Vec<TeamFilter> {
        std::iter::once(TeamFilter::All)
            .chain(registry.teams().iter().map(|t| TeamFilter::Team(t.name.clone())))
            .collect()
    }

    fn position(&self, options: &[TeamFilter]) -> Option<usize> {
        options.iter().position(|o| o == self)
    }
}

impl FromStr for TeamFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ALL_TEAMS {
            Ok(TeamFilter::All)
        } else {
            Ok(TeamFilter::Team(s.to_string()))
        }
    }
}

impl fmt::Display for TeamFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TeamFilter::All => f.write_str(ALL_TEAMS),
            TeamFilter::Team(name) => f.write_str(name),
        }
    }
}

/// Anything the team filter can be applied to.
pub trait TeamMember {
    /// Name of the team this item belongs to.
    fn team<'r>(&'r self, registry: &'r TeamRegistry) -> &'r str;
}

impl TeamMember for SpriteStatus {
    fn team<'r>(&'r self, registry: &'r TeamRegistry) -> &'r str {
        registry.team_for_sprite(&self.name)
    }
}

impl TeamMember for SpriteRow {
    /// Resolved once when the row was built.
    fn team<'r>(&'r self, _registry: &'r TeamRegistry) -> &'r str {
        &self.team
    }
}

/// Sprites visible under `filter`, in their original order.
///
/// Works on raw [`SpriteStatus`] values and on processed [`SpriteRow`]s.
pub fn filter_sprites<'a, S: TeamMember>(
    sprites: &'a [S],
    filter: &TeamFilter,
    registry: &TeamRegistry,
) -> Vec<&'a S> {
    match filter {
        TeamFilter::All => sprites.iter().collect(),
        TeamFilter::Team(_) => sprites
            .iter()
            .filter(|s| filter.matches(s.team(registry)))
            .collect(),
    }
}

/// Health rollup for one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSummary {
    pub name: String,
    pub description: String,
    /// Sprites configured for the team.
    pub members: usize,
    /// Sprites of the team present in the report.
    pub reporting: usize,
    pub healthy: usize,
    pub unhealthy: usize,
    pub percent: u8,
}

impl TeamSummary {
    pub fn tier(&self) -> Tier {
        Tier::from_percent(self.percent)
    }
}

/// Per-team rollups in registry order, followed by an `unknown` bucket when
/// some sprites belong to no team.
pub fn team_summaries(sprites: &[SpriteStatus], registry: &TeamRegistry) -> Vec<TeamSummary> {
    let rollup = |name: &str, description: &str, members: usize| {
        let (healthy, unhealthy) = sprites
            .iter()
            .filter(|s| registry.team_for_sprite(&s.name) == name)
            .fold((0usize, 0usize), |(h, u), s| if s.healthy { (h + 1, u) } else { (h, u + 1) });
        let reporting = healthy + unhealthy;
        TeamSummary {
            name: name.to_string(),
            description: description.to_string(),
            members,
            reporting,
            healthy,
            unhealthy,
            percent: health_percent(healthy as u64, reporting as u64),
        }
    };

    let mut summaries: Vec<TeamSummary> = registry
        .teams()
        .iter()
        .map(|t| rollup(&t.name, &t.description, t.sprites.len()))
        .collect();

    let unassigned = rollup(UNKNOWN_TEAM, "Not assigned to a team", 0);
    if unassigned.reporting > 0 {
        summaries.push(unassigned);
    }
    summaries
}

/// A sprite with everything the table needs precomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteRow {
    pub sprite: SpriteStatus,
    pub team: String,
    pub health: HealthBadge,
    pub status_tier: Tier,
    pub claude: ToolBadge,
    pub codex: ToolBadge,
}

impl SpriteRow {
    pub fn new(sprite: SpriteStatus, registry: &TeamRegistry) -> Self {
        Self {
            team: registry.team_for_sprite(&sprite.name).to_string(),
            health: HealthBadge::new(sprite.healthy, &sprite.api_status),
            status_tier: sprite.api_status.tier(),
            claude: ToolBadge::new("claude", sprite.claude_available),
            codex: ToolBadge::new("codex", sprite.codex_available),
            sprite,
        }
    }
}

/// A loaded report, processed for display.
#[derive(Debug, Clone)]
pub struct FleetData {
    pub timestamp: String,
    pub total: u64,
    pub healthy: u64,
    pub unhealthy: u64,
    pub percent: u8,
    pub rows: Vec<SpriteRow>,
    pub errors: Vec<ProbeError>,
    pub teams: Vec<TeamSummary>,
    /// Producer-side count violations found in the report.
    pub warnings: Vec<String>,
    pub last_updated: Instant,
}

impl FleetData {
    /// Process a report against the team registry.
    pub fn from_report(report: FleetReport, registry: &TeamRegistry) -> Self {
        let warnings = report.consistency_warnings();
        let teams = team_summaries(&report.sprites, registry);
        let rows = report
            .sprites
            .into_iter()
            .map(|s| SpriteRow::new(s, registry))
            .collect();

        Self {
            percent: health_percent(report.healthy, report.total),
            timestamp: report.timestamp,
            total: report.total,
            healthy: report.healthy,
            unhealthy: report.unhealthy,
            rows,
            errors: report.errors,
            teams,
            warnings,
            last_updated: Instant::now(),
        }
    }

    /// Tier of the overall health gauge.
    pub fn percent_tier(&self) -> Tier {
        Tier::from_percent(self.percent)
    }

    /// Rows visible under `filter`, in probe order.
    pub fn visible_rows(&self, filter: &TeamFilter, registry: &TeamRegistry) -> Vec<&SpriteRow> {
        filter_sprites(&self.rows, filter, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::team::Team;
    use crate::source::{ApiStatus, Availability};

    fn sprite(name: &str, status: &str, healthy: bool) -> SpriteStatus {
        SpriteStatus {
            name: name.to_string(),
            api_status: ApiStatus::from(status),
            api_response_ms: None,
            responsive: Availability::Unknown,
            probe_response_ms: None,
            claude_available: Availability::Unknown,
            codex_available: Availability::Unknown,
            healthy,
        }
    }

    fn sample_sprites() -> Vec<SpriteStatus> {
        vec![
            sprite("mobile-worker-01", "warm", true),
            sprite("agents-synth-01", "warm", true),
            sprite("dev-workspace-01", "cold", false),
            sprite("mystery-01", "running", true),
            sprite("agents-review-claude-01", "error", false),
        ]
    }

    fn report(total: u64, healthy: u64, unhealthy: u64) -> FleetReport {
        FleetReport {
            timestamp: "2026-01-12T09:30:00Z".to_string(),
            total,
            healthy,
            unhealthy,
            sprites: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_health_percent() {
        assert_eq!(health_percent(3, 4), 75);
        assert_eq!(health_percent(4, 4), 100);
        assert_eq!(health_percent(2, 3), 67);
        assert_eq!(health_percent(1, 3), 33);
        // Half rounds up
        assert_eq!(health_percent(1, 8), 13);
        assert_eq!(health_percent(1, 200), 1);
    }

    #[test]
    fn test_health_percent_empty_fleet() {
        assert_eq!(health_percent(0, 0), 0);
        assert_eq!(health_percent(5, 0), 0);
    }

    #[test]
    fn test_health_percent_clamps_bad_counts() {
        assert_eq!(health_percent(9, 4), 100);
        assert_eq!(health_percent(u64::MAX, u64::MAX), 100);
    }

    #[test]
    fn test_three_of_four_is_warning() {
        let data = FleetData::from_report(report(4, 3, 1), &TeamRegistry::default());
        assert_eq!(data.percent, 75);
        assert_eq!(data.percent_tier(), Tier::Warning);
        assert!(data.warnings.is_empty());
    }

    #[test]
    fn test_inconsistent_report_still_processes() {
        let data = FleetData::from_report(report(4, 3, 3), &TeamRegistry::default());
        assert_eq!(data.percent, 75);
        assert_eq!(data.warnings.len(), 1);
    }

    #[test]
    fn test_filter_all_is_identity() {
        let sprites = sample_sprites();
        let visible = filter_sprites(&sprites, &TeamFilter::All, &TeamRegistry::default());
        assert_eq!(visible.len(), sprites.len());
        assert!(visible.iter().zip(&sprites).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_filter_by_team_keeps_order() {
        let sprites = sample_sprites();
        let registry = TeamRegistry::default();
        let visible = filter_sprites(&sprites, &TeamFilter::Team("agents".into()), &registry);
        let names: Vec<&str> = visible.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["agents-synth-01", "agents-review-claude-01"]);
        assert!(visible
            .iter()
            .all(|s| registry.team_for_sprite(&s.name) == "agents"));
    }

    #[test]
    fn test_filter_unknown_team_bucket() {
        let sprites = sample_sprites();
        let visible = filter_sprites(
            &sprites,
            &TeamFilter::Team(UNKNOWN_TEAM.into()),
            &TeamRegistry::default(),
        );
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "mystery-01");
    }

    #[test]
    fn test_filter_with_no_matches_is_empty() {
        let sprites = sample_sprites();
        let visible = filter_sprites(&sprites, &TeamFilter::Team("infra".into()), &TeamRegistry::default());
        assert!(visible.is_empty());
    }

    #[test]
    fn test_team_filter_parse_and_display() {
        assert_eq!("all".parse::<TeamFilter>().unwrap(), TeamFilter::All);
        assert_eq!("".parse::<TeamFilter>().unwrap(), TeamFilter::All);
        assert_eq!(
            "dev".parse::<TeamFilter>().unwrap(),
            TeamFilter::Team("dev".to_string())
        );
        assert_eq!(TeamFilter::Team("dev".into()).to_string(), "dev");
        assert_eq!(TeamFilter::All.to_string(), "all");
    }

    #[test]
    fn test_team_filter_cycles_through_registry() {
        let registry = TeamRegistry::default();
        let mut filter = TeamFilter::All;
        let mut seen = Vec::new();
        for _ in 0..registry.len() + 1 {
            filter = filter.next(&registry);
            seen.push(filter.to_string());
        }
        assert_eq!(seen, vec!["agents", "dev", "infra", "mobile", "all"]);

        assert_eq!(TeamFilter::All.prev(&registry), TeamFilter::Team("mobile".into()));
        // A filter not in the registry restarts from the top
        assert_eq!(TeamFilter::Team("gone".into()).next(&registry), TeamFilter::All);
    }

    #[test]
    fn test_team_filter_label() {
        let registry = TeamRegistry::default();
        assert_eq!(TeamFilter::All.label(&registry), "All Teams");
        assert_eq!(
            TeamFilter::Team("mobile".into()).label(&registry),
            "Mobile - Distributed task execution"
        );
        assert_eq!(TeamFilter::Team("gone".into()).label(&registry), "gone");
    }

    #[test]
    fn test_team_summaries() {
        let sprites = sample_sprites();
        let summaries = team_summaries(&sprites, &TeamRegistry::default());
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["agents", "dev", "infra", "mobile", "unknown"]);

        let agents = &summaries[0];
        assert_eq!(agents.members, 3);
        assert_eq!(agents.reporting, 2);
        assert_eq!(agents.healthy, 1);
        assert_eq!(agents.unhealthy, 1);
        assert_eq!(agents.percent, 50);
        assert_eq!(agents.tier(), Tier::Warning);

        let infra = &summaries[2];
        assert_eq!(infra.reporting, 0);
        assert_eq!(infra.percent, 0);
    }

    #[test]
    fn test_team_summaries_without_strays() {
        let sprites = vec![sprite("dev-workspace-01", "warm", true)];
        let registry = TeamRegistry::new(vec![Team::new("dev", "", &["dev-workspace-01"])]);
        let summaries = team_summaries(&sprites, &registry);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].percent, 100);
    }

    #[test]
    fn test_rows_carry_badges() {
        let mut report = report(5, 3, 2);
        report.sprites = sample_sprites();
        report.sprites[2].claude_available = Availability::Unknown;
        report.sprites[2].codex_available = Availability::No;

        let data = FleetData::from_report(report, &TeamRegistry::default());
        let dev = &data.rows[2];
        assert_eq!(dev.team, "dev");
        assert_eq!(dev.health.label, "cold");
        assert_eq!(dev.status_tier, Tier::Warning);
        assert_eq!(dev.claude.label, "claude: ?");
        assert_eq!(dev.codex.label, "codex: no");

        let synth = &data.rows[1];
        assert_eq!(synth.team, "agents");
        assert_eq!(synth.health.label, "Healthy");

        assert_eq!(data.rows[3].team, "unknown");
        let registry = TeamRegistry::default();
        assert_eq!(data.visible_rows(&TeamFilter::Team("dev".into()), &registry).len(), 1);
        assert_eq!(data.visible_rows(&TeamFilter::All, &registry).len(), 5);
    }

    #[test]
    fn test_rows_and_raw_sprites_filter_alike() {
        let mut report = report(5, 3, 2);
        report.sprites = sample_sprites();
        let registry = TeamRegistry::default();
        let data = FleetData::from_report(report.clone(), &registry);

        for filter in ["all", "agents", "dev", "unknown", "infra"] {
            let filter: TeamFilter = filter.parse().unwrap();
            let raw: Vec<&str> = filter_sprites(&report.sprites, &filter, &registry)
                .iter()
                .map(|s| s.name.as_str())
                .collect();
            let rows: Vec<&str> = data
                .visible_rows(&filter, &registry)
                .iter()
                .map(|r| r.sprite.name.as_str())
                .collect();
            assert_eq!(raw, rows, "filter {filter}");
        }
    }
}
