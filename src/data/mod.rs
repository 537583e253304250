//! Data models and processing for fleet reports.
//!
//! This module turns a raw fleet report into structured, badge-annotated
//! data suitable for display.
//!
//! ## Submodules
//!
//! - [`team`]: Static team registry and sprite-to-team resolution
//! - [`badge`]: Status, health and tool badge classification
//! - [`fleet`]: Health percentage, team filtering, per-team rollups and
//!   the processed [`FleetData`] view model
//! - [`export`]: JSON export of the classified view
//!
//! ## Data Flow
//!
//! ```text
//! FleetReport (raw JSON)
//!        │
//!        ▼
//! FleetData::from_report(report, &registry)
//!        │
//!        ├──▶ SpriteRow (team resolved, badges classified)
//!        ├──▶ TeamSummary (per-team health)
//!        └──▶ warnings (count invariants the producer broke)
//! ```

pub mod badge;
pub mod export;
pub mod fleet;
pub mod team;

pub use badge::{format_ms, HealthBadge, Tier, ToolBadge, MISSING};
pub use fleet::{
    filter_sprites, health_percent, team_summaries, FleetData, SpriteRow, TeamFilter, TeamMember,
    TeamSummary, ALL_TEAMS,
};
pub use team::{Team, TeamRegistry, UNKNOWN_TEAM};
