//! # fleetwatch
//!
//! A terminal dashboard and library for the health of a fleet of sprites.
//!
//! A health probe periodically writes a fleet report (a JSON document with
//! per-sprite status and fleet totals). fleetwatch loads that report from a
//! file or an HTTP endpoint, groups sprites into teams, classifies every
//! status into a display badge, and shows the result in an interactive
//! terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(processing)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | HttpSource | ChannelSource    │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Load state machine, view navigation, team filter and selection
//! - **[`source`]**: The fleet report model and the [`DataSource`] trait, with
//!   implementations for file polling, HTTP fetching, and channel input
//! - **[`data`]**: Team resolution, health percentage, badge classification and
//!   the processed [`FleetData`] view model
//! - **[`settings`]**: Team registry and fetch settings from a config file
//! - **[`ui`]**: Terminal rendering using ratatui
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Watch the report the probe writes
//! fleetwatch --file fleet-status.json
//!
//! # Fetch it from a status endpoint every 10 seconds
//! fleetwatch --url http://localhost:8080/fleet-status.json --refresh 10
//!
//! # Only show one team
//! fleetwatch --team agents
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use fleetwatch::{App, FileSource, TeamRegistry, Theme};
//!
//! let source = Box::new(FileSource::new("fleet-status.json"));
//! let app = App::new(source, TeamRegistry::default(), Theme::dark());
//! ```
//!
//! ### As a library with channel source
//!
//! ```
//! use fleetwatch::{App, ChannelSource, TeamRegistry, Theme};
//!
//! let (tx, source) = ChannelSource::create("probe");
//! let app = App::new(Box::new(source), TeamRegistry::default(), Theme::dark());
//! ```
//!
//! ### Classifying a report without the UI
//!
//! ```
//! use fleetwatch::{FleetData, FleetReport, TeamFilter, TeamRegistry};
//!
//! let report = FleetReport::parse(r#"{
//!     "timestamp": "2026-01-12T09:30:00Z",
//!     "total": 1, "healthy": 1, "unhealthy": 0,
//!     "sprites": [{ "name": "dev-workspace-01", "api_status": "warm", "healthy": true }],
//!     "errors": []
//! }"#).unwrap();
//!
//! let data = FleetData::from_report(report, &TeamRegistry::default());
//! assert_eq!(data.percent, 100);
//! let dev = TeamFilter::Team("dev".into());
//! assert_eq!(data.visible_rows(&dev, &TeamRegistry::default()).len(), 1);
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, LoadState, View};
pub use data::{
    filter_sprites, health_percent, FleetData, HealthBadge, SpriteRow, Team, TeamFilter,
    TeamRegistry, Tier, ToolBadge,
};
pub use settings::Settings;
pub use source::{
    ApiStatus, Availability, ChannelSource, DataSource, FileSource, FleetReport, HttpSource,
    HttpSourceBuilder, ProbeError, SourceError, SpriteStatus,
};
pub use ui::Theme;
