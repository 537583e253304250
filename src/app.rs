//! Application state and navigation logic.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::data::export::{build_export, write_export};
use crate::data::{FleetData, SpriteRow, TeamFilter, TeamRegistry, TeamSummary};
use crate::source::{DataSource, ProbeError};
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Sprite detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Metrics summary and the filterable sprite table.
    Sprites,
    /// Health rolled up per team.
    Teams,
    /// Sprites the probe could not check.
    Errors,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Sprites => View::Teams,
            View::Teams => View::Errors,
            View::Errors => View::Sprites,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Sprites => View::Errors,
            View::Teams => View::Sprites,
            View::Errors => View::Teams,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Sprites => "Sprites",
            View::Teams => "Teams",
            View::Errors => "Errors",
        }
    }
}

/// Where the dashboard is in its load cycle.
///
/// `Loading` lasts until the first report (or failure) arrives. A failure
/// is sticky: nothing is fetched again until the user asks for a reload.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Loaded(FleetData),
    Error(String),
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub state: LoadState,
    pub registry: TeamRegistry,
    refresh_interval: Option<Duration>,
    last_refresh: Instant,

    // Navigation state, one selection per view
    pub selected_sprite_index: usize,
    pub selected_team_index: usize,
    pub selected_error_index: usize,

    pub team_filter: TeamFilter,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source and team registry.
    pub fn new(source: Box<dyn DataSource>, registry: TeamRegistry, theme: Theme) -> Self {
        Self {
            running: true,
            current_view: View::Sprites,
            show_help: false,
            show_detail_overlay: false,
            source,
            state: LoadState::Loading,
            registry,
            refresh_interval: None,
            last_refresh: Instant::now(),
            selected_sprite_index: 0,
            selected_team_index: 0,
            selected_error_index: 0,
            team_filter: TeamFilter::All,
            theme,
            status_message: None,
        }
    }

    /// Start with a team already selected.
    pub fn with_team_filter(mut self, filter: TeamFilter) -> Self {
        self.team_filter = filter;
        self
    }

    /// Ask the source for fresh data every `interval` while loaded.
    pub fn with_refresh_interval(mut self, interval: Option<Duration>) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// The loaded data, if any.
    pub fn data(&self) -> Option<&FleetData> {
        match &self.state {
            LoadState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Advance the load cycle. Called on every tick of the main loop.
    ///
    /// Does nothing while in the error state. Returns true if a new report
    /// was loaded.
    pub fn tick(&mut self) -> bool {
        match self.state {
            LoadState::Error(_) => return false,
            LoadState::Loading => {}
            LoadState::Loaded(_) => {
                if let Some(interval) = self.refresh_interval {
                    if self.last_refresh.elapsed() >= interval {
                        self.source.refresh();
                        self.last_refresh = Instant::now();
                    }
                }
            }
        }
        self.reload_data()
    }

    /// User-requested reload. Leaves the error state and fetches again.
    pub fn reload(&mut self) {
        if matches!(self.state, LoadState::Error(_)) {
            self.state = LoadState::Loading;
        }
        self.source.reload();
        self.last_refresh = Instant::now();
        self.reload_data();
    }

    /// Poll the data source for new data.
    ///
    /// Returns true if a new report was received.
    pub fn reload_data(&mut self) -> bool {
        if let Some(report) = self.source.poll() {
            let data = FleetData::from_report(report, &self.registry);
            for warning in &data.warnings {
                warn!(%warning, "fleet report counts are inconsistent");
            }
            info!(
                sprites = data.rows.len(),
                healthy = data.healthy,
                total = data.total,
                "fleet report loaded"
            );

            self.state = LoadState::Loaded(data);
            self.clamp_selection();
            return true;
        }

        if let Some(err) = self.source.error() {
            if !matches!(&self.state, LoadState::Error(current) if current == err) {
                warn!(error = %err, source = %self.source.description(), "failed to load fleet report");
                self.state = LoadState::Error(err.to_string());
                self.show_detail_overlay = false;
            }
        }
        false
    }

    /// Sprite rows visible under the current team filter.
    pub fn visible_rows(&self) -> Vec<&SpriteRow> {
        self.data()
            .map(|d| d.visible_rows(&self.team_filter, &self.registry))
            .unwrap_or_default()
    }

    /// The sprite row under the cursor in the Sprites view.
    pub fn selected_row(&self) -> Option<&SpriteRow> {
        self.visible_rows().get(self.selected_sprite_index).copied()
    }

    pub fn selected_team(&self) -> Option<&TeamSummary> {
        self.data()?.teams.get(self.selected_team_index)
    }

    pub fn selected_error(&self) -> Option<&ProbeError> {
        self.data()?.errors.get(self.selected_error_index)
    }

    /// Number of selectable items in the current view.
    fn item_count(&self) -> usize {
        match self.current_view {
            View::Sprites => self.visible_rows().len(),
            View::Teams => self.data().map_or(0, |d| d.teams.len()),
            View::Errors => self.data().map_or(0, |d| d.errors.len()),
        }
    }

    fn selected_index_mut(&mut self) -> &mut usize {
        match self.current_view {
            View::Sprites => &mut self.selected_sprite_index,
            View::Teams => &mut self.selected_team_index,
            View::Errors => &mut self.selected_error_index,
        }
    }

    /// Keep every selection inside its list after data or filter changes.
    fn clamp_selection(&mut self) {
        let sprites = self.visible_rows().len();
        let (teams, errors) = self
            .data()
            .map_or((0, 0), |d| (d.teams.len(), d.errors.len()));
        self.selected_sprite_index = self.selected_sprite_index.min(sprites.saturating_sub(1));
        self.selected_team_index = self.selected_team_index.min(teams.saturating_sub(1));
        self.selected_error_index = self.selected_error_index.min(errors.saturating_sub(1));
    }

    /// Switch to the next view (cycles through Sprites → Teams → Errors).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        let max = self.item_count().saturating_sub(1);
        let index = self.selected_index_mut();
        *index = (*index + n).min(max);
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        let index = self.selected_index_mut();
        *index = index.saturating_sub(n);
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        *self.selected_index_mut() = 0;
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        let last = self.item_count().saturating_sub(1);
        *self.selected_index_mut() = last;
    }

    /// Select a row by its visual position, ignoring clicks past the end.
    pub fn select_row(&mut self, row: usize) {
        if row < self.item_count() {
            *self.selected_index_mut() = row;
        }
    }

    /// Show the next team in the sprite table.
    pub fn next_team_filter(&mut self) {
        let filter = self.team_filter.next(&self.registry);
        self.set_team_filter(filter);
    }

    /// Show the previous team in the sprite table.
    pub fn prev_team_filter(&mut self) {
        let filter = self.team_filter.prev(&self.registry);
        self.set_team_filter(filter);
    }

    pub fn set_team_filter(&mut self, filter: TeamFilter) {
        self.team_filter = filter;
        self.selected_sprite_index = 0;
        self.clamp_selection();
    }

    /// Enter: open sprite detail, or drill from a team into its sprites.
    pub fn enter_detail(&mut self) {
        match self.current_view {
            View::Sprites => {
                if self.selected_row().is_some() {
                    self.show_detail_overlay = true;
                }
            }
            View::Teams => {
                if let Some(team) = self.selected_team() {
                    let filter = TeamFilter::Team(team.name.clone());
                    self.set_team_filter(filter);
                    self.current_view = View::Sprites;
                }
            }
            View::Errors => {}
        }
    }

    /// Navigate back: close overlay first, then return to the Sprites view.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        self.current_view = View::Sprites;
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export the current view to a file.
    pub fn export_state(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let Some(data) = self.data() else {
            anyhow::bail!("No data to export");
        };

        let export = build_export(data, &self.team_filter, &self.registry);
        write_export(path, &export)?;
        info!(path = %path.display(), "exported fleet view");
        Ok(())
    }
}
