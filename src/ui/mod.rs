//! Terminal rendering.
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ ● FLEETWATCH │ 3/4 healthy (75%) │ Last ...  │  header
//! │ 1:Sprites | 2:Teams | 3:Errors (1)           │  tabs
//! │ ┌──────────────────────────────────────────┐ │
//! │ │ current view                             │ │  content
//! │ └──────────────────────────────────────────┘ │
//! │ file: fleet-status.json | Updated 0.4s ago   │  status bar
//! └──────────────────────────────────────────────┘
//! ```
//!
//! While loading, or after a failed load, the content area shows a
//! placeholder or the error panel instead of the current view.

pub mod common;
pub mod detail;
pub mod errors;
pub mod sprites;
pub mod teams;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, LoadState, View};

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 60;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 12;

/// Row where view content starts (after header and tabs).
pub const CONTENT_START_ROW: u16 = 2;

/// Draw the whole dashboard for the current app state.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
            .intersection(area);
        frame.render_widget(paragraph, centered);
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Length(1), // Header bar
        Constraint::Length(1), // Tabs
        Constraint::Min(8),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    common::render_header(frame, app, chunks[0]);
    common::render_tabs(frame, app, chunks[1]);

    match &app.state {
        LoadState::Loading => common::render_loading(frame, app, chunks[2]),
        LoadState::Error(message) => common::render_error(frame, app, message, chunks[2]),
        LoadState::Loaded(_) => match app.current_view {
            View::Sprites => sprites::render(frame, app, chunks[2]),
            View::Teams => teams::render(frame, app, chunks[2]),
            View::Errors => errors::render(frame, app, chunks[2]),
        },
    }

    common::render_status_bar(frame, app, chunks[3]);

    if app.show_detail_overlay {
        detail::render_overlay(frame, app, area);
    }

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
