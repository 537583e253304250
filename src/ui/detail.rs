//! Detail overlay rendering.
//!
//! Displays a modal overlay with every field the probe reported for the
//! selected sprite.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::badge::format_availability;
use crate::data::{format_ms, SpriteRow, MISSING};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 44;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the sprite detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(row) = app.selected_row() else {
        return;
    };

    // 70% of the width, computed wide so huge terminals don't overflow
    let overlay_width = u16::try_from(u32::from(area.width) * 70 / 100)
        .unwrap_or(u16::MAX)
        .clamp(MIN_OVERLAY_WIDTH, 72);
    let overlay_height = MIN_OVERLAY_HEIGHT;
    let overlay_area = super::common::centered_rect(area, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(10),   // Fields
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let block = Block::default()
        .title(format!(" {} ", row.sprite.name))
        .title_style(Style::default().add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(detail_lines(app, row)).block(block), chunks[0]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " ↑↓:next sprite  Esc:close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[1]);
}

fn detail_lines<'a>(app: &App, row: &'a SpriteRow) -> Vec<Line<'a>> {
    let field = |label: &'static str, value: Span<'a>| {
        Line::from(vec![Span::raw(format!(" {:<18}", label)), value])
    };
    let plain = |value: String| Span::raw(value);
    let sprite = &row.sprite;

    let api_status = if sprite.api_status.is_empty() {
        Span::raw(MISSING)
    } else {
        Span::styled(sprite.api_status.to_string(), app.theme.tier_style(row.status_tier))
    };

    vec![
        field(
            "Health",
            Span::styled(
                row.health.label.clone(),
                app.theme.tier_style(row.health.tier).add_modifier(Modifier::BOLD),
            ),
        ),
        field("Team", plain(row.team.clone())),
        field("API status", api_status),
        field("API response", plain(format_ms(sprite.api_response_ms))),
        field("Responsive", plain(format_availability(sprite.responsive).to_string())),
        field("Probe response", plain(format_ms(sprite.probe_response_ms))),
        field(
            "Claude",
            Span::styled(row.claude.label.clone(), app.theme.tier_style(row.claude.tier)),
        ),
        field(
            "Codex",
            Span::styled(row.codex.label.clone(), app.theme.tier_style(row.codex.tier)),
        ),
    ]
}
