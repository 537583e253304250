//! Errors view rendering.
//!
//! Lists the sprites the probe could not check at all, as reported in the
//! `errors` section of the fleet report.

use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::MISSING;
use crate::source::ApiStatus;

/// Render the Errors view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(data) = app.data() else {
        return;
    };

    let block = Block::default()
        .title(format!(" Probe Errors ({}) ", data.errors.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if data.errors.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No probe errors reported",
                Style::default().fg(app.theme.positive),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Sprite"),
        Cell::from("Status"),
        Cell::from("Error"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = data
        .errors
        .iter()
        .map(|e| {
            let error = match e.error.as_deref() {
                Some(msg) => Cell::from(msg),
                None => Cell::from(MISSING).style(Style::default().add_modifier(Modifier::DIM)),
            };
            Row::new(vec![
                Cell::from(e.sprite.as_str()),
                Cell::from(e.status.as_str())
                    .style(app.theme.tier_style(ApiStatus::from(e.status.as_str()).tier())),
                error,
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),    // Sprite
        Constraint::Length(12), // Status
        Constraint::Fill(3),    // Error
    ];

    let selected = app.selected_error_index.min(data.errors.len().saturating_sub(1));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}
