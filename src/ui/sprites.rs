//! Sprites view rendering.
//!
//! Metric cards for the whole fleet on top, and a table of the sprites
//! visible under the current team filter below.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::{format_ms, FleetData, SpriteRow};

/// Shown in place of the table when the filter matches nothing.
pub const EMPTY_FILTER_MESSAGE: &str = "No sprites found for the selected filter";

/// Render the Sprites view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(data) = app.data() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(4), // Metric cards
        Constraint::Min(4),    // Sprite table
    ])
    .split(area);

    render_metrics(frame, app, data, chunks[0]);
    render_table(frame, app, data, chunks[1]);
}

fn render_metrics(frame: &mut Frame, app: &App, data: &FleetData, area: Rect) {
    let cards = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(2),
    ])
    .split(area);

    let card = |title: &'static str| {
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_type(app.theme.border_type)
            .border_style(Style::default().fg(app.theme.border))
    };

    let metrics = [
        ("Total Sprites", data.total, Style::default()),
        ("Healthy", data.healthy, Style::default().fg(app.theme.positive)),
        ("Unhealthy", data.unhealthy, Style::default().fg(app.theme.negative)),
    ];
    for (i, (title, value, style)) in metrics.into_iter().enumerate() {
        let value = Paragraph::new(Span::styled(
            value.to_string(),
            style.add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(card(title));
        frame.render_widget(value, cards[i]);
    }

    let gauge = Gauge::default()
        .block(card("Health"))
        .gauge_style(Style::default().fg(app.theme.tier_color(data.percent_tier())))
        .percent(u16::from(data.percent))
        .label(format!("{}%", data.percent));
    frame.render_widget(gauge, cards[3]);
}

fn render_table(frame: &mut Frame, app: &App, data: &FleetData, area: Rect) {
    let rows = app.visible_rows();

    let selected = app.selected_sprite_index.min(rows.len().saturating_sub(1));
    let position_info = if !rows.is_empty() {
        format!(" [{}/{}]", selected + 1, rows.len())
    } else {
        String::new()
    };
    let title = format!(
        " Sprites: {} ({}/{}){} ",
        app.team_filter.label(&app.registry),
        rows.len(),
        data.rows.len(),
        position_info
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                EMPTY_FILTER_MESSAGE,
                Style::default().add_modifier(Modifier::DIM),
            )),
        ])
        .alignment(Alignment::Center)
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Sprite"),
        Cell::from("Team"),
        Cell::from("Status"),
        Cell::from("API Status"),
        Cell::from("Response"),
        Cell::from("Tools"),
    ])
    .height(1)
    .style(app.theme.header);

    let table_rows: Vec<Row> = rows.iter().map(|row| sprite_row(app, row)).collect();

    let widths = [
        Constraint::Fill(3),    // Sprite
        Constraint::Fill(1),    // Team
        Constraint::Fill(1),    // Status
        Constraint::Fill(1),    // API Status
        Constraint::Length(9),  // Response
        Constraint::Length(24), // Tools
    ];

    let table = Table::new(table_rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}

fn sprite_row<'a>(app: &App, row: &'a SpriteRow) -> Row<'a> {
    let tools = Line::from(vec![
        Span::styled(row.claude.label.clone(), app.theme.tier_style(row.claude.tier)),
        Span::raw(" "),
        Span::styled(row.codex.label.clone(), app.theme.tier_style(row.codex.tier)),
    ]);

    Row::new(vec![
        Cell::from(row.sprite.name.as_str()),
        Cell::from(row.team.as_str()),
        Cell::from(row.health.label.as_str()).style(app.theme.tier_style(row.health.tier)),
        Cell::from(api_status_label(row)).style(app.theme.tier_style(row.status_tier)),
        Cell::from(format_ms(row.sprite.api_response_ms)),
        Cell::from(tools),
    ])
}

fn api_status_label(row: &SpriteRow) -> String {
    if row.sprite.api_status.is_empty() {
        crate::data::MISSING.to_string()
    } else {
        row.sprite.api_status.to_string()
    }
}
