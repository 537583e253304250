//! Teams view rendering.
//!
//! One row per team with its share of healthy sprites. The team currently
//! used as the sprite filter is marked.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;
use crate::data::TeamFilter;

/// Render the Teams view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(data) = app.data() else {
        return;
    };

    let header = Row::new(vec![
        Cell::from("Team"),
        Cell::from("Description"),
        Cell::from("Reporting"),
        Cell::from("Healthy"),
        Cell::from("Unhealthy"),
        Cell::from("Health"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = data
        .teams
        .iter()
        .map(|team| {
            let marker = match &app.team_filter {
                TeamFilter::Team(name) if *name == team.name => "● ",
                _ => "  ",
            };
            // An empty team has no health to speak of
            let health = if team.reporting == 0 {
                Cell::from(crate::data::MISSING)
            } else {
                Cell::from(format!("{}%", team.percent)).style(app.theme.tier_style(team.tier()))
            };
            let reporting = if team.members > 0 {
                format!("{}/{}", team.reporting, team.members)
            } else {
                team.reporting.to_string()
            };

            Row::new(vec![
                Cell::from(format!("{}{}", marker, team.name)),
                Cell::from(team.description.as_str()),
                Cell::from(reporting),
                Cell::from(team.healthy.to_string()).style(Style::default().fg(app.theme.positive)),
                Cell::from(team.unhealthy.to_string()).style(if team.unhealthy > 0 {
                    app.theme.tier_style(crate::data::Tier::Negative)
                } else {
                    Style::default()
                }),
                health,
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(1),    // Team
        Constraint::Fill(3),    // Description
        Constraint::Length(10), // Reporting
        Constraint::Length(8),  // Healthy
        Constraint::Length(10), // Unhealthy
        Constraint::Length(7),  // Health
    ];

    let selected = app.selected_team_index.min(data.teams.len().saturating_sub(1));
    let title = format!(" Teams ({}) [Enter: show sprites] ", data.teams.len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}
