//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, the loading and
//! error panels, and the help overlay.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::app::{App, LoadState, View};

/// Render the header bar with the fleet health overview.
///
/// Displays: status indicator, healthy/total, health percentage, and the
/// report timestamp.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Span::styled("FLEETWATCH ", Style::default().add_modifier(Modifier::BOLD));

    let line = match &app.state {
        LoadState::Loading => Line::from(vec![Span::raw(" "), title, Span::raw("| Loading...")]),
        LoadState::Error(_) => Line::from(vec![
            Span::styled(" ● ", app.theme.tier_style(crate::data::Tier::Negative)),
            title,
            Span::raw("│ "),
            Span::styled("error", app.theme.tier_style(crate::data::Tier::Negative)),
        ]),
        LoadState::Loaded(data) => {
            let style = app.theme.tier_style(data.percent_tier());
            Line::from(vec![
                Span::styled(" ● ", style),
                title,
                Span::raw("│ "),
                Span::styled(
                    format!("{}", data.healthy),
                    Style::default().fg(app.theme.positive),
                ),
                Span::raw(format!("/{} healthy ", data.total)),
                Span::styled(format!("({}%)", data.percent), style),
                Span::raw(" │ "),
                Span::styled(
                    format!("Last updated {}", data.timestamp),
                    Style::default().add_modifier(Modifier::DIM),
                ),
            ])
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let error_count = app.data().map_or(0, |d| d.errors.len());
    let titles: Vec<Line> = vec![
        Line::from(" 1:Sprites "),
        Line::from(" 2:Teams "),
        Line::from(format!(" 3:Errors ({}) ", error_count)),
    ];

    let selected = match app.current_view {
        View::Sprites => 0,
        View::Teams => 1,
        View::Errors => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, available controls.
/// Also displays temporary status messages.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let dim = Style::default().add_modifier(Modifier::DIM);
    let line = match &app.state {
        LoadState::Loaded(data) => {
            let controls = match app.current_view {
                View::Sprites => "t/T:team a:all Enter:detail r:reload ?:help q:quit",
                View::Teams => "↑↓:select Enter:show sprites ?:help q:quit",
                View::Errors => "↑↓:select Tab:switch ?:help q:quit",
            };
            let mut spans = Vec::new();
            // Counts in the report contradict each other
            if let Some(warning) = data.warnings.first() {
                spans.push(Span::styled(
                    format!(" ⚠ {} |", warning),
                    Style::default().fg(app.theme.warning),
                ));
            }
            spans.push(Span::styled(
                format!(
                    " {} | Updated {:.1}s ago | {}",
                    app.source_description(),
                    data.last_updated.elapsed().as_secs_f64(),
                    controls,
                ),
                dim,
            ));
            Line::from(spans)
        }
        LoadState::Error(_) => Line::styled(
            format!(" {} | r:retry q:quit", app.source_description()),
            dim,
        ),
        LoadState::Loading => Line::styled(
            format!(" Loading {} | q:quit", app.source_description()),
            dim,
        ),
    };

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the placeholder shown before the first report arrives.
pub fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Loading fleet status...",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center)
    .block(block);

    frame.render_widget(paragraph, area);
}

/// Render the load failure panel.
pub fn render_error(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let negative = app.theme.tier_style(crate::data::Tier::Negative);
    let block = Block::default()
        .title(" Error Loading Fleet Status ")
        .title_style(negative)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.negative));

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), negative)),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to retry",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(paragraph, area);
}

/// Center a `width` x `height` box inside `area`, shrinking it to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2/3       Sprites/Teams/Errors"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  PgUp/PgDn   Jump 10 items"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Detail / show team"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" Team filter"),
        Line::from("  t / T       Next / previous team"),
        Line::from("  a           All teams"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Reload data"),
        Line::from("  e           Export to JSON"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 24u16.min(area.height.saturating_sub(2));
    let help_area = centered_rect(area, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
