//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::Tier;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for positive badges (healthy, warm, tool available).
    pub positive: Color,
    /// Color for warning badges and mid-range health.
    pub warning: Color,
    /// Color for negative badges (unhealthy, error, not found).
    pub negative: Color,
    /// Color for informational badges (running).
    pub info: Color,
    /// Color for unknown or unrecognized values.
    pub neutral: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            positive: Color::Green,
            warning: Color::Yellow,
            negative: Color::Red,
            info: Color::LightBlue,
            neutral: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            positive: Color::Green,
            warning: Color::Yellow,
            negative: Color::Red,
            info: Color::Blue,
            neutral: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Foreground color for a badge tier.
    pub fn tier_color(&self, tier: Tier) -> Color {
        match tier {
            Tier::Positive => self.positive,
            Tier::Warning => self.warning,
            Tier::Negative => self.negative,
            Tier::Info => self.info,
            Tier::Neutral => self.neutral,
        }
    }

    /// Get style for a badge tier
    pub fn tier_style(&self, tier: Tier) -> Style {
        let style = Style::default().fg(self.tier_color(tier));
        match tier {
            Tier::Negative => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }
}
