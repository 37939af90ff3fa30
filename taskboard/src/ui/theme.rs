//! Theme and styling constants for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Primary foreground color.
pub const FG_PRIMARY: Color = Color::White;

/// Secondary foreground color (dimmed text).
pub const FG_SECONDARY: Color = Color::DarkGray;

/// Highlight color for focused elements and the selection.
pub const HIGHLIGHT: Color = Color::Cyan;

/// Success notice color.
pub const SUCCESS: Color = Color::Green;

/// Warning color (delete confirmation).
pub const WARNING: Color = Color::Yellow;

/// Error banner color.
pub const ERROR: Color = Color::Red;

/// Default text style.
#[must_use]
pub fn normal() -> Style {
    Style::default().fg(FG_PRIMARY)
}

/// Dimmed text style (completed tasks, secondary detail).
#[must_use]
pub fn dimmed() -> Style {
    Style::default().fg(FG_SECONDARY)
}

/// Style for the focused element.
#[must_use]
pub fn focused() -> Style {
    Style::default().fg(HIGHLIGHT)
}

/// Style for the list selection row.
#[must_use]
pub fn selected() -> Style {
    Style::default()
        .fg(HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Style for success notices.
#[must_use]
pub fn success() -> Style {
    Style::default().fg(SUCCESS)
}

/// Style for the delete confirmation prompt.
#[must_use]
pub fn warning() -> Style {
    Style::default().fg(WARNING).add_modifier(Modifier::BOLD)
}

/// Style for error banners.
#[must_use]
pub fn error() -> Style {
    Style::default().fg(ERROR)
}
