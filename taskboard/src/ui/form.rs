//! New-task form rendering.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, Focus};

/// Render the title and description input fields.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    render_field(
        frame,
        chunks[0],
        "Title",
        &app.title_input,
        app.focus == Focus::Title,
    );
    render_field(
        frame,
        chunks[1],
        "Description (optional)",
        &app.description_input,
        app.focus == Focus::Description,
    );
}

fn render_field(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border_style = if focused {
        theme::focused()
    } else {
        theme::dimmed()
    };
    let block = Block::default()
        .title(label)
        .borders(Borders::ALL)
        .border_style(border_style);
    let paragraph = Paragraph::new(value).style(theme::normal()).block(block);
    frame.render_widget(paragraph, area);

    if focused {
        // Place the cursor right after the typed text, inside the border.
        let x = area.x + 1 + u16::try_from(value.chars().count()).unwrap_or(u16::MAX - 1);
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}
