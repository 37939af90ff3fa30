//! Status bar rendering: confirmation prompt, loading, error, notice, help.

use ratatui::{Frame, layout::Rect, widgets::Paragraph};

use super::theme;
use crate::app::App;
use crate::controller::Controller;

/// Render the one-line status bar.
///
/// Priority: delete confirmation > loading > error banner > success notice >
/// key help. The error banner persists until the next successful operation;
/// the notice expires on its own.
pub fn render(frame: &mut Frame, area: Rect, app: &App, controller: &Controller) {
    let paragraph = if app.pending_delete.is_some() {
        Paragraph::new("Delete this task? (y/n)").style(theme::warning())
    } else if controller.is_loading() {
        Paragraph::new("Loading tasks...").style(theme::dimmed())
    } else if let Some(message) = controller.error() {
        Paragraph::new(message).style(theme::error())
    } else if let Some(notice) = controller.notice() {
        Paragraph::new(notice).style(theme::success())
    } else {
        Paragraph::new("Tab focus · Enter add/toggle · d delete · r refresh · q quit")
            .style(theme::dimmed())
    };
    frame.render_widget(paragraph, area);
}
