//! Terminal UI rendering.

pub mod form;
pub mod status_bar;
pub mod task_panel;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::App;
use crate::controller::Controller;

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App, controller: &Controller) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // New-task form
            Constraint::Min(3),    // Task list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    form::render(frame, chunks[0], app);
    task_panel::render(frame, chunks[1], app, controller.tasks());
    status_bar::render(frame, chunks[2], app, controller);
}
