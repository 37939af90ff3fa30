//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use taskboard_proto::task::Task;

use super::theme;
use crate::app::{App, Focus};

/// Render the task list, or an empty-state hint when there are no tasks.
pub fn render(frame: &mut Frame, area: Rect, app: &App, tasks: &[Task]) {
    let focused = app.focus == Focus::List;
    let border_style = if focused {
        theme::focused()
    } else {
        theme::dimmed()
    };
    let block = Block::default()
        .title(format!("Tasks ({})", tasks.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if tasks.is_empty() {
        let empty = Paragraph::new("No tasks yet. Add your first task above.")
            .style(theme::dimmed())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tasks.iter().map(task_row).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected.min(tasks.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn task_row(task: &Task) -> ListItem<'_> {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let title_style = if task.completed {
        theme::dimmed().add_modifier(Modifier::CROSSED_OUT)
    } else {
        theme::normal()
    };

    let mut spans = vec![
        Span::styled(checkbox, theme::dimmed()),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
    ];
    if !task.description.is_empty() {
        spans.push(Span::styled(
            format!("  {}", task.description),
            theme::dimmed(),
        ));
    }
    spans.push(Span::styled(
        format!("  {}", task.created_at.format("%b %d %H:%M")),
        theme::dimmed(),
    ));

    ListItem::new(Line::from(spans))
}
