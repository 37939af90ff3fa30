//! TUI input state and key handling.
//!
//! [`App`] owns what the user is typing and pointing at: the new-task form,
//! the list selection, and the delete confirmation. Key events map to
//! [`Action`]s that the main loop executes; the task list itself lives in
//! the [`crate::controller::Controller`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskboard_proto::task::{Task, TaskId};

use crate::controller::Action;

/// Which part of the screen receives typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Title field of the new-task form (default).
    Title,
    /// Description field of the new-task form.
    Description,
    /// The task list.
    List,
}

/// TUI input state.
pub struct App {
    /// Title being typed for a new task.
    pub title_input: String,
    /// Description being typed for a new task.
    pub description_input: String,
    /// Focused element.
    pub focus: Focus,
    /// Selected row in the task list.
    pub selected: usize,
    /// Task awaiting delete confirmation, if any.
    pub pending_delete: Option<TaskId>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates the initial input state with the title field focused.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            title_input: String::new(),
            description_input: String::new(),
            focus: Focus::Title,
            selected: 0,
            pending_delete: None,
        }
    }

    /// Empties the new-task form. Called after a successful create.
    pub fn clear_form(&mut self) {
        self.title_input.clear();
        self.description_input.clear();
    }

    /// Maps a key event to an action, given the currently listed tasks.
    ///
    /// Returns `None` when the key only changed local input state.
    pub fn handle_key(&mut self, key: KeyEvent, tasks: &[Task]) -> Option<Action> {
        // Ctrl-C quits from anywhere.
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        // A pending delete confirmation captures all input.
        if let Some(id) = self.pending_delete.clone() {
            match key.code {
                KeyCode::Char('y' | 'Y') => {
                    self.pending_delete = None;
                    return Some(Action::Delete(id));
                }
                KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                    self.pending_delete = None;
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Title => Focus::Description,
                    Focus::Description => Focus::List,
                    Focus::List => Focus::Title,
                };
                None
            }
            KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Title => Focus::List,
                    Focus::Description => Focus::Title,
                    Focus::List => Focus::Description,
                };
                None
            }
            _ => match self.focus {
                Focus::Title | Focus::Description => self.handle_form_key(key),
                Focus::List => self.handle_list_key(key, tasks),
            },
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let field = if self.focus == Focus::Title {
            &mut self.title_input
        } else {
            &mut self.description_input
        };
        match key.code {
            KeyCode::Enter => Some(Action::Submit {
                title: self.title_input.clone(),
                description: self.description_input.clone(),
            }),
            KeyCode::Char(c) => {
                field.push(c);
                None
            }
            KeyCode::Backspace => {
                field.pop();
                None
            }
            KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent, tasks: &[Task]) -> Option<Action> {
        self.clamp_selection(tasks.len());
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < tasks.len() {
                    self.selected += 1;
                }
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                tasks.get(self.selected).map(|t| Action::Toggle(t.id.clone()))
            }
            KeyCode::Char('d') => {
                // Ask for confirmation first; 'y' produces the Delete action.
                self.pending_delete = tasks.get(self.selected).map(|t| t.id.clone());
                None
            }
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    /// Keeps the selection inside the list after the task set changed.
    pub fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
