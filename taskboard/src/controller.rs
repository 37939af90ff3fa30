//! Client state controller: an explicit state machine over the cached task
//! list, driven by operation outcomes.
//!
//! The controller holds the only client-side copy of the task list. It is a
//! pure reducer: [`Controller::apply`] folds an [`Event`] into the state
//! with time injected by the caller, so every transition is unit-testable
//! without I/O. The [`execute`] helper is the impure edge that runs one
//! [`Action`] against the server and feeds the outcome back in.
//!
//! Reconciliation policy (applied uniformly): the server response is the
//! source of truth for every mutation. When the server reports the task
//! missing for a toggle, update, or delete, the task is dropped from local
//! state without a full refetch and without surfacing an error.

use std::time::{Duration, Instant};

use taskboard_proto::task::{Task, TaskId, validate_title};

use crate::api::{ApiClient, ApiError};

/// How long a transient success notice stays visible.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

/// Lifecycle of the cached task list.
///
/// `Loading` and `Error` retain the previously known tasks so a failed
/// refresh leaves the visible list unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A refresh is in flight.
    Loading {
        /// Tasks known before the refresh started.
        prior: Vec<Task>,
    },
    /// The list mirrors the last successful server response.
    Loaded {
        /// Cached tasks, newest first.
        tasks: Vec<Task>,
    },
    /// The last operation failed; the message persists until the next
    /// successful operation clears it.
    Error {
        /// User-facing failure description.
        message: String,
        /// Tasks known before the failure.
        tasks: Vec<Task>,
    },
}

/// An operation outcome to fold into the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A list refresh was started.
    RefreshStarted,
    /// The server returned the full task list.
    RefreshCompleted(Vec<Task>),
    /// The refresh failed; prior tasks are kept.
    RefreshFailed(String),
    /// The server created a task; it is prepended (newest first).
    TaskCreated(Task),
    /// The server returned an updated copy; it replaces the match by id.
    TaskReplaced(Task),
    /// The task is gone server-side (deleted, or reported missing during a
    /// mutation); it is dropped locally.
    TaskRemoved(TaskId),
    /// A create/update/toggle/delete failed; the list is left unchanged.
    MutationFailed(String),
}

/// A user action to run against the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Re-fetch the full list.
    Refresh,
    /// Create a task from the form inputs.
    Submit {
        /// Raw title as typed (trimmed by validation).
        title: String,
        /// Raw description as typed.
        description: String,
    },
    /// Flip completion of one task.
    Toggle(TaskId),
    /// Delete one task (already confirmed by the user).
    Delete(TaskId),
    /// Exit the client.
    Quit,
}

/// A transient success message with its creation instant.
#[derive(Debug, Clone)]
pub struct Notice {
    message: String,
    shown_at: Instant,
}

impl Notice {
    fn new(message: impl Into<String>, now: Instant) -> Self {
        Self {
            message: message.into(),
            shown_at: now,
        }
    }

    /// True once the notice has outlived [`NOTICE_TTL`].
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.shown_at) >= NOTICE_TTL
    }
}

/// The client state controller.
#[derive(Debug, Default)]
pub struct Controller {
    state: ListState,
    notice: Option<Notice>,
}

impl Controller {
    /// Creates a controller in the [`ListState::Idle`] state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current list state.
    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    /// The cached tasks, regardless of which state currently holds them.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        match &self.state {
            ListState::Idle => &[],
            ListState::Loading { prior } => prior,
            ListState::Loaded { tasks } | ListState::Error { tasks, .. } => tasks,
        }
    }

    /// True while a refresh is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, ListState::Loading { .. })
    }

    /// The persistent error message, if the last operation failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ListState::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// The current transient success message, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|n| n.message.as_str())
    }

    /// Clears the notice once it has expired. Called every UI tick.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
    }

    /// Folds one operation outcome into the state.
    pub fn apply(&mut self, event: Event, now: Instant) {
        match event {
            Event::RefreshStarted => {
                let prior = self.take_tasks();
                self.state = ListState::Loading { prior };
            }
            Event::RefreshCompleted(tasks) => {
                self.state = ListState::Loaded { tasks };
            }
            Event::RefreshFailed(message) => {
                let tasks = self.take_tasks();
                self.state = ListState::Error { message, tasks };
            }
            Event::TaskCreated(task) => {
                let mut tasks = self.take_tasks();
                tasks.insert(0, task);
                self.state = ListState::Loaded { tasks };
                self.notice = Some(Notice::new("Task added successfully!", now));
            }
            Event::TaskReplaced(task) => {
                let mut tasks = self.take_tasks();
                if let Some(slot) = tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
                self.state = ListState::Loaded { tasks };
            }
            Event::TaskRemoved(id) => {
                let mut tasks = self.take_tasks();
                tasks.retain(|t| t.id != id);
                self.state = ListState::Loaded { tasks };
                self.notice = Some(Notice::new("Task deleted successfully!", now));
            }
            Event::MutationFailed(message) => {
                let tasks = self.take_tasks();
                self.state = ListState::Error { message, tasks };
            }
        }
    }

    /// Takes the cached tasks out of whichever state holds them, leaving
    /// `Idle` behind momentarily.
    fn take_tasks(&mut self) -> Vec<Task> {
        match std::mem::take(&mut self.state) {
            ListState::Idle => Vec::new(),
            ListState::Loading { prior } => prior,
            ListState::Loaded { tasks } | ListState::Error { tasks, .. } => tasks,
        }
    }
}

/// Runs one action against the server and folds the outcome into the
/// controller. Returns `true` when a task was created (the caller clears
/// its input form).
///
/// The title guard runs here before any network call, using the same shared
/// rule the server enforces; the server remains the source of truth.
pub async fn execute(api: &ApiClient, controller: &mut Controller, action: Action) -> bool {
    match action {
        Action::Quit => {}
        Action::Refresh => {
            controller.apply(Event::RefreshStarted, Instant::now());
            match api.list().await {
                Ok(tasks) => controller.apply(Event::RefreshCompleted(tasks), Instant::now()),
                Err(e) => {
                    tracing::warn!(error = %e, "refresh failed");
                    controller.apply(
                        Event::RefreshFailed(format!(
                            "Failed to fetch tasks. Is the server running? ({e})"
                        )),
                        Instant::now(),
                    );
                }
            }
        }
        Action::Submit { title, description } => {
            if validate_title(&title).is_err() {
                controller.apply(
                    Event::MutationFailed("Task title is required".to_string()),
                    Instant::now(),
                );
                return false;
            }
            match api.create(&title, &description).await {
                Ok(task) => {
                    controller.apply(Event::TaskCreated(task), Instant::now());
                    return true;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "create failed");
                    controller.apply(
                        Event::MutationFailed(format!("Failed to add task: {e}")),
                        Instant::now(),
                    );
                }
            }
        }
        Action::Toggle(id) => match api.toggle(&id).await {
            Ok(task) => controller.apply(Event::TaskReplaced(task), Instant::now()),
            Err(ApiError::NotFound) => {
                tracing::info!(id = %id, "task gone server-side, dropping locally");
                controller.apply(Event::TaskRemoved(id), Instant::now());
            }
            Err(e) => {
                tracing::warn!(error = %e, "toggle failed");
                controller.apply(
                    Event::MutationFailed(format!("Failed to update task: {e}")),
                    Instant::now(),
                );
            }
        },
        Action::Delete(id) => match api.delete(&id).await {
            Ok(_) | Err(ApiError::NotFound) => {
                controller.apply(Event::TaskRemoved(id), Instant::now());
            }
            Err(e) => {
                tracing::warn!(error = %e, "delete failed");
                controller.apply(
                    Event::MutationFailed(format!("Failed to delete task: {e}")),
                    Instant::now(),
                );
            }
        },
    }
    false
}
