//! Document store for tasks.
//!
//! An `RwLock`-guarded map keyed by [`TaskId`], with optional JSON-file
//! persistence. Every successful mutation is flushed to the data file before
//! the call returns, so an acknowledged write is durable. A store opened
//! without a data path is purely in-memory (used by tests).
//!
//! The store owns identifier assignment and timestamp bookkeeping.
//! Identifier *validation* is the HTTP layer's job; every method here takes
//! an already-parsed [`TaskId`].

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use taskboard_proto::task::{Task, TaskId};
use tokio::sync::RwLock;

/// Errors from the persistence layer. All of them map to a 500 at the HTTP
/// boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Failed to read the data file.
    #[error("failed to read data file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to write the data file.
    #[error("failed to write data file {path}: {source}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to encode or decode the task data.
    #[error("failed to encode or decode task data: {0}")]
    Codec(#[from] serde_json::Error),
}

/// A partial update to a task. Absent fields are left unchanged.
///
/// The HTTP layer builds this from an update request after running the
/// shared title validation, so a `title` here is already trimmed and valid.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// New title, already validated.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New completion flag.
    pub completed: Option<bool>,
}

/// In-process document store with optional JSON-file durability.
pub struct TaskStore {
    tasks: RwLock<HashMap<TaskId, Task>>,
    data_path: Option<PathBuf>,
}

impl TaskStore {
    /// Creates an empty store with no persistence.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            data_path: None,
        }
    }

    /// Opens a store backed by the given data file, loading any existing
    /// tasks. A missing file is treated as an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the file exists but cannot be read or
    /// parsed.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let tasks = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let list: Vec<Task> = serde_json::from_str(&contents)?;
                list.into_iter().map(|t| (t.id.clone(), t)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(StoreError::ReadFile { path, source: e }),
        };
        Ok(Self {
            tasks: RwLock::new(tasks),
            data_path: Some(path),
        })
    }

    /// Returns all tasks ordered by creation time descending (newest first),
    /// identifier descending as a tiebreak.
    pub async fn list(&self) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        let mut list: Vec<Task> = tasks.values().cloned().collect();
        list.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        list
    }

    /// Looks up a single task by identifier.
    pub async fn find(&self, id: &TaskId) -> Option<Task> {
        let tasks = self.tasks.read().await;
        tasks.get(id).cloned()
    }

    /// Inserts a new task with a fresh identifier. Both timestamps are set
    /// to the same instant and `completed` starts false.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the mutation cannot be persisted.
    pub async fn insert(&self, title: String, description: String) -> Result<Task, StoreError> {
        let mut tasks = self.tasks.write().await;
        let now = Utc::now();
        let id = Self::fresh_id(&tasks, now);
        let task = Task {
            id: id.clone(),
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        tasks.insert(id, task.clone());
        self.persist(&tasks)?;
        Ok(task)
    }

    /// Applies a partial update, refreshing `updated_at`. Returns the
    /// updated task, or `None` if no task has the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the mutation cannot be persisted.
    pub async fn apply(&self, id: &TaskId, patch: TaskPatch) -> Result<Option<Task>, StoreError> {
        self.mutate(id, move |task| {
            if let Some(title) = patch.title {
                task.title = title;
            }
            if let Some(description) = patch.description {
                task.description = description;
            }
            if let Some(completed) = patch.completed {
                task.completed = completed;
            }
        })
        .await
    }

    /// Flips the completion flag, refreshing `updated_at`. Returns the
    /// updated task, or `None` if no task has the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the mutation cannot be persisted.
    pub async fn toggle(&self, id: &TaskId) -> Result<Option<Task>, StoreError> {
        self.mutate(id, |task| task.completed = !task.completed).await
    }

    /// Removes a task permanently. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the mutation cannot be persisted.
    pub async fn remove(&self, id: &TaskId) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;
        let existed = tasks.remove(id).is_some();
        if existed {
            self.persist(&tasks)?;
        }
        Ok(existed)
    }

    /// Runs a mutation under the write lock, advancing `updated_at` and
    /// persisting afterwards.
    async fn mutate(
        &self,
        id: &TaskId,
        f: impl FnOnce(&mut Task),
    ) -> Result<Option<Task>, StoreError> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.get_mut(id) else {
            return Ok(None);
        };
        f(task);
        task.updated_at = advance(task.updated_at);
        let updated = task.clone();
        self.persist(&tasks)?;
        Ok(Some(updated))
    }

    /// Generates an identifier not present in the map. Collisions are
    /// vanishingly rare (8 random bytes) but the uniqueness invariant is
    /// cheap to enforce under the write lock.
    fn fresh_id(tasks: &HashMap<TaskId, Task>, now: DateTime<Utc>) -> TaskId {
        let secs = u32::try_from(now.timestamp()).unwrap_or(0);
        loop {
            let id = TaskId::from_parts(secs, rand::random());
            if !tasks.contains_key(&id) {
                return id;
            }
        }
    }

    /// Writes the full task set to the data file, if one is configured.
    /// Called with the write lock held so acknowledged writes are ordered.
    fn persist(&self, tasks: &HashMap<TaskId, Task>) -> Result<(), StoreError> {
        let Some(path) = &self.data_path else {
            return Ok(());
        };
        let mut list: Vec<&Task> = tasks.values().collect();
        list.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        let json = serde_json::to_vec_pretty(&list)?;
        std::fs::write(path, json).map_err(|e| StoreError::WriteFile {
            path: path.clone(),
            source: e,
        })
    }
}

/// Returns the current instant, nudged forward by one millisecond if the
/// clock has not visibly moved since the previous update. Keeps `updated_at`
/// strictly increasing per task.
fn advance(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + TimeDelta::milliseconds(1)
    }
}
