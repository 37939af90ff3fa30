//! The task entity and its identifier scheme.
//!
//! A [`TaskId`] is a 24-character lowercase hexadecimal token: a 4-byte
//! big-endian Unix-seconds prefix followed by 8 random bytes. Identifiers
//! are assigned by the store at creation and never reused. Any string that
//! does not match the scheme is rejected at the API boundary before a store
//! lookup ever happens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exact length of a task identifier in hex characters.
pub const TASK_ID_LENGTH: usize = 24;

/// Maximum allowed task title length in characters.
pub const MAX_TITLE_LENGTH: usize = 256;

/// Unique identifier for a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

/// Error returned when a string does not match the identifier scheme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid task ID format")]
pub struct InvalidTaskId;

impl TaskId {
    /// Builds an identifier from its raw parts: the creation time in Unix
    /// seconds and 8 random bytes.
    ///
    /// The caller (the store) supplies the randomness so this crate stays
    /// free of RNG dependencies.
    #[must_use]
    pub fn from_parts(unix_secs: u32, random: [u8; 8]) -> Self {
        let mut hex = String::with_capacity(TASK_ID_LENGTH);
        for byte in unix_secs.to_be_bytes().iter().chain(random.iter()) {
            hex.push_str(&format!("{byte:02x}"));
        }
        Self(hex)
    }

    /// Returns the identifier as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for TaskId {
    type Err = InvalidTaskId;

    /// Accepts exactly [`TASK_ID_LENGTH`] hex characters. Uppercase input is
    /// normalized to lowercase so equal identifiers compare equal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != TASK_ID_LENGTH || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidTaskId);
        }
        Ok(Self(s.to_ascii_lowercase()))
    }
}

impl TryFrom<String> for TaskId {
    type Error = InvalidTaskId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<TaskId> for String {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single to-do item as persisted by the store and carried on the wire.
///
/// Timestamps serialize as RFC 3339 (sortable). `updated_at` equals
/// `created_at` at creation and strictly advances on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier, immutable for the task's lifetime.
    pub id: TaskId,
    /// Non-empty title.
    pub title: String,
    /// Free-form description, empty string when not provided.
    pub description: String,
    /// Completion flag, false at creation.
    pub completed: bool,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation; always `>= created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Errors from the shared title validation rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TitleError {
    /// Title is missing, empty, or whitespace-only.
    #[error("task title cannot be empty")]
    Empty,
    /// Title exceeds [`MAX_TITLE_LENGTH`] characters.
    #[error("task title too long (max {MAX_TITLE_LENGTH} characters)")]
    TooLong,
}

/// Validates a task title and returns it trimmed.
///
/// This is the single source of truth for title validity: the server applies
/// it on create and update, the client applies it before submitting as a UX
/// pre-check only.
///
/// # Errors
///
/// Returns [`TitleError::Empty`] for an empty or whitespace-only title, or
/// [`TitleError::TooLong`] when the trimmed title exceeds
/// [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<&str, TitleError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TitleError::Empty);
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(TitleError::TooLong);
    }
    Ok(trimmed)
}
