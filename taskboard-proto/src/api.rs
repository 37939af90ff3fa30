//! Request and response bodies for the `/api/tasks` HTTP surface.
//!
//! All bodies are JSON. `title` is optional in [`CreateTaskRequest`] so a
//! missing field deserializes cleanly and the server can answer with an
//! explicit 400 from the shared validation rule instead of a generic
//! deserialization rejection.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    /// Required semantically; validated server-side.
    pub title: Option<String>,
    /// Defaults to the empty string when absent.
    pub description: Option<String>,
}

/// Body of `PUT /api/tasks/{id}`.
///
/// Each field is independently optional; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    /// New title; must pass the shared validation rule when present.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New completion flag.
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// True when no field is set (the request would be a no-op apart from
    /// refreshing `updatedAt`).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

/// Success body of `DELETE /api/tasks/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Error body shared by every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable description of the failure.
    pub message: String,
}
