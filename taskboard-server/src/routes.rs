//! HTTP surface: routing, request validation, and error mapping.
//!
//! Each handler validates its input at the boundary, performs exactly one
//! store operation, and returns the resulting entity or a JSON error body.
//! Malformed identifiers are rejected with a 400 before any store lookup.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, patch};
use taskboard_proto::api::{CreateTaskRequest, DeleteResponse, ErrorBody, UpdateTaskRequest};
use taskboard_proto::task::{Task, TaskId, TitleError, validate_title};

use crate::store::{StoreError, TaskPatch, TaskStore};

/// Errors a request handler can produce, each carrying its HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The path parameter does not match the identifier scheme.
    #[error("Invalid task ID format")]
    InvalidId,

    /// The request body failed the shared title validation rule.
    #[error(transparent)]
    InvalidTitle(#[from] TitleError),

    /// A well-formed identifier with no matching task.
    #[error("Task not found")]
    NotFound,

    /// The store failed; the message is the underlying cause.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId | Self::InvalidTitle(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "request rejected");
        }
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Parses a path parameter into a [`TaskId`], rejecting anything outside the
/// identifier scheme before it can reach the store.
fn parse_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| {
        tracing::debug!(id = %raw, "rejected malformed task id");
        ApiError::InvalidId
    })
}

/// GET `/api/tasks` — all tasks, newest first.
async fn list_tasks(State(store): State<Arc<TaskStore>>) -> Json<Vec<Task>> {
    Json(store.list().await)
}

/// GET `/api/tasks/{id}`
async fn get_task(
    State(store): State<Arc<TaskStore>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let task = store.find(&id).await.ok_or(ApiError::NotFound)?;
    Ok(Json(task))
}

/// POST `/api/tasks` — create a task. A missing, empty, or whitespace-only
/// title is an explicit 400; the description defaults to the empty string.
async fn create_task(
    State(store): State<Arc<TaskStore>>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let title = validate_title(req.title.as_deref().unwrap_or_default())?.to_string();
    let description = req.description.unwrap_or_default();
    let task = store.insert(title, description).await?;
    tracing::info!(id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT `/api/tasks/{id}` — apply only the fields present in the body.
async fn update_task(
    State(store): State<Arc<TaskStore>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let title = match req.title {
        Some(t) => Some(validate_title(&t)?.to_string()),
        None => None,
    };
    let patch = TaskPatch {
        title,
        description: req.description,
        completed: req.completed,
    };
    let task = store.apply(&id, patch).await?.ok_or(ApiError::NotFound)?;
    tracing::info!(id = %task.id, "task updated");
    Ok(Json(task))
}

/// PATCH `/api/tasks/{id}/toggle` — flip the completion flag.
async fn toggle_task(
    State(store): State<Arc<TaskStore>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(&id)?;
    let task = store.toggle(&id).await?.ok_or(ApiError::NotFound)?;
    tracing::info!(id = %task.id, completed = task.completed, "task toggled");
    Ok(Json(task))
}

/// DELETE `/api/tasks/{id}` — remove permanently.
async fn delete_task(
    State(store): State<Arc<TaskStore>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    if !store.remove(&id).await? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id = %id, "task deleted");
    Ok(Json(DeleteResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Builds the application router over a shared store.
pub fn router(store: Arc<TaskStore>) -> axum::Router {
    axum::Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/toggle", patch(toggle_task))
        .with_state(store)
}

/// Starts the server on the given address and returns the bound address and
/// a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code
/// (bind to `127.0.0.1:0` for an OS-assigned port).
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
    store: Arc<TaskStore>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(store);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server error");
        }
    });

    Ok((bound_addr, handle))
}
