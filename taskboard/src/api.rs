//! HTTP client for the Taskboard REST API.
//!
//! One method per server operation, each a single round trip. Responses are
//! mapped onto [`ApiError`] by status: the error body's `message` is carried
//! through so the UI can show the server's own wording. No retries anywhere;
//! every failure surfaces exactly once.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use taskboard_proto::api::{CreateTaskRequest, DeleteResponse, ErrorBody, UpdateTaskRequest};
use taskboard_proto::task::{Task, TaskId};

/// Errors an API call can produce.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the request input (400).
    #[error("{0}")]
    BadRequest(String),

    /// The task does not exist on the server (404).
    #[error("task not found")]
    NotFound,

    /// The server failed (5xx or unexpected status).
    #[error("server error: {0}")]
    Server(String),

    /// The request never completed (connection refused, timeout, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client for one Taskboard server, with the base URL injected explicitly
/// at construction.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the given base URL (e.g. `http://127.0.0.1:5000`).
    /// A trailing slash is tolerated.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `/api/tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        let resp = self.http.get(self.url("/api/tasks")).send().await?;
        expect_json(resp).await
    }

    /// GET `/api/tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn get(&self, id: &TaskId) -> Result<Task, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/api/tasks/{id}")))
            .send()
            .await?;
        expect_json(resp).await
    }

    /// POST `/api/tasks`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn create(&self, title: &str, description: &str) -> Result<Task, ApiError> {
        let body = CreateTaskRequest {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
        };
        let resp = self
            .http
            .post(self.url("/api/tasks"))
            .json(&body)
            .send()
            .await?;
        expect_json(resp).await
    }

    /// PUT `/api/tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn update(&self, id: &TaskId, patch: &UpdateTaskRequest) -> Result<Task, ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/api/tasks/{id}")))
            .json(patch)
            .send()
            .await?;
        expect_json(resp).await
    }

    /// PATCH `/api/tasks/{id}/toggle`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn toggle(&self, id: &TaskId) -> Result<Task, ApiError> {
        let resp = self
            .http
            .patch(self.url(&format!("/api/tasks/{id}/toggle")))
            .send()
            .await?;
        expect_json(resp).await
    }

    /// DELETE `/api/tasks/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or a non-2xx response.
    pub async fn delete(&self, id: &TaskId) -> Result<DeleteResponse, ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/tasks/{id}")))
            .send()
            .await?;
        expect_json(resp).await
    }
}

/// Decodes a success body, or maps the response status onto [`ApiError`].
async fn expect_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let message = resp
        .json::<ErrorBody>()
        .await
        .map_or_else(|_| format!("unexpected status {status}"), |b| b.message);
    Err(match status {
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::BAD_REQUEST => ApiError::BadRequest(message),
        _ => ApiError::Server(message),
    })
}
