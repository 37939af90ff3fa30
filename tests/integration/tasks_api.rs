//! End-to-end tests of the REST contract, driving a real server with the
//! real client API layer.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use taskboard::api::{ApiClient, ApiError};
use taskboard_proto::api::UpdateTaskRequest;
use taskboard_proto::task::TaskId;
use taskboard_server::routes::start_server;
use taskboard_server::store::TaskStore;

/// Starts an in-memory server on an OS-assigned port and returns a client
/// pointed at it.
async fn start_client() -> ApiClient {
    let store = Arc::new(TaskStore::in_memory());
    let (addr, _handle) = start_server("127.0.0.1:0", store)
        .await
        .expect("failed to start test server");
    ApiClient::new(format!("http://{addr}"))
}

/// A well-formed identifier that no task will ever have.
fn unknown_id() -> TaskId {
    "000000000000000000000000".parse().unwrap()
}

#[tokio::test]
async fn end_to_end_task_lifecycle() {
    let api = start_client().await;

    // POST {title: "Buy milk"} -> created, not completed.
    let task = api.create("Buy milk", "").await.unwrap();
    assert_eq!(task.title, "Buy milk");
    assert!(!task.completed);
    assert_eq!(task.created_at, task.updated_at);

    // PATCH /toggle -> completed.
    let toggled = api.toggle(&task.id).await.unwrap();
    assert!(toggled.completed);

    // GET /api/tasks -> first element is that task.
    let list = api.list().await.unwrap();
    assert_eq!(list[0].id, task.id);
    assert!(list[0].completed);

    // DELETE -> confirmation, then GET -> not found.
    let confirmation = api.delete(&task.id).await.unwrap();
    assert_eq!(confirmation.message, "Task deleted successfully");
    assert!(matches!(api.get(&task.id).await, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn create_then_get_preserves_fields() {
    let api = start_client().await;

    let created = api.create("Write report", "quarterly numbers").await.unwrap();
    let fetched = api.get(&created.id).await.unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.description, "quarterly numbers");
}

#[tokio::test]
async fn create_rejects_missing_title_server_side() {
    let api = start_client().await;

    for title in ["", "   ", "\t\n"] {
        match api.create(title, "irrelevant").await {
            Err(ApiError::BadRequest(message)) => {
                assert_eq!(message, "task title cannot be empty");
            }
            other => panic!("expected BadRequest, got {other:?}"),
        }
    }
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn toggle_twice_returns_to_original_and_advances_updated_at() {
    let api = start_client().await;
    let task = api.create("flip me", "").await.unwrap();

    let once = api.toggle(&task.id).await.unwrap();
    let twice = api.toggle(&task.id).await.unwrap();

    assert!(once.completed);
    assert!(!twice.completed);
    assert!(once.updated_at > task.updated_at);
    assert!(twice.updated_at > once.updated_at);
    assert_eq!(twice.created_at, task.created_at);
}

#[tokio::test]
async fn partial_update_touches_only_present_fields() {
    let api = start_client().await;
    let task = api.create("stable title", "stable description").await.unwrap();

    let patch = UpdateTaskRequest {
        completed: Some(true),
        ..UpdateTaskRequest::default()
    };
    let updated = api.update(&task.id, &patch).await.unwrap();
    assert_eq!(updated.title, "stable title");
    assert_eq!(updated.description, "stable description");
    assert!(updated.completed);
    assert!(updated.updated_at > task.updated_at);
}

#[tokio::test]
async fn update_can_rename_but_not_blank_the_title() {
    let api = start_client().await;
    let task = api.create("old name", "").await.unwrap();

    let rename = UpdateTaskRequest {
        title: Some("  new name  ".to_string()),
        ..UpdateTaskRequest::default()
    };
    let updated = api.update(&task.id, &rename).await.unwrap();
    assert_eq!(updated.title, "new name");

    let blank = UpdateTaskRequest {
        title: Some("   ".to_string()),
        ..UpdateTaskRequest::default()
    };
    assert!(matches!(
        api.update(&task.id, &blank).await,
        Err(ApiError::BadRequest(_))
    ));
    assert_eq!(api.get(&task.id).await.unwrap().title, "new name");
}

#[tokio::test]
async fn list_is_ordered_newest_first() {
    let api = start_client().await;

    let first = api.create("first", "").await.unwrap();
    let second = api.create("second", "").await.unwrap();
    let third = api.create("third", "").await.unwrap();

    let list = api.list().await.unwrap();
    let ids: Vec<&TaskId> = list.iter().map(|t| &t.id).collect();
    assert_eq!(ids, vec![&third.id, &second.id, &first.id]);
    assert!(list.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[tokio::test]
async fn operations_on_unknown_id_yield_not_found() {
    let api = start_client().await;
    let id = unknown_id();

    assert!(matches!(api.get(&id).await, Err(ApiError::NotFound)));
    assert!(matches!(api.toggle(&id).await, Err(ApiError::NotFound)));
    assert!(matches!(api.delete(&id).await, Err(ApiError::NotFound)));
    let patch = UpdateTaskRequest {
        completed: Some(true),
        ..UpdateTaskRequest::default()
    };
    assert!(matches!(
        api.update(&id, &patch).await,
        Err(ApiError::NotFound)
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Nothing listens on port 9 on loopback.
    let api = ApiClient::new("http://127.0.0.1:9");
    assert!(matches!(api.list().await, Err(ApiError::Transport(_))));
}
