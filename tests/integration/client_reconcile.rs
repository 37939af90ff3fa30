//! Integration tests for the client controller against a live server:
//! refresh transitions, error retention, and reconciliation of mutations
//! that race with server-side deletes.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use taskboard::api::ApiClient;
use taskboard::controller::{self, Action, Controller, ListState};
use taskboard_server::routes::start_server;
use taskboard_server::store::TaskStore;

async fn start_client() -> ApiClient {
    let store = Arc::new(TaskStore::in_memory());
    let (addr, _handle) = start_server("127.0.0.1:0", store)
        .await
        .expect("failed to start test server");
    ApiClient::new(format!("http://{addr}"))
}

#[tokio::test]
async fn refresh_loads_the_server_list_newest_first() {
    let api = start_client().await;
    api.create("first", "").await.unwrap();
    api.create("second", "").await.unwrap();

    let mut ctl = Controller::new();
    controller::execute(&api, &mut ctl, Action::Refresh).await;

    assert!(matches!(ctl.state(), ListState::Loaded { .. }));
    let titles: Vec<&str> = ctl.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn failed_refresh_keeps_the_last_good_list() {
    let api = start_client().await;
    api.create("survivor", "").await.unwrap();

    let mut ctl = Controller::new();
    controller::execute(&api, &mut ctl, Action::Refresh).await;
    assert_eq!(ctl.tasks().len(), 1);

    // Nothing listens on port 9 on loopback.
    let dead = ApiClient::new("http://127.0.0.1:9");
    controller::execute(&dead, &mut ctl, Action::Refresh).await;

    assert!(ctl.error().is_some());
    assert_eq!(ctl.tasks().len(), 1);
    assert_eq!(ctl.tasks()[0].title, "survivor");
}

#[tokio::test]
async fn submit_creates_prepends_and_requests_a_form_clear() {
    let api = start_client().await;
    let mut ctl = Controller::new();
    controller::execute(&api, &mut ctl, Action::Refresh).await;

    let cleared = controller::execute(
        &api,
        &mut ctl,
        Action::Submit {
            title: "  Buy milk  ".to_string(),
            description: "2 liters".to_string(),
        },
    )
    .await;

    assert!(cleared);
    assert_eq!(ctl.tasks().len(), 1);
    assert_eq!(ctl.tasks()[0].title, "Buy milk");
    assert_eq!(ctl.notice(), Some("Task added successfully!"));

    // The server agrees.
    assert_eq!(api.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn submit_with_blank_title_never_reaches_the_server() {
    let api = start_client().await;
    let mut ctl = Controller::new();

    let cleared = controller::execute(
        &api,
        &mut ctl,
        Action::Submit {
            title: "   ".to_string(),
            description: String::new(),
        },
    )
    .await;

    assert!(!cleared);
    assert_eq!(ctl.error(), Some("Task title is required"));
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn toggle_replaces_the_task_in_place() {
    let api = start_client().await;
    api.create("a", "").await.unwrap();
    let target = api.create("b", "").await.unwrap();
    api.create("c", "").await.unwrap();

    let mut ctl = Controller::new();
    controller::execute(&api, &mut ctl, Action::Refresh).await;

    controller::execute(&api, &mut ctl, Action::Toggle(target.id.clone())).await;

    let titles: Vec<&str> = ctl.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["c", "b", "a"]);
    let toggled = ctl.tasks().iter().find(|t| t.id == target.id).unwrap();
    assert!(toggled.completed);
    assert!(toggled.updated_at > target.updated_at);
}

#[tokio::test]
async fn delete_drops_the_task_with_a_notice() {
    let api = start_client().await;
    let task = api.create("doomed", "").await.unwrap();

    let mut ctl = Controller::new();
    controller::execute(&api, &mut ctl, Action::Refresh).await;

    controller::execute(&api, &mut ctl, Action::Delete(task.id.clone())).await;

    assert!(ctl.tasks().is_empty());
    assert_eq!(ctl.notice(), Some("Task deleted successfully!"));
    assert!(api.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn toggling_a_task_deleted_elsewhere_drops_it_locally() {
    let api = start_client().await;
    let task = api.create("racing", "").await.unwrap();

    let mut ctl = Controller::new();
    controller::execute(&api, &mut ctl, Action::Refresh).await;
    assert_eq!(ctl.tasks().len(), 1);

    // Another client deletes the task behind this controller's back.
    api.delete(&task.id).await.unwrap();

    controller::execute(&api, &mut ctl, Action::Toggle(task.id.clone())).await;

    assert!(ctl.tasks().is_empty());
    assert!(ctl.error().is_none());
}

#[tokio::test]
async fn deleting_a_task_deleted_elsewhere_is_still_a_success() {
    let api = start_client().await;
    let task = api.create("racing", "").await.unwrap();

    let mut ctl = Controller::new();
    controller::execute(&api, &mut ctl, Action::Refresh).await;

    api.delete(&task.id).await.unwrap();
    controller::execute(&api, &mut ctl, Action::Delete(task.id.clone())).await;

    assert!(ctl.tasks().is_empty());
    assert!(ctl.error().is_none());
    assert_eq!(ctl.notice(), Some("Task deleted successfully!"));
}

#[tokio::test]
async fn failed_mutation_keeps_the_cached_list() {
    let api = start_client().await;
    let task = api.create("keep me", "").await.unwrap();

    let mut ctl = Controller::new();
    controller::execute(&api, &mut ctl, Action::Refresh).await;

    let dead = ApiClient::new("http://127.0.0.1:9");
    controller::execute(&dead, &mut ctl, Action::Toggle(task.id.clone())).await;

    assert!(ctl.error().is_some());
    assert_eq!(ctl.tasks().len(), 1);
    assert!(!ctl.tasks()[0].completed);
}
