//! Integration tests for the remote-backed task store.
//!
//! Runs `HttpTaskService` + `RemoteStore` against an in-process axum server
//! that speaks the task API envelope and can be told to fail the next call.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::significant_drop_tightening)]

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use chrono::{NaiveDate, NaiveTime};
use parking_lot::Mutex;
use todolist::service::ServiceError;
use todolist::service::http::{ApiConfig, HttpTaskService};
use todolist::tasks::{RemoteStore, StoreError, TaskDraft};
use todolist_proto::envelope::ApiResponse;
use todolist_proto::request::{CreateTaskRequest, TaskPatch};
use todolist_proto::task::{Category, Priority, Task, TaskId};
use url::Url;

// ---------------------------------------------------------------------------
// Fake task API
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Failure {
    /// HTTP 500 with a plain-text body.
    ServerError,
    /// `success: false` envelope that still carries a task payload.
    Rejected,
    /// HTTP 200 with a body that is not an envelope.
    Garbage,
}

#[derive(Debug, Default)]
struct FakeApi {
    tasks: Vec<Task>,
    next_id: u32,
    requests: usize,
    fail_next: Option<Failure>,
}

type Shared = Arc<Mutex<FakeApi>>;

fn admit(api: &mut FakeApi) -> Option<Response> {
    api.requests += 1;
    let failure = api.fail_next.take()?;
    Some(match failure {
        Failure::ServerError => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        Failure::Rejected => Json(ApiResponse {
            success: false,
            data: api.tasks.first().cloned(),
            message: "Task is locked".to_string(),
            error: Some("LOCKED".to_string()),
        })
        .into_response(),
        Failure::Garbage => (StatusCode::OK, "<html>bad gateway</html>").into_response(),
    })
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<Task>::failure("Task not found", None)),
    )
        .into_response()
}

async fn list_tasks(State(api): State<Shared>) -> Response {
    let mut api = api.lock();
    if let Some(failure) = admit(&mut api) {
        return failure;
    }
    Json(ApiResponse::ok(Some(api.tasks.clone()), "Tasks retrieved")).into_response()
}

async fn fetch_task(State(api): State<Shared>, Path(id): Path<String>) -> Response {
    let mut api = api.lock();
    if let Some(failure) = admit(&mut api) {
        return failure;
    }
    match api.tasks.iter().find(|t| t.id.as_str() == id) {
        Some(task) => Json(ApiResponse::ok(Some(task.clone()), "Task retrieved")).into_response(),
        None => not_found(),
    }
}

async fn create_task(
    State(api): State<Shared>,
    Json(req): Json<CreateTaskRequest>,
) -> Response {
    let mut api = api.lock();
    if let Some(failure) = admit(&mut api) {
        return failure;
    }
    api.next_id += 1;
    let mut task = Task::new(
        TaskId::new(format!("srv-{}", api.next_id)),
        req.text.trim(),
    );
    task.priority = req.priority.unwrap_or_default();
    task.category = req.category.unwrap_or_default();
    task.due_date = req.due_date;
    task.due_time = req.due_time;
    task.is_recurring = req.is_recurring.unwrap_or(false);
    api.tasks.push(task.clone());
    (
        StatusCode::CREATED,
        Json(ApiResponse::ok(Some(task), "Task created")),
    )
        .into_response()
}

async fn update_task(
    State(api): State<Shared>,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Response {
    let mut api = api.lock();
    if let Some(failure) = admit(&mut api) {
        return failure;
    }
    match api.tasks.iter_mut().find(|t| t.id.as_str() == id) {
        Some(task) => {
            patch.apply_to(task);
            Json(ApiResponse::ok(Some(task.clone()), "Task updated")).into_response()
        }
        None => not_found(),
    }
}

async fn delete_task(State(api): State<Shared>, Path(id): Path<String>) -> Response {
    let mut api = api.lock();
    if let Some(failure) = admit(&mut api) {
        return failure;
    }
    let before = api.tasks.len();
    api.tasks.retain(|t| t.id.as_str() != id);
    if api.tasks.len() == before {
        return not_found();
    }
    Json(ApiResponse::<()>::ok(None, "Task deleted")).into_response()
}

async fn toggle_task(State(api): State<Shared>, Path(id): Path<String>) -> Response {
    let mut api = api.lock();
    if let Some(failure) = admit(&mut api) {
        return failure;
    }
    match api.tasks.iter_mut().find(|t| t.id.as_str() == id) {
        Some(task) => {
            task.is_completed = !task.is_completed;
            Json(ApiResponse::ok(Some(task.clone()), "Task toggled")).into_response()
        }
        None => not_found(),
    }
}

/// Starts the fake API on an ephemeral port and returns its shared state
/// plus a client config pointing at it.
async fn start_fake_api(tasks: Vec<Task>) -> (Shared, ApiConfig) {
    let state: Shared = Arc::new(Mutex::new(FakeApi {
        tasks,
        ..FakeApi::default()
    }));
    let app = Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(fetch_task).put(update_task).delete(delete_task),
        )
        .route("/api/tasks/{id}/toggle", patch(toggle_task))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let base_url = Url::parse(&format!("http://{addr}/api")).unwrap();
    (state, ApiConfig::new(base_url))
}

/// Two tasks as the service would hold them.
fn server_tasks() -> Vec<Task> {
    let mut sync = Task::new(TaskId::new("2"), "Team sync");
    sync.is_completed = true;
    let mut milk = Task::new(TaskId::new("1"), "Buy milk");
    milk.category = Category::Other;
    vec![milk, sync]
}

async fn loaded_store() -> (Shared, RemoteStore<HttpTaskService>) {
    let (api, config) = start_fake_api(server_tasks()).await;
    let mut store = RemoteStore::new(HttpTaskService::new(&config).unwrap());
    store.load().await.unwrap();
    (api, store)
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

#[tokio::test]
async fn load_replaces_collection_with_server_list() {
    let (_api, store) = loaded_store().await;
    assert_eq!(store.tasks(), server_tasks().as_slice());
}

#[tokio::test]
async fn failed_load_keeps_previous_collection() {
    let (api, mut store) = loaded_store().await;
    api.lock().tasks.clear();
    api.lock().fail_next = Some(Failure::ServerError);

    let err = store.load().await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Service(ServiceError::Status { status: 500, .. })
    ));
    assert_eq!(store.tasks().len(), 2);
}

#[tokio::test]
async fn undecodable_body_is_decode_error() {
    let (api, mut store) = loaded_store().await;
    api.lock().fail_next = Some(Failure::Garbage);

    let err = store.load().await.unwrap_err();
    assert!(matches!(err, StoreError::Service(ServiceError::Decode(_))));
}

#[tokio::test]
async fn unreachable_service_is_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ApiConfig::new(Url::parse(&format!("http://{addr}/api")).unwrap());
    let mut store = RemoteStore::new(HttpTaskService::new(&config).unwrap());
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, StoreError::Service(ServiceError::Unavailable)));
    assert!(store.tasks().is_empty());
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_appends_record_with_server_id() {
    let (api, mut store) = loaded_store().await;
    let created = store
        .create(&TaskDraft::new("  Write report ").with_priority(Priority::High))
        .await
        .unwrap()
        .unwrap()
        .clone();

    assert_eq!(created.id, TaskId::new("srv-1"));
    assert_eq!(created.text, "Write report");
    assert_eq!(created.priority, Priority::High);
    assert_eq!(created.category, Category::Meeting);
    assert!(!created.is_completed);
    assert_eq!(store.tasks().last(), Some(&created));
    assert_eq!(api.lock().tasks.len(), 3);
}

#[tokio::test]
async fn create_round_trips_due_date_and_time() {
    let (_api, mut store) = loaded_store().await;
    let date = NaiveDate::from_ymd_opt(2024, 6, 18).unwrap();
    let time = NaiveTime::from_hms_opt(9, 30, 0).unwrap();

    let created = store
        .create(&TaskDraft::new("Dentist").with_due_date(date).with_due_time(time))
        .await
        .unwrap()
        .unwrap()
        .clone();
    assert_eq!(created.due_date, Some(date));
    assert_eq!(created.due_time, Some(time));
}

#[tokio::test]
async fn create_blank_text_never_reaches_server() {
    let (api, mut store) = loaded_store().await;
    let requests = api.lock().requests;

    assert!(store.create(&TaskDraft::new("   ")).await.unwrap().is_none());
    assert_eq!(api.lock().requests, requests);
    assert_eq!(store.tasks().len(), 2);
}

#[tokio::test]
async fn rejected_envelope_fails_even_with_payload() {
    let (api, mut store) = loaded_store().await;
    api.lock().fail_next = Some(Failure::Rejected);

    let err = store.create(&TaskDraft::new("x")).await.unwrap_err();
    match err {
        StoreError::Service(ServiceError::Rejected { message, detail }) => {
            assert_eq!(message, "Task is locked");
            assert_eq!(detail.as_deref(), Some("LOCKED"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
    assert_eq!(store.tasks(), server_tasks().as_slice());
}

// ---------------------------------------------------------------------------
// Toggle / delete / update / refresh
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggle_adopts_server_record() {
    let (_api, mut store) = loaded_store().await;
    let id = TaskId::new("1");

    let toggled = store.toggle_completion(&id).await.unwrap();
    assert!(toggled.is_completed);
    assert!(store.store().get(&id).unwrap().is_completed);

    let toggled = store.toggle_completion(&id).await.unwrap();
    assert!(!toggled.is_completed);
    assert_eq!(store.tasks(), server_tasks().as_slice());
}

#[tokio::test]
async fn toggle_unknown_id_is_not_found_and_noop() {
    let (_api, mut store) = loaded_store().await;
    let err = store
        .toggle_completion(&TaskId::new("missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.tasks(), server_tasks().as_slice());
}

#[tokio::test]
async fn failed_toggle_leaves_task_unchanged() {
    let (api, mut store) = loaded_store().await;
    api.lock().fail_next = Some(Failure::ServerError);

    assert!(store.toggle_completion(&TaskId::new("1")).await.is_err());
    assert_eq!(store.tasks(), server_tasks().as_slice());
}

#[tokio::test]
async fn delete_removes_after_server_confirms() {
    let (api, mut store) = loaded_store().await;
    store.delete(&TaskId::new("1")).await.unwrap();

    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].text, "Team sync");
    assert_eq!(api.lock().tasks.len(), 1);
}

#[tokio::test]
async fn failed_delete_keeps_task() {
    let (api, mut store) = loaded_store().await;
    api.lock().fail_next = Some(Failure::ServerError);

    assert!(store.delete(&TaskId::new("1")).await.is_err());
    assert_eq!(store.tasks(), server_tasks().as_slice());
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let (_api, mut store) = loaded_store().await;
    let err = store.delete(&TaskId::new("ghost")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_can_set_and_clear_due_date() {
    let (api, mut store) = loaded_store().await;
    let id = TaskId::new("1");
    let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();

    let set = TaskPatch {
        due_date: Some(Some(date)),
        category: Some(Category::Review),
        ..TaskPatch::default()
    };
    let updated = store.update(&id, &set).await.unwrap().unwrap();
    assert_eq!(updated.due_date, Some(date));
    assert_eq!(updated.category, Category::Review);

    let clear = TaskPatch {
        due_date: Some(None),
        ..TaskPatch::default()
    };
    let cleared = store.update(&id, &clear).await.unwrap().unwrap();
    assert_eq!(cleared.due_date, None);
    assert_eq!(cleared.category, Category::Review);
    assert_eq!(api.lock().tasks[0].due_date, None);
    assert_eq!(store.store().get(&id), Some(&cleared));
}

#[tokio::test]
async fn refresh_picks_up_server_side_change() {
    let (api, mut store) = loaded_store().await;
    api.lock().tasks[0].text = "Buy oat milk".to_string();

    let fresh = store.refresh(&TaskId::new("1")).await.unwrap();
    assert_eq!(fresh.text, "Buy oat milk");
    assert_eq!(store.tasks()[0].text, "Buy oat milk");
}

#[tokio::test]
async fn refresh_unknown_id_is_not_found() {
    let (_api, mut store) = loaded_store().await;
    let err = store.refresh(&TaskId::new("ghost")).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.tasks().len(), 2);
}
