//! Integration tests for filtering, searching and bucket counts through a
//! full application session.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use todolist::app::App;
use todolist::service::memory::MemoryTaskService;
use todolist::view::{BucketCounts, FilterKind, Visible};
use todolist_proto::task::{Category, Task, TaskId};

/// The two-task collection: an open errand and a completed meeting.
fn two_tasks() -> Vec<Task> {
    let mut milk = Task::new(TaskId::new("1"), "Buy milk");
    milk.category = Category::Other;
    let mut sync = Task::new(TaskId::new("2"), "Team sync");
    sync.category = Category::Meeting;
    sync.is_completed = true;
    vec![milk, sync]
}

async fn session() -> App<MemoryTaskService> {
    App::start(MemoryTaskService::with_tasks(two_tasks()))
        .await
        .unwrap()
}

fn visible_ids(app: &App<MemoryTaskService>) -> Vec<String> {
    app.projection()
        .visible
        .tasks()
        .iter()
        .map(|t| t.id.to_string())
        .collect()
}

#[tokio::test]
async fn each_filter_selects_its_bucket() {
    let mut app = session().await;

    app.select_filter(FilterKind::Meeting);
    assert_eq!(visible_ids(&app), vec!["2"]);

    app.select_filter(FilterKind::Undone);
    assert_eq!(visible_ids(&app), vec!["1"]);

    app.select_filter(FilterKind::Consummation);
    assert_eq!(visible_ids(&app), vec!["2"]);

    app.select_filter(FilterKind::All);
    assert_eq!(visible_ids(&app), vec!["1", "2"]);
}

#[tokio::test]
async fn reselecting_filter_shows_everything_again() {
    let mut app = session().await;
    app.select_filter(FilterKind::Meeting);
    app.select_filter(FilterKind::Meeting);
    assert_eq!(app.active_filter(), FilterKind::All);
    assert_eq!(visible_ids(&app), vec!["1", "2"]);
}

#[tokio::test]
async fn search_ignores_case() {
    let mut app = session().await;
    for query in ["milk", "MILK", "  Milk  "] {
        app.set_search(query);
        assert_eq!(visible_ids(&app), vec!["1"], "query {query:?}");
    }
}

#[tokio::test]
async fn search_without_match_reports_query() {
    let mut app = session().await;
    app.set_search("zzz");
    assert_eq!(
        app.projection().visible,
        Visible::NoSearchResults {
            query: "zzz".to_string()
        }
    );
}

#[tokio::test]
async fn filter_without_match_is_plain_empty() {
    let mut app = session().await;
    app.delete(&TaskId::new("2")).await.unwrap();
    app.select_filter(FilterKind::Consummation);
    assert_eq!(app.projection().visible, Visible::Tasks(Vec::new()));
}

#[tokio::test]
async fn counts_ignore_filter_and_search() {
    let mut app = session().await;
    let expected = BucketCounts {
        undone: 1,
        meeting: 1,
        completed: 1,
    };
    assert_eq!(app.projection().counts, expected);

    app.select_filter(FilterKind::Undone);
    app.set_search("milk");
    assert_eq!(app.projection().counts, expected);

    app.set_search("zzz");
    assert_eq!(app.projection().counts, expected);
}

#[tokio::test]
async fn new_task_appears_at_end_of_view() {
    let mut app = session().await;
    app.open_composer().text = "Book meeting room".to_string();
    let created = app.save_composer().await.unwrap().unwrap();

    app.select_filter(FilterKind::Meeting);
    assert_eq!(visible_ids(&app), vec!["2".to_string(), created.id.to_string()]);
    assert_eq!(app.projection().counts.meeting, 2);
}

#[tokio::test]
async fn clearing_search_restores_full_list() {
    let mut app = session().await;
    app.set_search("sync");
    assert_eq!(visible_ids(&app), vec!["2"]);
    app.clear_search();
    assert_eq!(visible_ids(&app), vec!["1", "2"]);
}
