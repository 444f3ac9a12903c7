//! End-to-end flows through the store and the view engine, without the CLI.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use taskflow::ops::{group, view};
use taskflow::store::client::{NewTask, TaskStore};
use taskflow::store::memory::InMemoryStore;
use taskflow::store::record::TaskRecord;

// Wednesday
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
}

fn seeded_store() -> InMemoryStore {
    let records: Vec<TaskRecord> = serde_json::from_str(
        r#"[
            {"Id": 1, "title": "Pay rent", "priority": "high",
             "dueDate": "2025-03-12", "createdAt": "2025-03-01T08:00:00Z"},
            {"Id": 2, "title_c": "Plan trip", "priority_c": "low",
             "due_date_c": "2025-03-17", "CreatedOn": "2025-03-02T08:00:00Z"},
            {"Id": 3, "title": "Old chore", "completed": true,
             "completedAt": "2025-03-10T12:00:00Z",
             "createdAt": "2025-02-20T08:00:00Z"},
            {"Id": 4, "title": "Someday maybe",
             "createdAt": "2025-03-03T08:00:00Z"}
        ]"#,
    )
    .unwrap();
    InMemoryStore::from_records(records, Vec::new()).unwrap()
}

#[tokio::test]
async fn today_view_shows_only_tasks_due_today() {
    let store = seeded_store();
    let tasks = store.list_all().await.unwrap();

    let query = view::ViewQuery::new(view::ViewScope::Today);
    let selected = view::select(&tasks, &query, today());

    let titles: Vec<_> = selected.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Pay rent"]);
}

#[tokio::test]
async fn upcoming_view_groups_mixed_convention_records() {
    let store = seeded_store();
    let tasks = store.list_all().await.unwrap();

    let query = view::ViewQuery::new(view::ViewScope::Upcoming);
    let selected = view::select(&tasks, &query, today());
    let groups = group::group_upcoming(&selected, today());

    // 2025-03-17 is the Monday after the reference Wednesday
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].label, "Next Week");
    assert_eq!(groups[0].tasks[0].title, "Plan trip");
}

#[tokio::test]
async fn archive_flow_after_completing_a_task() {
    let store = seeded_store();
    store.toggle_complete(4).await.unwrap();

    let tasks = store.list_all().await.unwrap();
    let query = view::ViewQuery::new(view::ViewScope::Archive);
    let selected = view::select(&tasks, &query, today());

    // Newest completion first: task 4 finished just now, task 3 on March 10
    let ids: Vec<_> = selected.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![4, 3]);

    let groups = group::group_archive(&selected);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].label, "March 10, 2025");
}

#[tokio::test]
async fn created_tasks_flow_into_views() {
    let store = seeded_store();
    store
        .create(NewTask {
            title: "Fresh task".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 3, 12),
            ..Default::default()
        })
        .await
        .unwrap();

    let tasks = store.list_all().await.unwrap();
    let query = view::ViewQuery::new(view::ViewScope::Today);
    let selected = view::select(&tasks, &query, today());

    let titles: Vec<_> = selected.iter().map(|t| t.title.as_str()).collect();
    // High priority sorts ahead of the default medium
    assert_eq!(titles, vec!["Pay rent", "Fresh task"]);
}

#[tokio::test]
async fn search_spans_title_and_description() {
    let store = seeded_store();
    store
        .create(NewTask {
            title: "Errands".into(),
            description: "buy groceries and stamps".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    let tasks = store.list_all().await.unwrap();
    let mut query = view::ViewQuery::new(view::ViewScope::All);
    query.search = Some("groceries".into());
    let selected = view::select(&tasks, &query, today());

    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].title, "Errands");
}
