//! The async store contract the views program against, plus the shared
//! mutation semantics every implementation applies.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use futures::future::join_all;
use tracing::warn;

use crate::model::list::{List, DEFAULT_LIST_COLOR};
use crate::model::task::{Priority, Task};
use crate::store::error::StoreError;

/// Fields accepted when creating a task. The store assigns the id and
/// creation timestamp and forces the new task incomplete.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    /// Defaults to medium when absent
    pub priority: Option<Priority>,
    pub due_date: Option<NaiveDate>,
    pub list_id: Option<u32>,
}

/// A partial update. `None` leaves a field untouched; the doubled options
/// distinguish "don't touch" from "clear".
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Option<Priority>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub list_id: Option<Option<u32>>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Default)]
pub struct NewList {
    pub name: String,
    pub color: Option<String>,
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub order: Option<i32>,
}

/// CRUD contract for task records. All operations may fail with a
/// `StoreError`; not-found is reported per id, never as an empty success.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Task>, StoreError>;
    async fn get(&self, id: u32) -> Result<Task, StoreError>;
    async fn create(&self, new: NewTask) -> Result<Task, StoreError>;
    async fn update(&self, id: u32, patch: TaskPatch) -> Result<Task, StoreError>;
    async fn delete(&self, id: u32) -> Result<(), StoreError>;
    /// Flip the completion flag, stamping or clearing the completion time
    async fn toggle_complete(&self, id: u32) -> Result<Task, StoreError>;
    /// Un-archive: force incomplete and clear the completion time
    async fn restore(&self, id: u32) -> Result<Task, StoreError>;
}

/// CRUD contract for list records
#[async_trait]
pub trait ListStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<List>, StoreError>;
    async fn get(&self, id: u32) -> Result<List, StoreError>;
    async fn create(&self, new: NewList) -> Result<List, StoreError>;
    async fn update(&self, id: u32, patch: ListPatch) -> Result<List, StoreError>;
    async fn delete(&self, id: u32) -> Result<(), StoreError>;
}

/// Aggregate result of a batch archive clear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearOutcome {
    pub deleted: usize,
    pub failed: usize,
}

/// Delete every completed task, issuing the deletes concurrently.
///
/// There is no rollback and no retry: individual failures are counted and
/// reported in the aggregate outcome, leaving the store partially cleared.
pub async fn clear_archive(store: &dyn TaskStore) -> Result<ClearOutcome, StoreError> {
    let archived: Vec<u32> = store
        .list_all()
        .await?
        .into_iter()
        .filter(|t| t.completed)
        .map(|t| t.id)
        .collect();

    let results = join_all(archived.iter().map(|&id| store.delete(id))).await;

    let mut outcome = ClearOutcome::default();
    for (id, result) in archived.into_iter().zip(results) {
        match result {
            Ok(()) => outcome.deleted += 1,
            Err(err) => {
                warn!(task_id = id, error = %err, "archive clear: delete failed");
                outcome.failed += 1;
            }
        }
    }
    Ok(outcome)
}

// ---------------------------------------------------------------------------
// Shared mutation semantics
// ---------------------------------------------------------------------------

/// Build a task from creation fields. Validates the title and applies the
/// creation defaults shared by every store implementation.
pub(crate) fn build_task(new: NewTask, id: u32, now: DateTime<Utc>) -> Result<Task, StoreError> {
    let title = new.title.trim().to_string();
    if title.is_empty() {
        return Err(StoreError::Validation("task title must not be empty".into()));
    }

    Ok(Task {
        id,
        title,
        description: new.description,
        priority: new.priority.or(Some(Priority::Medium)),
        due_date: new.due_date,
        list_id: new.list_id,
        completed: false,
        completed_at: None,
        created_at: now,
    })
}

/// Merge a patch into a task, keeping the completed/completed-at invariant.
pub(crate) fn apply_task_patch(
    task: &mut Task,
    patch: TaskPatch,
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    if let Some(title) = patch.title {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(StoreError::Validation("task title must not be empty".into()));
        }
        task.title = title;
    }
    if let Some(description) = patch.description {
        task.description = description;
    }
    if let Some(priority) = patch.priority {
        task.priority = priority;
    }
    if let Some(due_date) = patch.due_date {
        task.due_date = due_date;
    }
    if let Some(list_id) = patch.list_id {
        task.list_id = list_id;
    }
    if let Some(completed) = patch.completed {
        set_completed(task, completed, now);
    }
    Ok(())
}

/// Set the completion flag, stamping or clearing `completed_at`
pub(crate) fn set_completed(task: &mut Task, completed: bool, now: DateTime<Utc>) {
    task.completed = completed;
    task.completed_at = if completed {
        task.completed_at.or(Some(now))
    } else {
        None
    };
}

/// Build a list from creation fields
pub(crate) fn build_list(new: NewList, id: u32, now: DateTime<Utc>) -> Result<List, StoreError> {
    let name = new.name.trim().to_string();
    if name.is_empty() {
        return Err(StoreError::Validation("list name must not be empty".into()));
    }

    Ok(List {
        id,
        name,
        color: new.color.unwrap_or_else(|| DEFAULT_LIST_COLOR.to_string()),
        order: new.order.unwrap_or(0),
        created_at: now,
    })
}

pub(crate) fn apply_list_patch(list: &mut List, patch: ListPatch) -> Result<(), StoreError> {
    if let Some(name) = patch.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::Validation("list name must not be empty".into()));
        }
        list.name = name;
    }
    if let Some(color) = patch.color {
        list.color = color;
    }
    if let Some(order) = patch.order {
        list.order = order;
    }
    Ok(())
}
